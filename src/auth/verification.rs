//! Email verification: confirming an address and resending the link.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::error::ApiErrorBody;
use crate::{AuthStore, ReviewHub, User};

/// Outcome of a successful email verification.
#[derive(Clone, Debug)]
pub enum EmailVerification {
    /// The address was verified and the backend issued a session; the
    /// token has been installed on the client.
    SignedIn(AuthStore),
    /// The address was already verified. No token is issued; the user
    /// signs in normally.
    AlreadyVerified,
}

/// Represents the various errors that can occur during email
/// verification.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// The verification token does not match any pending account.
    #[error("Email verification failed: the verification token is invalid.")]
    InvalidToken,
    /// The verification token matched but has expired; request a new one
    /// with [`ReviewHub::resend_verification`].
    #[error("Email verification failed: the verification token has expired.")]
    ExpiredToken,
    /// No account exists for the email given to a resend request.
    #[error("Verification email could not be sent: no account with this email address.")]
    UnknownEmail,
    /// Communication with the `ReviewHub` API was successful,
    /// but returned a [400 Bad Request]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/400") HTTP error response.
    #[error("Email verification failed: {0}")]
    BadRequest(String),
    /// An HTTP error occurred while communicating with the `ReviewHub` API.
    #[error("Email verification failed. Couldn't reach the ReviewHub API: {0}")]
    HttpError(#[from] reqwest::Error),
    /// When something unexpected was returned by the `ReviewHub` REST API.
    #[error("Email verification failed due to an unexpected response.")]
    UnexpectedResponse,
}

#[derive(Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    message: Option<String>,
    // Absent when the address was already verified.
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

impl ReviewHub {
    /// Confirms an email address with the token from the emailed link.
    ///
    /// On first-time verification the backend issues a session token,
    /// which is installed on the client.
    ///
    /// # Example
    /// ```rust,ignore
    /// match hub.verify_email(&token_from_link).await? {
    ///     EmailVerification::SignedIn(auth) => println!("hello {}", auth.user.username),
    ///     EmailVerification::AlreadyVerified => println!("already done, just sign in"),
    /// }
    /// ```
    pub async fn verify_email(
        &mut self,
        token: &str,
    ) -> Result<EmailVerification, VerificationError> {
        let url = self.endpoint("/api/auth/verify-email");
        let body: HashMap<&str, &str> = HashMap::from([("token", token)]);

        let response = self.request_post_json(&url, &body).send().await?;

        if response.status().is_success() {
            let payload = response
                .json::<VerifyResponse>()
                .await
                .map_err(|_| VerificationError::UnexpectedResponse)?;

            return match (payload.access_token, payload.user) {
                (Some(token), Some(user)) => {
                    self.set_token(&token);
                    Ok(EmailVerification::SignedIn(AuthStore { user, token }))
                }
                _ => Ok(EmailVerification::AlreadyVerified),
            };
        }

        match response.status() {
            reqwest::StatusCode::BAD_REQUEST => {
                let body = ApiErrorBody::from_response(response).await;
                let message = body.display("Invalid verification token");

                if message.to_lowercase().contains("expired") {
                    Err(VerificationError::ExpiredToken)
                } else if message.to_lowercase().contains("token") {
                    Err(VerificationError::InvalidToken)
                } else {
                    Err(VerificationError::BadRequest(message))
                }
            }
            _ => Err(VerificationError::UnexpectedResponse),
        }
    }

    /// Sends a fresh verification email.
    pub async fn resend_verification(&self, email: &str) -> Result<(), VerificationError> {
        let url = self.endpoint("/api/auth/resend-verification");
        let body: HashMap<&str, &str> = HashMap::from([("email", email)]);

        let response = self.request_post_json(&url, &body).send().await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            reqwest::StatusCode::NOT_FOUND => Err(VerificationError::UnknownEmail),
            reqwest::StatusCode::BAD_REQUEST => {
                let body = ApiErrorBody::from_response(response).await;
                Err(VerificationError::BadRequest(
                    body.display("Email is required"),
                ))
            }
            _ => Err(VerificationError::UnexpectedResponse),
        }
    }
}
