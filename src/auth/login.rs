//! Sign-in with a username or email plus password.

use serde::Serialize;
use thiserror::Error;

use crate::error::ApiErrorBody;
use crate::{AuthStore, ReviewHub};

#[derive(Clone, Default, Serialize)]
struct Credentials<'a> {
    /// The backend accepts either a username or an email address here.
    pub(crate) username: &'a str,
    pub(crate) password: &'a str,
}

/// Represents errors that can occur while signing in to the `ReviewHub`
/// API.
#[derive(Error, Debug)]
pub enum LoginError {
    /// Username/email and password cannot be empty.
    ///
    /// The fields are represented as booleans:
    ///
    /// - `identity`: is blank and shouldn't be.
    /// - `password`: is blank and shouldn't be.
    #[error("Sign-in failed: Empty credential field. Given username/email and/or password is empty.")]
    EmptyField {
        /// Is the username/email blank.
        identity: bool,
        /// Is the password blank.
        password: bool,
    },
    /// Communication with the `ReviewHub` API was successful,
    /// but the given credentials did not match an account.
    #[error("Sign-in failed: Invalid credentials. Given username/email and/or password is wrong.")]
    InvalidCredentials,
    /// The account exists but its email address has not been verified yet.
    ///
    /// Callers typically react by offering to resend the verification
    /// email. The message is the backend's own wording.
    #[error("Sign-in failed: {0}")]
    EmailNotVerified(String),
    /// The account has been deactivated by an administrator.
    #[error("Sign-in failed: {0}")]
    AccountDeactivated(String),
    /// Communication with the `ReviewHub` API was successful,
    /// but returned a [400 Bad Request]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/400") HTTP error response.
    #[error("Sign-in failed: {0}")]
    BadRequest(String),
    /// An HTTP error occurred while communicating with the `ReviewHub` API.
    ///
    /// This variant wraps a [`reqwest::Error`] and indicates that the
    /// request could not be completed due to network issues, invalid URL,
    /// timeouts, etc.
    #[error("Sign-in failed. Couldn't reach the ReviewHub API: {0}")]
    HttpError(#[from] reqwest::Error),
    /// When something unexpected was returned by the `ReviewHub` REST API.
    #[error("Sign-in failed due to an unexpected response.")]
    UnexpectedResponse,
}

impl ReviewHub {
    /// Authenticate with a combination of **username**/**email** and
    /// **password**.
    ///
    /// On success, the bearer token is automatically installed on the
    /// client and used for subsequent requests.
    ///
    /// # Example
    /// ```rust,ignore
    /// let auth = hub.login("john_doe", "password123").await?;
    ///
    /// println!("Token: {}", auth.token);
    /// ```
    pub async fn login(
        &mut self,
        identity: &str,
        password: &str,
    ) -> Result<AuthStore, LoginError> {
        if identity.is_empty() || password.is_empty() {
            return Err(LoginError::EmptyField {
                identity: identity.is_empty(),
                password: password.is_empty(),
            });
        }

        let url = self.endpoint("/api/auth/login");
        let credentials = Credentials {
            username: identity,
            password,
        };

        let response = self.request_post_json(&url, &credentials).send().await?;

        if response.status().is_success() {
            let auth_store = response
                .json::<AuthStore>()
                .await
                .map_err(|_| LoginError::UnexpectedResponse)?;

            self.set_token(&auth_store.token);

            return Ok(auth_store);
        }

        match response.status() {
            reqwest::StatusCode::UNAUTHORIZED => {
                let body = ApiErrorBody::from_response(response).await;

                // A 401 with `email_verified: false` is the unverified-email
                // case; the UI offers a resend rather than a retry.
                if body.email_verified == Some(false) {
                    return Err(LoginError::EmailNotVerified(
                        body.display("Email not verified."),
                    ));
                }

                let message = body.display("Invalid credentials");
                if message.to_lowercase().contains("deactivated") {
                    return Err(LoginError::AccountDeactivated(message));
                }

                Err(LoginError::InvalidCredentials)
            }
            reqwest::StatusCode::BAD_REQUEST => {
                let body = ApiErrorBody::from_response(response).await;
                Err(LoginError::BadRequest(
                    body.display("Username/email and password are required"),
                ))
            }
            _ => Err(LoginError::UnexpectedResponse),
        }
    }
}
