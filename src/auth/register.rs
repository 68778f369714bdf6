//! Account registration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ReviewHub;
use crate::auth::password::{PasswordPolicy, PolicyViolation, describe};
use crate::error::ApiErrorBody;

/// Fields submitted when creating an account.
///
/// # Example
/// ```rust,ignore
/// let receipt = hub
///     .register(&Registration {
///         username: "john_doe".to_string(),
///         email: "john@example.com".to_string(),
///         password: "Password1".to_string(),
///         first_name: Some("John".to_string()),
///         last_name: None,
///     })
///     .await?;
///
/// println!("{}", receipt.message);
/// ```
#[derive(Clone, Debug, Default, Serialize)]
pub struct Registration {
    /// Desired unique username.
    pub username: String,
    /// Email address; a verification link is sent here.
    pub email: String,
    /// Password, validated client-side against
    /// [`PasswordPolicy::registration`] before submission.
    pub password: String,
    /// Optional given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Optional family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Contains information about a successfully submitted registration.
///
/// Registration never signs the user in: the identity is only established
/// once the emailed verification link is followed.
#[derive(Clone, Debug, Deserialize)]
pub struct RegisterReceipt {
    /// The backend's status message.
    pub message: String,
    /// Whether the verification email was handed to the mailer.
    #[serde(default)]
    pub email_sent: bool,
    /// ID assigned to the pending account.
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Represents the various errors that can be obtained after a `register`
/// request.
#[derive(Error, Debug)]
pub enum RegisterError {
    /// The password failed client-side policy validation; nothing was sent
    /// to the backend.
    #[error("Registration failed: the password {}", describe(.0))]
    WeakPassword(Vec<PolicyViolation>),
    /// The requested username is already taken.
    #[error("Registration failed: {0}")]
    UsernameTaken(String),
    /// An account with this email address already exists.
    #[error("Registration failed: {0}")]
    EmailTaken(String),
    /// Communication with the `ReviewHub` API was successful,
    /// but returned a [400 Bad Request]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/400") HTTP error response.
    ///
    /// Your request may be missing fields or its content doesn't match what
    /// `ReviewHub` expects to receive.
    #[error("Registration failed: {0}")]
    BadRequest(String),
    /// An HTTP error occurred while communicating with the `ReviewHub` API.
    #[error("Registration failed. Couldn't reach the ReviewHub API: {0}")]
    HttpError(#[from] reqwest::Error),
    /// When something unexpected was returned by the `ReviewHub` REST API.
    #[error("Registration failed due to an unexpected response.")]
    UnexpectedResponse,
}

impl ReviewHub {
    /// Creates a new account.
    ///
    /// On success the backend sends a verification email; no token is
    /// issued and the client remains signed out until
    /// [`verify_email`](ReviewHub::verify_email) succeeds.
    pub async fn register(
        &self,
        registration: &Registration,
    ) -> Result<RegisterReceipt, RegisterError> {
        if let Err(violations) = PasswordPolicy::registration().validate(&registration.password) {
            return Err(RegisterError::WeakPassword(violations));
        }

        let url = self.endpoint("/api/auth/register");

        let response = self.request_post_json(&url, registration).send().await?;

        if response.status().is_success() {
            return response
                .json::<RegisterReceipt>()
                .await
                .map_err(|_| RegisterError::UnexpectedResponse);
        }

        match response.status() {
            reqwest::StatusCode::BAD_REQUEST => {
                let body = ApiErrorBody::from_response(response).await;
                let message = body.display("Something went wrong while processing your request.");

                // The backend reports duplicates as "Username already
                // exists" / "Email already exists".
                let lowered = message.to_lowercase();
                if lowered.starts_with("username") && lowered.contains("exists") {
                    Err(RegisterError::UsernameTaken(message))
                } else if lowered.starts_with("email") && lowered.contains("exists") {
                    Err(RegisterError::EmailTaken(message))
                } else {
                    Err(RegisterError::BadRequest(message))
                }
            }
            _ => Err(RegisterError::UnexpectedResponse),
        }
    }
}
