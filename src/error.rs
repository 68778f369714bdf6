//! Various errors module.

use serde::Deserialize;
use thiserror::Error;

pub use crate::auth::login::LoginError;
pub use crate::auth::password::{PasswordError, PolicyViolation};
pub use crate::auth::register::RegisterError;
pub use crate::auth::verification::VerificationError;

/// Error body returned by the `ReviewHub` backend.
///
/// Failure responses carry a human-readable `error` field; a few success
/// responses reuse the same shape with a `message` field instead. The
/// optional `email_verified` flag accompanies the 401 returned when a user
/// signs in before confirming their address.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct ApiErrorBody {
    /// Human-readable failure description.
    pub error: Option<String>,
    /// Human-readable status description on success-shaped bodies.
    pub message: Option<String>,
    /// Set to `false` when the failure is an unverified email address.
    pub email_verified: Option<bool>,
}

impl ApiErrorBody {
    /// Reads the error body from a response, falling back to an empty body
    /// when the payload is missing or malformed.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        response.json::<Self>().await.unwrap_or_default()
    }

    /// The backend-provided message, or a generic fallback.
    pub(crate) fn display(&self, fallback: &str) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Represents errors when interacting with the `ReviewHub` API.
///
/// This is the shared error type for plain resource fetches (products,
/// reviews, recommendations, admin listings). The auth flows have their
/// own per-operation enums, re-exported from this module, because their
/// failure modes carry flow-specific meaning.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Communication with the `ReviewHub` API was successful,
    /// but returned a [400 Bad Request]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/400") HTTP error response.
    ///
    /// The message is the backend's description of what was wrong with the
    /// request.
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// Communication with the `ReviewHub` API was successful,
    /// but returned a [401 Unauthorized]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/401") HTTP error response.
    ///
    /// The request may require an Authorization token.
    #[error("Unauthorized: The request may require an Authorization token.")]
    Unauthorized,
    /// Communication with the `ReviewHub` API was successful,
    /// but returned a [403 Forbidden]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/403") HTTP error response.
    ///
    /// The authenticated user may not have permissions for this interaction
    /// (for example, an admin endpoint reached by a non-admin account).
    #[error("Forbidden: The authenticated user may not have permissions for this interaction.")]
    Forbidden,
    /// Communication with the `ReviewHub` API was successful,
    /// but returned a [404 Not Found]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/404") HTTP error response.
    #[error("Not Found: The requested resource could not be found.")]
    NotFound,
    /// The response could not be parsed into the expected data structure.
    #[error(
        "Parse Error: Could not parse response into the expected data structure. - {0}"
    )]
    ParseError(String),
    /// The `ReviewHub` API interaction timed out or failed at the transport
    /// level. The backend may be offline.
    #[error("Unreachable: The ReviewHub API could not be reached: {0}")]
    Unreachable(String),
    /// Too many requests were sent to the API.
    ///
    /// The server is rate limiting requests. Wait before retrying.
    #[error(
        "Too Many Requests: The server is rate limiting requests. Please wait before retrying."
    )]
    TooManyRequests,
    /// Unhandled error.
    ///
    /// Usually emitted when something unexpected happened, and isn't handled
    /// correctly by this crate.
    #[error("Unhandled Error: An unexpected error occurred.")]
    Unhandled,
}

impl RequestError {
    /// Maps a non-success response to the matching variant, reading the
    /// backend's message for 400s.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        match response.status() {
            reqwest::StatusCode::BAD_REQUEST => {
                let body = ApiErrorBody::from_response(response).await;
                Self::BadRequest(body.display("Something went wrong while processing your request."))
            }
            reqwest::StatusCode::UNAUTHORIZED => Self::Unauthorized,
            reqwest::StatusCode::FORBIDDEN => Self::Forbidden,
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            reqwest::StatusCode::TOO_MANY_REQUESTS => Self::TooManyRequests,
            _ => Self::Unhandled,
        }
    }

    /// Maps a transport-level failure to the matching variant.
    pub(crate) fn from_transport(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Unreachable("Request timed out".to_string())
        } else if error.is_connect() {
            Self::Unreachable("Failed to connect to server".to_string())
        } else {
            match error.status() {
                Some(reqwest::StatusCode::UNAUTHORIZED) => Self::Unauthorized,
                Some(reqwest::StatusCode::FORBIDDEN) => Self::Forbidden,
                Some(reqwest::StatusCode::NOT_FOUND) => Self::NotFound,
                Some(reqwest::StatusCode::TOO_MANY_REQUESTS) => Self::TooManyRequests,
                _ => Self::Unhandled,
            }
        }
    }
}
