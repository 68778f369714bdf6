//! Password flows: forgot, reset, change — and the client-side password
//! policy applied before submission.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::ReviewHub;
use crate::error::ApiErrorBody;

/// Client-side password rules applied before a password reaches the
/// backend.
///
/// This is advisory pre-validation: the backend remains the authority and
/// may reject a password for other reasons. Registration requires length,
/// case, and digit rules; the reset flow additionally requires a symbol.
///
/// # Example
/// ```rust
/// use reviewhub_rs::auth::password::PasswordPolicy;
///
/// assert!(PasswordPolicy::reset().validate("Abcdef1!").is_ok());
/// assert!(PasswordPolicy::registration().validate("short1").is_err());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PasswordPolicy {
    require_symbol: bool,
}

impl PasswordPolicy {
    /// Symbols accepted by [`PolicyViolation::MissingSymbol`]'s check.
    pub const SYMBOLS: &'static str = "!@#$%^&*(),.?\":{}|<>";

    /// Minimum accepted password length.
    pub const MIN_LENGTH: usize = 8;

    /// The policy applied on registration: length, lowercase, uppercase,
    /// digit.
    #[must_use]
    pub const fn registration() -> Self {
        Self {
            require_symbol: false,
        }
    }

    /// The policy applied on password reset: registration rules plus one
    /// symbol from [`Self::SYMBOLS`].
    #[must_use]
    pub const fn reset() -> Self {
        Self {
            require_symbol: true,
        }
    }

    /// Checks a candidate password, reporting every violated rule at once.
    pub fn validate(&self, candidate: &str) -> Result<(), Vec<PolicyViolation>> {
        let mut violations = Vec::new();

        if candidate.chars().count() < Self::MIN_LENGTH {
            violations.push(PolicyViolation::TooShort);
        }
        if !candidate.chars().any(|c| c.is_ascii_lowercase()) {
            violations.push(PolicyViolation::MissingLowercase);
        }
        if !candidate.chars().any(|c| c.is_ascii_uppercase()) {
            violations.push(PolicyViolation::MissingUppercase);
        }
        if !candidate.chars().any(|c| c.is_ascii_digit()) {
            violations.push(PolicyViolation::MissingDigit);
        }
        if self.require_symbol && !candidate.chars().any(|c| Self::SYMBOLS.contains(c)) {
            violations.push(PolicyViolation::MissingSymbol);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// A single violated password rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyViolation {
    /// Shorter than [`PasswordPolicy::MIN_LENGTH`] characters.
    TooShort,
    /// No lowercase letter.
    MissingLowercase,
    /// No uppercase letter.
    MissingUppercase,
    /// No digit.
    MissingDigit,
    /// No symbol from [`PasswordPolicy::SYMBOLS`].
    MissingSymbol,
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::TooShort => "must be at least 8 characters long",
            Self::MissingLowercase => "must contain a lowercase letter",
            Self::MissingUppercase => "must contain an uppercase letter",
            Self::MissingDigit => "must contain a digit",
            Self::MissingSymbol => "must contain a special character",
        };
        f.write_str(text)
    }
}

pub(crate) fn describe(violations: &[PolicyViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Represents the errors that can occur during the password flows.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// The new password failed client-side policy validation; nothing was
    /// sent to the backend.
    #[error("Password rejected: {}", describe(.0))]
    WeakPassword(Vec<PolicyViolation>),
    /// The reset token does not match any pending reset request.
    #[error("Password reset failed: the reset token is invalid.")]
    InvalidToken,
    /// The reset token matched but has expired.
    #[error("Password reset failed: the reset token has expired.")]
    ExpiredToken,
    /// The current password given to a change-password request was wrong.
    #[error("Password change failed: {0}")]
    WrongCurrentPassword(String),
    /// The request requires a signed-in user.
    #[error("The request requires an Authorization token.")]
    Unauthorized,
    /// Communication with the `ReviewHub` API was successful,
    /// but returned a [400 Bad Request]("https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/400") HTTP error response.
    #[error("Request failed: {0}")]
    BadRequest(String),
    /// An HTTP error occurred while communicating with the `ReviewHub` API.
    #[error("Couldn't reach the ReviewHub API: {0}")]
    HttpError(#[from] reqwest::Error),
    /// When something unexpected was returned by the `ReviewHub` REST API.
    #[error("Request failed due to an unexpected response.")]
    UnexpectedResponse,
}

#[derive(serde::Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: Option<String>,
}

impl ReviewHub {
    /// Requests a password-reset email for the given address.
    ///
    /// The backend answers with the same generic message whether or not an
    /// account exists, to avoid account enumeration; that message is
    /// returned on success.
    pub async fn forgot_password(&self, email: &str) -> Result<String, PasswordError> {
        let url = self.endpoint("/api/auth/forgot-password");
        let body: HashMap<&str, &str> = HashMap::from([("email", email)]);

        let response = self.request_post_json(&url, &body).send().await?;

        if response.status().is_success() {
            let body = response
                .json::<MessageResponse>()
                .await
                .map_err(|_| PasswordError::UnexpectedResponse)?;

            return Ok(body.message.unwrap_or_else(|| {
                "If an account with this email exists, a password reset link has been sent."
                    .to_string()
            }));
        }

        match response.status() {
            reqwest::StatusCode::BAD_REQUEST => {
                let body = ApiErrorBody::from_response(response).await;
                Err(PasswordError::BadRequest(body.display("Email is required")))
            }
            _ => Err(PasswordError::UnexpectedResponse),
        }
    }

    /// Sets a new password using a reset token from the emailed link.
    ///
    /// Validates the new password against [`PasswordPolicy::reset`] before
    /// submission. Resetting does not sign the user in.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), PasswordError> {
        if let Err(violations) = PasswordPolicy::reset().validate(new_password) {
            return Err(PasswordError::WeakPassword(violations));
        }

        let url = self.endpoint("/api/auth/reset-password");
        let body: HashMap<&str, &str> =
            HashMap::from([("token", token), ("password", new_password)]);

        let response = self.request_post_json(&url, &body).send().await?;

        if response.status().is_success() {
            return Ok(());
        }

        match response.status() {
            reqwest::StatusCode::BAD_REQUEST => {
                let body = ApiErrorBody::from_response(response).await;
                let message = body.display("Invalid reset token");

                if message.to_lowercase().contains("expired") {
                    Err(PasswordError::ExpiredToken)
                } else if message.to_lowercase().contains("token") {
                    Err(PasswordError::InvalidToken)
                } else {
                    Err(PasswordError::BadRequest(message))
                }
            }
            _ => Err(PasswordError::UnexpectedResponse),
        }
    }

    /// Changes the signed-in user's password.
    ///
    /// The new password is validated against [`PasswordPolicy::registration`]
    /// before submission.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), PasswordError> {
        if let Err(violations) = PasswordPolicy::registration().validate(new_password) {
            return Err(PasswordError::WeakPassword(violations));
        }

        // This endpoint predates the /api/auth namespace and still lives at
        // the top level.
        let url = self.endpoint("/api/change-password");
        let body: HashMap<&str, &str> = HashMap::from([
            ("current_password", current_password),
            ("new_password", new_password),
        ]);

        let response = self.request_post_json(&url, &body).send().await?;

        if response.status().is_success() {
            return Ok(());
        }

        match response.status() {
            reqwest::StatusCode::BAD_REQUEST => {
                let body = ApiErrorBody::from_response(response).await;
                let message = body.display("Current password is incorrect");

                if message.to_lowercase().contains("current password") {
                    Err(PasswordError::WrongCurrentPassword(message))
                } else {
                    Err(PasswordError::BadRequest(message))
                }
            }
            reqwest::StatusCode::UNAUTHORIZED => Err(PasswordError::Unauthorized),
            _ => Err(PasswordError::UnexpectedResponse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short1() {
        let violations = PasswordPolicy::registration()
            .validate("short1")
            .expect_err("should fail");

        assert!(violations.contains(&PolicyViolation::TooShort));
        assert!(violations.contains(&PolicyViolation::MissingUppercase));
        assert!(!violations.contains(&PolicyViolation::MissingDigit));
    }

    #[test]
    fn accepts_abcdef1_bang_everywhere() {
        assert!(PasswordPolicy::registration().validate("Abcdef1!").is_ok());
        assert!(PasswordPolicy::reset().validate("Abcdef1!").is_ok());
    }

    #[test]
    fn reset_policy_requires_a_symbol() {
        let violations = PasswordPolicy::reset()
            .validate("Abcdefg1")
            .expect_err("should fail");

        assert_eq!(violations, vec![PolicyViolation::MissingSymbol]);
        assert!(PasswordPolicy::registration().validate("Abcdefg1").is_ok());
    }

    #[test]
    fn reports_every_violation_at_once() {
        let violations = PasswordPolicy::reset().validate("").expect_err("should fail");
        assert_eq!(violations.len(), 5);
    }
}
