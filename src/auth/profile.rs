//! Fetching and updating the signed-in user's profile.

use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::{ReviewHub, User};

/// Partial profile update. Only the fields set to `Some` are submitted;
/// the backend ignores everything else.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProfileUpdate {
    /// New given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New bio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// New location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// New website URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Deserialize)]
struct ProfileResponse {
    user: User,
}

impl ReviewHub {
    /// Fetches the signed-in user's profile.
    ///
    /// This is the call the session bootstrap uses to decide whether a
    /// stored token is still valid: an `Unauthorized` result means the
    /// token is dead.
    pub async fn get_profile(&self) -> Result<User, RequestError> {
        let url = self.endpoint("/api/auth/profile");

        let response = self
            .request_get(&url, None)
            .send()
            .await
            .map_err(|error| RequestError::from_transport(&error))?;

        if response.status().is_success() {
            let payload = response
                .json::<ProfileResponse>()
                .await
                .map_err(|error| RequestError::ParseError(error.to_string()))?;

            return Ok(payload.user);
        }

        Err(RequestError::from_response(response).await)
    }

    /// Updates the signed-in user's profile and returns the server's view
    /// of the updated record.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, RequestError> {
        let url = self.endpoint("/api/auth/profile");

        let response = self
            .request_put_json(&url, update)
            .send()
            .await
            .map_err(|error| RequestError::from_transport(&error))?;

        if response.status().is_success() {
            let payload = response
                .json::<ProfileResponse>()
                .await
                .map_err(|error| RequestError::ParseError(error.to_string()))?;

            return Ok(payload.user);
        }

        Err(RequestError::from_response(response).await)
    }
}
