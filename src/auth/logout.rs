//! Sign-out notification.

use tracing::debug;

use crate::ReviewHub;

impl ReviewHub {
    /// Notifies the backend that the session is over and drops the local
    /// token.
    ///
    /// The backend's tokens are stateless, so this call is strictly
    /// best-effort: any failure is logged and ignored, and the local token
    /// is cleared regardless. [`Session::logout`](crate::Session::logout)
    /// performs the full local teardown on top of this.
    pub async fn logout(&mut self) {
        let url = self.endpoint("/api/auth/logout");

        match self.request_post(&url).send().await {
            Ok(response) if !response.status().is_success() => {
                debug!(status = %response.status(), "logout request rejected by backend");
            }
            Err(error) => {
                debug!(%error, "logout request failed");
            }
            Ok(_) => {}
        }

        self.clear_token();
    }
}
