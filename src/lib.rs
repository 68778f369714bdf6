//! `reviewhub-rs` is a Rust client for the `ReviewHub` REST API.
//!
//! It exposes two layers:
//!
//! - [`ReviewHub`], a thin gateway with one typed method per backend
//!   endpoint. It attaches the bearer token to outgoing requests and maps
//!   non-success responses to typed errors; it performs no retries and keeps
//!   no state beyond the token itself.
//! - [`Session`], the authentication coordinator. It owns a [`ReviewHub`]
//!   client plus a persistent [`TokenStore`], restores the session at
//!   startup, and runs the login/register/verify/reset flows with the
//!   loading/error bookkeeping a front end needs.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::error::Error;
//!
//! use reviewhub_rs::{FileTokenStore, ReviewHub, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn Error>> {
//!     let client = ReviewHub::new("http://localhost:5000");
//!     let mut session = Session::new(client, FileTokenStore::new("/tmp/reviewhub-token"));
//!
//!     // Restore a previous session, if a stored token is still valid.
//!     session.bootstrap().await;
//!
//!     if !session.is_authenticated() {
//!         session.login("john_doe", "password123").await?;
//!     }
//!
//!     let page = session
//!         .client()
//!         .product_reviews(42)
//!         .per_page(10)
//!         .sort_by("most_helpful")
//!         .call()
//!         .await?;
//!
//!     for review in page.reviews {
//!         println!("{} — {}", review.rating, review.content);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(dead_code)]

pub use auth::{AuthStore, User};
pub use error::*;
use reqwest::RequestBuilder;
pub use reqwest::multipart::{Form, Part};
use serde::Serialize;
pub use session::{Access, Session, SessionState, VerificationStatus};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod error;
pub mod session;
pub mod store;

/// Environment variable read by [`ReviewHub::from_env`].
pub const API_URL_ENV: &str = "REVIEWHUB_API_URL";

/// Environment variable read by [`demo_credentials`].
pub const DEMO_CREDENTIALS_ENV: &str = "REVIEWHUB_DEMO_CREDENTIALS";

/// Returns the development-only demo credentials, if the environment
/// provides them.
///
/// Deployments that want a "demo account" hint on their sign-in screen set
/// `REVIEWHUB_DEMO_CREDENTIALS` to `username:password`. Production builds
/// leave the variable unset and get `None`.
#[must_use]
pub fn demo_credentials() -> Option<(String, String)> {
    let raw = std::env::var(DEMO_CREDENTIALS_ENV).ok()?;
    let (username, password) = raw.split_once(':')?;

    if username.is_empty() || password.is_empty() {
        return None;
    }

    Some((username.to_string(), password.to_string()))
}

/// A `ReviewHub` client for sending requests to a `ReviewHub` backend.
///
/// The client holds the base URL, an optional bearer token, and the
/// underlying `reqwest` client. The `Debug` implementation redacts the
/// token to prevent accidental exposure in logs.
///
/// Most applications wrap the client in a [`Session`] rather than driving
/// the auth endpoints directly; the catalog and admin endpoints are plain
/// methods on the client itself.
///
/// # Example
/// ```rust,ignore
/// use reviewhub_rs::ReviewHub;
///
/// let mut hub = ReviewHub::new("http://localhost:5000");
/// let auth = hub.login("john_doe", "password123").await?;
/// println!("signed in as {}", auth.user.username);
/// ```
#[derive(Clone)]
pub struct ReviewHub {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
    pub(crate) http: reqwest::Client,
}

impl std::fmt::Debug for ReviewHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewHub")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***REDACTED***"))
            .field("http", &"Client")
            .finish()
    }
}

impl ReviewHub {
    /// Creates a new `ReviewHub` client for the given backend URL.
    ///
    /// # Example
    /// ```rust
    /// use reviewhub_rs::ReviewHub;
    ///
    /// let hub = ReviewHub::new("http://localhost:5000");
    /// assert_eq!(hub.base_url(), "http://localhost:5000");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the provided `base_url` is not an `http://` or `https://`
    /// URL.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self::new_with_client(base_url, client)
    }

    /// Creates a new `ReviewHub` client with a custom reqwest client.
    ///
    /// # Example
    /// ```rust
    /// use std::time::Duration;
    ///
    /// use reviewhub_rs::ReviewHub;
    ///
    /// let http = reqwest::Client::builder()
    ///     .timeout(Duration::from_secs(60))
    ///     .build()
    ///     .expect("Failed to build client");
    ///
    /// let hub = ReviewHub::new_with_client("http://localhost:5000", http);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the provided `base_url` is not an `http://` or `https://`
    /// URL.
    #[must_use]
    pub fn new_with_client(base_url: &str, client: reqwest::Client) -> Self {
        let trimmed_url = base_url.trim_end_matches('/');
        assert!(
            trimmed_url.starts_with("http://") || trimmed_url.starts_with("https://"),
            "Invalid base_url: must start with http:// or https://"
        );

        Self {
            base_url: trimmed_url.to_string(),
            token: None,
            http: client,
        }
    }

    /// Creates a client from the `REVIEWHUB_API_URL` environment variable.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let base_url = std::env::var(API_URL_ENV)?;
        Ok(Self::new(&base_url))
    }

    /// Retrieves the current bearer token, if the client is authenticated.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token.clone()
    }

    /// Installs a bearer token for subsequent requests.
    ///
    /// Normally called by [`Session`]; useful directly when the embedding
    /// application manages token persistence itself.
    pub fn set_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    /// Removes the bearer token; subsequent requests are anonymous.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Returns the base URL of the `ReviewHub` backend.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl ReviewHub {
    /// Adds the authorization token to the request, if available.
    ///
    /// Attaches the bearer token to the provided `RequestBuilder` when the
    /// client is authenticated. Anonymous requests pass through unchanged.
    pub(crate) fn with_authorization_token(
        &self,
        request_builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        if let Some(token) = self.token.as_ref() {
            request_builder.bearer_auth(token)
        } else {
            request_builder
        }
    }

    /// Creates a GET request builder for the specified endpoint.
    ///
    /// Adds an `Accept: application/json` header, attaches query parameters
    /// if provided, and adds the authorization token if available.
    pub(crate) fn request_get(
        &self,
        endpoint: &str,
        params: Option<Vec<(&str, &str)>>,
    ) -> RequestBuilder {
        let mut request_builder = self.http.get(endpoint).header("Accept", "application/json");

        if let Some(params) = params {
            request_builder = request_builder.query(&params);
        }

        self.with_authorization_token(request_builder)
    }

    /// Creates a POST request builder for the specified endpoint.
    pub(crate) fn request_post(&self, endpoint: &str) -> RequestBuilder {
        let request_builder = self.http.post(endpoint);
        self.with_authorization_token(request_builder)
    }

    /// Creates a POST request builder with a JSON body for the specified
    /// endpoint.
    pub(crate) fn request_post_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> RequestBuilder {
        let request_builder = self.http.post(endpoint).json(params);
        self.with_authorization_token(request_builder)
    }

    /// Creates a PUT request builder with a JSON body for the specified
    /// endpoint.
    pub(crate) fn request_put_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> RequestBuilder {
        let request_builder = self.http.put(endpoint).json(params);
        self.with_authorization_token(request_builder)
    }

    /// Creates a POST request builder with a multipart form body for the
    /// specified endpoint.
    pub(crate) fn request_post_form(&self, endpoint: &str, form: Form) -> RequestBuilder {
        let request_builder = self.http.post(endpoint).multipart(form);
        self.with_authorization_token(request_builder)
    }

    /// Creates a DELETE request builder for the specified endpoint.
    pub(crate) fn request_delete(&self, endpoint: &str) -> RequestBuilder {
        let request_builder = self.http.delete(endpoint);
        self.with_authorization_token(request_builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let hub = ReviewHub::new("http://localhost:5000/");
        assert_eq!(hub.base_url(), "http://localhost:5000");
        assert_eq!(hub.endpoint("/api/auth/login"), "http://localhost:5000/api/auth/login");
    }

    #[test]
    #[should_panic(expected = "Invalid base_url")]
    fn rejects_non_http_url() {
        let _ = ReviewHub::new("ftp://localhost:5000");
    }

    #[test]
    fn debug_redacts_token() {
        let mut hub = ReviewHub::new("http://localhost:5000");
        hub.set_token("secret-token");

        let rendered = format!("{hub:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn demo_credentials_requires_both_halves() {
        std::env::set_var(DEMO_CREDENTIALS_ENV, "john_doe:password123");
        assert_eq!(
            demo_credentials(),
            Some(("john_doe".to_string(), "password123".to_string()))
        );

        std::env::set_var(DEMO_CREDENTIALS_ENV, "missing-separator");
        assert_eq!(demo_credentials(), None);

        std::env::remove_var(DEMO_CREDENTIALS_ENV);
        assert_eq!(demo_credentials(), None);
    }
}
