//! The authentication session: bootstrap, sign-in flows, and the derived
//! flags route guards read.
//!
//! [`Session`] owns a [`ReviewHub`] client and a [`TokenStore`] and is the
//! sole writer of both the persisted token and the current user identity.
//! Every action follows the same shape: clear the previous error, mark the
//! session busy, call the gateway, apply the success effect, record the
//! failure message otherwise, and always clear the busy flag at the end.
//!
//! Actions take `&mut self`, so the borrow checker enforces what the web
//! front end had to enforce by disabling submit buttons: one auth action
//! at a time.

use tracing::debug;

use crate::auth::login::LoginError;
use crate::auth::password::PasswordError;
use crate::auth::profile::ProfileUpdate;
use crate::auth::register::{RegisterError, RegisterReceipt, Registration};
use crate::auth::verification::{EmailVerification, VerificationError};
use crate::error::RequestError;
use crate::store::TokenStore;
use crate::{ReviewHub, User};

/// Bootstrap progress.
///
/// The session starts in `Checking` and transitions to `Resolved` exactly
/// once, when [`Session::bootstrap`] completes. Consumers must treat
/// `Checking` as "auth state unknown" and neither redirect nor gate until
/// it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Startup restore has not finished yet.
    Checking,
    /// Startup restore finished; the identity (or its absence) is final
    /// until the next auth action.
    Resolved,
}

/// Outcome of the most recent verification-related action.
///
/// Transient UI state; never persisted across restarts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerificationStatus {
    /// No verification-related action has run.
    #[default]
    None,
    /// Registration succeeded; a verification email is on its way.
    Pending,
    /// The email address was verified.
    Verified,
    /// The last verification attempt failed.
    Failed,
    /// A fresh verification email was requested.
    Resent,
}

/// What a route guard should do with the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Bootstrap has not resolved; render nothing, redirect nowhere.
    Unknown,
    /// No user is signed in.
    Anonymous,
    /// A user is signed in but their email is unverified.
    Unverified,
    /// A user is signed in with a verified email.
    Verified,
}

/// The authentication coordinator.
///
/// # Example
/// ```rust,ignore
/// let mut session = Session::new(ReviewHub::new(url), MemoryTokenStore::new());
/// session.bootstrap().await;
///
/// match session.access() {
///     Access::Unknown => unreachable!("bootstrap resolved"),
///     Access::Anonymous => show_sign_in(),
///     Access::Unverified => prompt_for_verification(),
///     Access::Verified => show_app(),
/// }
/// ```
pub struct Session {
    client: ReviewHub,
    store: Box<dyn TokenStore + Send>,
    state: SessionState,
    user: Option<User>,
    verification: VerificationStatus,
    busy: bool,
    last_error: Option<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("user", &self.user.as_ref().map(|u| u.username.as_str()))
            .field("verification", &self.verification)
            .field("busy", &self.busy)
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl Session {
    /// Creates a session around a client and a token store.
    ///
    /// The session starts in [`SessionState::Checking`]; call
    /// [`bootstrap`](Self::bootstrap) once at startup.
    pub fn new(client: ReviewHub, store: impl TokenStore + Send + 'static) -> Self {
        Self {
            client,
            store: Box::new(store),
            state: SessionState::Checking,
            user: None,
            verification: VerificationStatus::default(),
            busy: false,
            last_error: None,
        }
    }

    /// The underlying gateway client, for catalog and admin requests.
    #[must_use]
    pub fn client(&self) -> &ReviewHub {
        &self.client
    }

    /// Current bootstrap state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether a user identity is present. Pure projection of
    /// [`user`](Self::user); never stored separately.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Whether the signed-in user's email is verified. `false` when
    /// signed out.
    #[must_use]
    pub fn is_email_verified(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.email_verified)
    }

    /// Outcome of the most recent verification-related action.
    #[must_use]
    pub const fn verification(&self) -> VerificationStatus {
        self.verification
    }

    /// Whether an auth action is currently in flight.
    ///
    /// This is deliberately separate from [`state`](Self::state): a route
    /// guard waits on the bootstrap state, never on an unrelated action
    /// spinner.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// The message of the most recently failed action, until the next
    /// action starts or [`clear_error`](Self::clear_error) is called.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Clears the recorded error message.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// The route-guard projection of the session.
    #[must_use]
    pub fn access(&self) -> Access {
        match self.state {
            SessionState::Checking => Access::Unknown,
            SessionState::Resolved => match &self.user {
                None => Access::Anonymous,
                Some(user) if user.email_verified => Access::Verified,
                Some(_) => Access::Unverified,
            },
        }
    }

    fn begin(&mut self) {
        self.last_error = None;
        self.busy = true;
    }

    fn succeed(&mut self) {
        self.busy = false;
    }

    fn fail(&mut self, error: &impl std::fmt::Display) {
        self.last_error = Some(error.to_string());
        self.busy = false;
    }
}

impl Session {
    /// Restores the session from the token store, once per process.
    ///
    /// With no stored token this resolves immediately, without touching
    /// the network. With one, the profile endpoint decides: success
    /// hydrates the identity, any failure discards the token from both
    /// the store and the client, leaving a state identical to never
    /// having had a token. Subsequent calls are no-ops.
    pub async fn bootstrap(&mut self) {
        if self.state == SessionState::Resolved {
            return;
        }

        let Some(token) = self.store.get() else {
            self.state = SessionState::Resolved;
            return;
        };

        self.client.set_token(&token);

        match self.client.get_profile().await {
            Ok(user) => {
                self.user = Some(user);
            }
            Err(error) => {
                // The token invalidation here is the only automatic
                // corrective action in the whole session lifecycle.
                debug!(%error, "stored token rejected during bootstrap; clearing it");
                self.store.clear();
                self.client.clear_token();
            }
        }

        self.state = SessionState::Resolved;
    }

    /// Signs in with a username/email and password.
    ///
    /// On success the token is persisted and the identity set. On
    /// [`LoginError::EmailNotVerified`] callers typically offer
    /// [`resend_verification`](Self::resend_verification).
    pub async fn login(&mut self, identity: &str, password: &str) -> Result<(), LoginError> {
        self.begin();

        match self.client.login(identity, password).await {
            Ok(auth) => {
                self.store.set(&auth.token);
                self.user = Some(auth.user);
                self.succeed();
                Ok(())
            }
            Err(error) => {
                self.fail(&error);
                Err(error)
            }
        }
    }

    /// Creates an account.
    ///
    /// Never stores a token or sets an identity, whatever the backend
    /// returns: the session stays signed out until the emailed link is
    /// verified. On success the verification status becomes
    /// [`VerificationStatus::Pending`].
    pub async fn register(
        &mut self,
        registration: &Registration,
    ) -> Result<RegisterReceipt, RegisterError> {
        self.begin();

        match self.client.register(registration).await {
            Ok(receipt) => {
                self.verification = VerificationStatus::Pending;
                self.succeed();
                Ok(receipt)
            }
            Err(error) => {
                self.fail(&error);
                Err(error)
            }
        }
    }

    /// Confirms an email address with the token from the emailed link.
    ///
    /// First-time verification signs the user in: the issued token is
    /// persisted and the identity set. Failure marks the verification
    /// status [`VerificationStatus::Failed`] and leaves the session
    /// signed out.
    pub async fn verify_email(&mut self, token: &str) -> Result<(), VerificationError> {
        self.begin();

        match self.client.verify_email(token).await {
            Ok(EmailVerification::SignedIn(auth)) => {
                self.store.set(&auth.token);
                self.user = Some(auth.user);
                self.verification = VerificationStatus::Verified;
                self.succeed();
                Ok(())
            }
            Ok(EmailVerification::AlreadyVerified) => {
                self.verification = VerificationStatus::Verified;
                self.succeed();
                Ok(())
            }
            Err(error) => {
                self.verification = VerificationStatus::Failed;
                self.fail(&error);
                Err(error)
            }
        }
    }

    /// Requests a fresh verification email.
    pub async fn resend_verification(&mut self, email: &str) -> Result<(), VerificationError> {
        self.begin();

        match self.client.resend_verification(email).await {
            Ok(()) => {
                self.verification = VerificationStatus::Resent;
                self.succeed();
                Ok(())
            }
            Err(error) => {
                self.fail(&error);
                Err(error)
            }
        }
    }

    /// Requests a password-reset email. Returns the backend's generic
    /// message, which is identical whether or not the account exists.
    pub async fn forgot_password(&mut self, email: &str) -> Result<String, PasswordError> {
        self.begin();

        match self.client.forgot_password(email).await {
            Ok(message) => {
                self.succeed();
                Ok(message)
            }
            Err(error) => {
                self.fail(&error);
                Err(error)
            }
        }
    }

    /// Sets a new password using an emailed reset token.
    ///
    /// Does not sign the user in; they sign in with the new password.
    pub async fn reset_password(
        &mut self,
        token: &str,
        new_password: &str,
    ) -> Result<(), PasswordError> {
        self.begin();

        match self.client.reset_password(token, new_password).await {
            Ok(()) => {
                self.succeed();
                Ok(())
            }
            Err(error) => {
                self.fail(&error);
                Err(error)
            }
        }
    }

    /// Updates the signed-in user's profile, replacing the held identity
    /// with the server's view of the record.
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> Result<(), RequestError> {
        self.begin();

        match self.client.update_profile(update).await {
            Ok(user) => {
                self.user = Some(user);
                self.succeed();
                Ok(())
            }
            Err(error) => {
                self.fail(&error);
                Err(error)
            }
        }
    }

    /// Changes the signed-in user's password.
    pub async fn change_password(
        &mut self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), PasswordError> {
        self.begin();

        match self
            .client
            .change_password(current_password, new_password)
            .await
        {
            Ok(()) => {
                self.succeed();
                Ok(())
            }
            Err(error) => {
                self.fail(&error);
                Err(error)
            }
        }
    }

    /// Signs out.
    ///
    /// The local teardown is unconditional: token, identity, verification
    /// status, and error state are cleared even when the backend call
    /// fails. A request already in flight is not cancelled; it simply no
    /// longer has a session to come home to.
    pub async fn logout(&mut self) {
        self.begin();

        self.client.logout().await;

        self.store.clear();
        self.user = None;
        self.verification = VerificationStatus::None;
        self.last_error = None;
        self.busy = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTokenStore;

    fn session() -> Session {
        Session::new(
            ReviewHub::new("http://localhost:5000"),
            MemoryTokenStore::new(),
        )
    }

    #[test]
    fn new_session_is_checking_and_unknown() {
        let session = session();

        assert_eq!(session.state(), SessionState::Checking);
        assert_eq!(session.access(), Access::Unknown);
        assert!(!session.is_authenticated());
        assert!(!session.is_email_verified());
        assert!(!session.is_busy());
        assert_eq!(session.verification(), VerificationStatus::None);
    }

    #[tokio::test]
    async fn bootstrap_without_token_resolves_anonymous() {
        let mut session = session();
        session.bootstrap().await;

        assert_eq!(session.state(), SessionState::Resolved);
        assert_eq!(session.access(), Access::Anonymous);
        assert!(session.client().token().is_none());
    }

    #[test]
    fn clear_error_resets_the_message() {
        let mut session = session();
        session.last_error = Some("boom".to_string());

        session.clear_error();
        assert_eq!(session.last_error(), None);
    }

    #[test]
    fn access_tracks_identity_and_verification() {
        let mut session = session();
        session.state = SessionState::Resolved;
        assert_eq!(session.access(), Access::Anonymous);

        session.user = Some(User {
            id: 1,
            username: "john_doe".to_string(),
            email: "john@example.com".to_string(),
            email_verified: false,
            ..User::default()
        });
        assert_eq!(session.access(), Access::Unverified);
        assert!(session.is_authenticated());
        assert!(!session.is_email_verified());

        session.user.as_mut().expect("user").email_verified = true;
        assert_eq!(session.access(), Access::Verified);
        assert!(session.is_email_verified());
    }
}
