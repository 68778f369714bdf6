//! Authentication endpoints and records.

use chrono::NaiveDateTime;
use serde::Deserialize;

pub mod login;
pub mod logout;
pub mod password;
pub mod profile;
pub mod register;
pub mod verification;

/// Stores authentication details for a `ReviewHub` user.
///
/// The `AuthStore` struct holds the authenticated user's record and the
/// bearer token used for making authenticated requests to the `ReviewHub`
/// API. Both login and email verification return one.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthStore {
    /// The authenticated user's record.
    pub user: User,
    /// The authentication token.
    #[serde(rename = "access_token")]
    pub token: String,
}

/// A `ReviewHub` user record, as returned by the profile and auth
/// endpoints.
///
/// Timestamps are the backend's naive UTC timestamps. Fields the backend
/// may omit (or null out) are optional or defaulted, so the same record
/// type decodes profile responses, admin listings, and auth payloads.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct User {
    /// The user's unique ID.
    pub id: i64,
    /// The user's unique username.
    pub username: String,
    /// The user's email address.
    pub email: String,
    /// Optional given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Optional family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// When the account was created.
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    /// Whether the user's email address has been verified.
    #[serde(default)]
    pub email_verified: bool,
    /// When the user last signed in.
    #[serde(default)]
    pub last_login: Option<NaiveDateTime>,
    /// How many times the user has signed in.
    #[serde(default)]
    pub login_count: i64,
    /// URL of the user's avatar image.
    #[serde(default)]
    pub profile_image_url: Option<String>,
    /// Free-form profile bio.
    #[serde(default)]
    pub bio: Option<String>,
    /// Free-form location.
    #[serde(default)]
    pub location: Option<String>,
    /// Personal website URL.
    #[serde(default)]
    pub website: Option<String>,
    /// Number of reviews the user has published.
    #[serde(default)]
    pub review_count: i64,
    /// Whether the user holds the admin role.
    #[serde(default)]
    pub is_admin: bool,
    /// Whether the account is active. Only present on admin listings.
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_decodes_backend_profile_payload() {
        let raw = r#"{
            "id": 1,
            "username": "john_doe",
            "email": "john@example.com",
            "first_name": "John",
            "last_name": null,
            "created_at": "2025-08-06T12:34:56.789012",
            "email_verified": true,
            "last_login": null,
            "login_count": 3,
            "profile_image_url": null,
            "bio": "hi",
            "location": null,
            "website": null,
            "review_count": 7,
            "is_admin": false
        }"#;

        let user: User = serde_json::from_str(raw).expect("decode");
        assert_eq!(user.id, 1);
        assert_eq!(user.username, "john_doe");
        assert!(user.email_verified);
        assert_eq!(user.review_count, 7);
        assert!(user.created_at.is_some());
        assert_eq!(user.is_active, None);
    }

    #[test]
    fn user_tolerates_minimal_payload() {
        let raw = r#"{"id": 2, "username": "a", "email": "a@b.c"}"#;

        let user: User = serde_json::from_str(raw).expect("decode");
        assert!(!user.email_verified);
        assert_eq!(user.login_count, 0);
        assert!(!user.is_admin);
    }

    #[test]
    fn auth_store_decodes_login_payload() {
        let raw = r#"{
            "access_token": "tok1",
            "user": {"id": 1, "username": "john_doe", "email": "j@e.c", "email_verified": true}
        }"#;

        let auth: AuthStore = serde_json::from_str(raw).expect("decode");
        assert_eq!(auth.token, "tok1");
        assert!(auth.user.email_verified);
    }
}
