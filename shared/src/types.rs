//! Wire types shared between the backend and the browser client.
//!
//! Field names follow the public API contract (`lastName`, `phoneNumber`,
//! `url_profile`, `adress`), which predates this crate and is kept as-is
//! for client compatibility.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw sign-up request body.
///
/// Every field is optional at the wire level: presence is part of
/// validation so a request missing several fields reports all of them
/// at once instead of failing on deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignUpRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
    /// ISO date string, e.g. "2000-01-01".
    pub birthdate: Option<String>,
    pub url_profile: Option<String>,
    pub adress: Option<String>,
}

/// Validated sign-up data, produced only by [`crate::validate_sign_up`].
///
/// The email is trimmed and lowercased, the birthdate parsed, and all
/// required fields are guaranteed present. The password is still the
/// plaintext candidate; it is consumed by the hasher and never stored.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub last_name: String,
    pub phone_number: String,
    pub birthdate: NaiveDate,
    pub url_profile: Option<String>,
    pub adress: Option<String>,
}

/// Sign-in request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful sign-in response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// A user's profile as returned by the API. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub birthdate: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adress: Option<String>,
    /// Role names, e.g. `["user"]`.
    pub roles: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Token claims.
///
/// The backend signs and verifies these; the WASM client decodes them
/// without verification for display and routing only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id).
    pub sub: String,
    /// Role names snapshotted at sign-in.
    pub roles: Vec<String>,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Whether the token is expired at `now` (Unix seconds).
    /// A token is rejected from its exact expiry instant onward.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    /// Whether the claims carry the given role.
    pub fn has_role(&self, role: crate::Role) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_request_wire_names() {
        let body = r#"{
            "email": "a@b.com",
            "password": "Abcdef1#",
            "name": "A",
            "lastName": "B",
            "phoneNumber": "+51987654321",
            "birthdate": "2000-01-01"
        }"#;
        let req: SignUpRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.last_name.as_deref(), Some("B"));
        assert_eq!(req.phone_number.as_deref(), Some("+51987654321"));
        assert!(req.url_profile.is_none());
    }

    #[test]
    fn test_profile_serializes_wire_names() {
        let profile = UserProfile {
            id: Uuid::new_v4(),
            email: "a@b.com".into(),
            name: "A".into(),
            last_name: "B".into(),
            phone_number: "+51987654321".into(),
            birthdate: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            url_profile: None,
            adress: None,
            roles: vec!["user".into()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("lastName").is_some());
        assert!(json.get("phoneNumber").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("url_profile").is_none());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_claims_expiry_boundary() {
        let claims = Claims {
            sub: "id".into(),
            roles: vec![],
            iat: 0,
            exp: 100,
        };
        assert!(!claims.is_expired_at(99));
        assert!(claims.is_expired_at(100));
        assert!(claims.is_expired_at(101));
    }

    #[test]
    fn test_claims_role_lookup() {
        let claims = Claims {
            sub: "id".into(),
            roles: vec!["user".into(), "admin".into()],
            iat: 0,
            exp: 100,
        };
        assert!(claims.has_role(crate::Role::Admin));
        let claims = Claims { roles: vec!["user".into()], ..claims };
        assert!(!claims.has_role(crate::Role::Admin));
    }
}
