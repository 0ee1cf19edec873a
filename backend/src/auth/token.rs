//! Token issuance and verification
//!
//! HS256 tokens with pre-computed keys. Claims carry the user id and a
//! snapshot of the role names taken at sign-in; tokens are never stored
//! server-side, so expiry is the only invalidation.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use user_portal_shared::{Claims, Role};
use uuid::Uuid;

/// Pre-computed JWT keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
pub struct TokenKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl TokenKeys {
    /// Create new keys from the signing secret.
    /// This should be called once at startup.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token service for issuing and verifying bearer tokens
///
/// Uses pre-computed keys wrapped in Arc so cloning into handlers is
/// cheap. Construct once at startup and store in AppState.
#[derive(Clone)]
pub struct TokenService {
    keys: TokenKeys,
    expiry_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, expiry_secs: i64) -> Self {
        Self {
            keys: TokenKeys::new(secret),
            expiry_secs,
        }
    }

    /// Issue a token for a user with the given roles.
    ///
    /// `exp = iat + expiry_secs`; both timestamps are Unix seconds.
    pub fn issue(&self, user_id: Uuid, roles: &[Role]) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expiry_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            roles: roles.iter().map(|r| r.as_str().to_string()).collect(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))
    }

    /// Verify signature and expiry, returning the claims.
    ///
    /// Zero leeway, and the boundary check is the shared one: a token is
    /// invalid from its exact expiry instant, matching what the browser
    /// client computes from the same claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.keys.decoding, &validation)
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        // The library's exp check is exclusive; the contract here is
        // inclusive (now >= exp is expired), so re-check the boundary.
        if token_data.claims.is_expired_at(Utc::now().timestamp()) {
            anyhow::bail!("Invalid token: expired");
        }

        Ok(token_data.claims)
    }

    /// Token lifetime in seconds.
    #[inline]
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_secs
    }
}
