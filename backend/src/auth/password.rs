//! Password hashing using bcrypt
//!
//! Salted, cost-factored one-way hashing. The cost of 10 matches the
//! reference deployment; raising it only slows new hashes, existing
//! digests keep verifying.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. The async wrappers run the
//! work on the blocking thread pool so the runtime is never stalled.

use anyhow::Result;
use bcrypt::{hash, verify};

/// bcrypt cost factor (2^10 rounds).
const BCRYPT_COST: u32 = 10;

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password (blocking operation).
    ///
    /// Each call salts randomly, so hashing the same password twice
    /// yields different digests.
    pub fn hash(password: &str) -> Result<String> {
        hash(password, BCRYPT_COST).map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password asynchronously (non-blocking).
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a digest (blocking operation).
    pub fn verify(password: &str, digest: &str) -> Result<bool> {
        verify(password, digest).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))
    }

    /// Verify a password asynchronously (non-blocking).
    pub async fn verify_async(password: String, digest: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &digest))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}
