// src/auth/password.rs
//! Password hashing and verification (Argon2id)
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`), so
//! the salt and cost parameters travel with the hash and verification needs
//! nothing else.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use std::sync::Arc;
use thiserror::Error;

/// Memory cost in KiB
pub const MEMORY_COST_KIB: u32 = 19 * 1024;
pub const TIME_COST: u32 = 2;
pub const PARALLELISM: u32 = 1;

/// Plaintext behind the decoy hash used for unknown accounts
const DECOY_PLAINTEXT: &str = "decoy-password-for-unknown-accounts";

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("invalid work factor: {0}")]
    InvalidParams(String),

    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}

#[derive(Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
    decoy_hash: Arc<str>,
}

impl std::fmt::Debug for PasswordService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordService")
            .field("algorithm", &"argon2id")
            .finish()
    }
}

impl PasswordService {
    /// Production work factor
    pub fn new() -> Result<Self, PasswordError> {
        Self::with_cost(MEMORY_COST_KIB, TIME_COST, PARALLELISM)
    }

    pub fn with_cost(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let decoy_hash = argon2
            .hash_password(DECOY_PLAINTEXT.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hash(e.to_string()))?
            .to_string();

        Ok(Self {
            argon2,
            decoy_hash: decoy_hash.into(),
        })
    }

    /// Hash with this service's work factor that no real password matches.
    /// Verifying against it costs the same as verifying a stored hash.
    pub fn decoy_hash(&self) -> &str {
        &self.decoy_hash
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hash(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// `Ok(false)` on mismatch, `Err` only when the stored hash cannot be parsed
    pub fn verify(&self, hash: &str, plaintext: &str) -> Result<bool, PasswordError> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;
        Ok(self
            .argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }
}
