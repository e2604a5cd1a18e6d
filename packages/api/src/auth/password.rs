//! # Password hashing and verification — Argon2id
//!
//! [`PasswordHasher`] wraps an [`Argon2`] instance configured from [`PasswordSettings`]:
//!
//! - [`PasswordHasher::hash`] generates a random salt via [`OsRng`], hashes the
//!   plaintext with Argon2id, and returns a PHC-format string
//!   (e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`). That string is what the
//!   `password_hash` column of `users` stores. Two calls with the same input give
//!   different outputs.
//!
//! - [`PasswordHasher::verify`] parses a PHC string and checks the plaintext against
//!   it. The digest comparison inside `argon2` is constant-time. A malformed stored
//!   hash is a verification failure, not an error.
//!
//! [`PasswordHasher::verify_unknown`] burns one verification against a dummy hash
//! made with the configured cost, so a login for an unknown email takes about as
//! long as one with a wrong password.
//!
//! The parameters embedded in a stored hash win over the configured ones during
//! verification, so changing the configured cost does not lock out existing accounts.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::PasswordSettings;
use crate::error::HashError;

/// Argon2id hasher shared by registration and authentication.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    dummy_hash: OnceLock<String>,
}

const DUMMY_PASSWORD: &str = "chatstream-dummy-password";

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
            dummy_hash: OnceLock::new(),
        }
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

impl PasswordHasher {
    /// Build a hasher with explicit Argon2id cost parameters.
    pub fn from_settings(settings: &PasswordSettings) -> Result<Self, HashError> {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|e| HashError(format!("invalid argon2 parameters: {e}")))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            dummy_hash: OnceLock::new(),
        })
    }

    /// Hash a password. Returns a PHC-format string.
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| HashError(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a PHC-format hash string.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                return false;
            }
        };
        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Spend one verification's worth of work on a password that has no account.
    /// The result is discarded.
    pub fn verify_unknown(&self, password: &str) {
        let dummy = self
            .dummy_hash
            .get_or_init(|| self.hash(DUMMY_PASSWORD).unwrap_or_default());
        if !dummy.is_empty() {
            let _ = self.verify(password, dummy);
        }
    }

    #[cfg(test)]
    pub(crate) fn dummy_hash_ready(&self) -> bool {
        self.dummy_hash.get().is_some_and(|h| !h.is_empty())
    }
}

#[cfg(test)]
pub(crate) fn test_hasher() -> PasswordHasher {
    PasswordHasher::from_settings(&PasswordSettings {
        memory_kib: 256,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap()
}
