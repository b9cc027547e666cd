//! Salted password hashing with Argon2id

use anyhow::Result;
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version,
    password_hash::SaltString,
};
use tracing::warn;

/// Hashes new passwords and checks candidates against stored PHC strings
#[derive(Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Hasher using the recommended Argon2id parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit cost parameters
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
            .to_string();

        Ok(password_hash)
    }

    /// Check a password against a stored hash
    ///
    /// The cost parameters are read from the stored hash. A hash that cannot
    /// be parsed never matches.
    pub fn verify(&self, password: &str, password_hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(password_hash) {
            Ok(parsed_hash) => parsed_hash,
            Err(e) => {
                warn!("Stored password hash is malformed: {}", e);
                return false;
            }
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// [`hash`](Self::hash) on the blocking thread pool
    pub async fn hash_async(&self, password: &str) -> Result<String> {
        let hasher = self.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Password hashing task failed: {}", e))?
    }

    /// [`verify`](Self::verify) on the blocking thread pool
    ///
    /// Argon2 verification takes tens of milliseconds with the default
    /// parameters and must not run on a Tokio worker thread.
    pub async fn verify_async(&self, password: &str, password_hash: &str) -> Result<bool> {
        let hasher = self.clone();
        let password = password.to_string();
        let password_hash = password_hash.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Password verification task failed: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::with_params(Params::new(1024, 1, 1, None).unwrap())
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let hash = hasher.hash("correct horse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("correct horse"));
        assert!(hasher.verify("correct horse", &hash));
        assert!(!hasher.verify("wrong horse", &hash));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = hasher();
        let first = hasher.hash("same-password").unwrap();
        let second = hasher.hash("same-password").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("same-password", &first));
        assert!(hasher.verify("same-password", &second));
    }

    #[test]
    fn test_verify_uses_parameters_from_stored_hash() {
        let hash = hasher().hash("portable").unwrap();
        assert!(PasswordHasher::new().verify("portable", &hash));
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        assert!(!hasher().verify("anything", "not-a-phc-string"));
        assert!(!hasher().verify("", ""));
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let hasher = hasher();
        let hash = hasher.hash_async("off the runtime").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_async("off the runtime", &hash).await.unwrap());
        assert!(!hasher.verify_async("on the runtime", &hash).await.unwrap());
        assert!(!hasher.verify_async("anything", "not-a-phc-string").await.unwrap());
    }
}
