//! bcrypt-backed `PasswordHasher`.
//!
//! bcrypt is CPU bound, so hashing and verification run on Tokio's blocking
//! pool. Comparison is constant-time inside the primitive.
//!
//! bcrypt only reads the first 72 bytes of a password. Hashing refuses longer
//! input and verification treats it as a mismatch, so two passwords sharing a
//! prefix never share a hash.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::{PasswordHash, TraceId};
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Cost used in production.
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

/// Password hasher using bcrypt with a configurable cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher. Costs outside bcrypt's 4..=31 range fail at hash time.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let cost = self.cost;
        let encoded = TraceId::spawn_blocking(move || {
            bcrypt::non_truncating_hash(password.as_bytes(), cost)
        })
        .await
        .map_err(|err| PasswordHashError::hash(format!("hashing task failed: {err}")))?
        .map_err(|err| PasswordHashError::hash(err.to_string()))?;

        PasswordHash::new(encoded).map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        let outcome = TraceId::spawn_blocking(move || {
            bcrypt::non_truncating_verify(password.as_bytes(), &encoded)
        })
        .await
        .map_err(|err| PasswordHashError::verify(format!("verification task failed: {err}")))?;

        match outcome {
            Ok(matches) => Ok(matches),
            Err(bcrypt::BcryptError::Truncation(_)) => Ok(false),
            Err(err) => Err(PasswordHashError::verify(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::new(4)
    }

    #[rstest]
    #[tokio::test]
    async fn hash_is_salted_and_verifiable(hasher: BcryptPasswordHasher) {
        let first = hasher.hash("secret").await.expect("hash");
        let second = hasher.hash("secret").await.expect("hash");

        assert_ne!(first, second);
        assert_ne!(first.as_str(), "secret");
        assert!(hasher.verify("secret", &first).await.expect("verify"));
        assert!(!hasher.verify("Secret", &first).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_stored_hash_is_an_error(hasher: BcryptPasswordHasher) {
        let stored = PasswordHash::new("not-a-bcrypt-hash").expect("non-empty");
        let err = hasher
            .verify("secret", &stored)
            .await
            .expect_err("unparseable hash");
        assert!(matches!(err, PasswordHashError::Verify { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn passwords_past_bcrypt_limit_are_not_truncated(hasher: BcryptPasswordHasher) {
        let prefix = "p".repeat(72);
        let longer = format!("{prefix}-and-more");

        let err = hasher.hash(&longer).await.expect_err("too long to hash");
        assert!(matches!(err, PasswordHashError::Hash { .. }));

        let stored = hasher.hash(&prefix).await.expect("hash at the limit");
        assert!(hasher.verify(&prefix, &stored).await.expect("verify"));
        assert!(!hasher.verify(&longer, &stored).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_cost_is_a_hash_error() {
        let err = BcryptPasswordHasher::new(2)
            .hash("secret")
            .await
            .expect_err("cost below minimum");
        assert!(matches!(err, PasswordHashError::Hash { .. }));
    }
}
