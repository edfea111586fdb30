//! Password hashing with bcrypt.
//!
//! Hashing is CPU bound, so both operations run on the blocking pool.

use crate::config::BCRYPT_COST_RANGE;
use crate::error::AppResult;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// `cost` is clamped to the range bcrypt accepts.
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(*BCRYPT_COST_RANGE.start(), *BCRYPT_COST_RANGE.end()),
        }
    }

    pub async fn hash(&self, password: &str) -> AppResult<String> {
        let password = password.to_owned();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hashed)
    }

    /// Returns `false` for a wrong password and for a malformed stored hash.
    pub async fn verify(&self, password: &str, hash: &str) -> AppResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await?
            .unwrap_or(false);
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("qwerty").await.unwrap();
        assert_ne!(hash, "qwerty");
        assert!(hasher.verify("qwerty", &hash).await.unwrap());
        assert!(!hasher.verify("qwertz", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_against_garbage_hash() {
        let hasher = PasswordHasher::new(4);
        assert!(!hasher.verify("qwerty", "not-a-hash").await.unwrap());
    }

    #[tokio::test]
    async fn test_cost_clamped_to_bcrypt_range() {
        assert_eq!(PasswordHasher::new(40).cost, 31);

        let hasher = PasswordHasher::new(0);
        assert_eq!(hasher.cost, 4);
        let hash = hasher.hash("qwerty").await.unwrap();
        assert!(hasher.verify("qwerty", &hash).await.unwrap());
    }
}
