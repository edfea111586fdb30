//! Token and password hashing configuration.

use serde::Deserialize;

/// Development signing secret, only suitable for local runs.
pub const DEFAULT_JWT_SECRET: &str = "task-manager-development-secret-change-me";

/// Bcrypt work factors accepted by the hasher.
pub const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Longest token lifetime accepted, 30 days.
pub const MAX_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Authentication configuration loaded from environment variables.
///
/// Environment variables are prefixed with `JWT_`:
/// - `JWT_SECRET`: HMAC secret used to sign access tokens
/// - `JWT_ISSUER`: Value of the `iss` claim (default: "self")
/// - `JWT_TTL_SECONDS`: Token lifetime, 1 to [`MAX_TTL_SECONDS`] (default: 3600)
/// - `JWT_BCRYPT_COST`: Work factor for password hashes, 4 to 31 (default: 10)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_secret")]
    pub secret: String,

    #[serde(default = "default_issuer")]
    pub issuer: String,

    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_issuer() -> String {
    "self".to_string()
}

fn default_ttl_seconds() -> i64 {
    3600
}

fn default_bcrypt_cost() -> u32 {
    10
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are prefixed with `JWT_`. Out-of-range values
    /// are rejected so the caller can fall back to defaults.
    pub fn from_env() -> Result<Self, envy::Error> {
        let config = envy::prefixed("JWT_").from_env::<AuthConfig>()?;
        config.validate()?;
        Ok(config)
    }

    /// Check the bcrypt cost and token lifetime bounds.
    pub fn validate(&self) -> Result<(), envy::Error> {
        if !BCRYPT_COST_RANGE.contains(&self.bcrypt_cost) {
            return Err(envy::Error::Custom(format!(
                "JWT_BCRYPT_COST must be between {} and {}, got {}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end(),
                self.bcrypt_cost
            )));
        }
        if !(1..=MAX_TTL_SECONDS).contains(&self.ttl_seconds) {
            return Err(envy::Error::Custom(format!(
                "JWT_TTL_SECONDS must be between 1 and {}, got {}",
                MAX_TTL_SECONDS, self.ttl_seconds
            )));
        }
        Ok(())
    }

    /// Whether the signing secret was left at its development value.
    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            issuer: default_issuer(),
            ttl_seconds: default_ttl_seconds(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.issuer, "self");
        assert_eq!(config.ttl_seconds, 3600);
        assert!(config.uses_default_secret());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bcrypt_cost_bounds() {
        for (cost, valid) in [(3, false), (4, true), (31, true), (32, false), (40, false)] {
            let config = AuthConfig {
                bcrypt_cost: cost,
                ..AuthConfig::default()
            };
            assert_eq!(config.validate().is_ok(), valid, "cost {}", cost);
        }
    }

    #[test]
    fn test_ttl_bounds() {
        for (ttl, valid) in [
            (-60, false),
            (0, false),
            (1, true),
            (MAX_TTL_SECONDS, true),
            (MAX_TTL_SECONDS + 1, false),
            (i64::MAX, false),
        ] {
            let config = AuthConfig {
                ttl_seconds: ttl,
                ..AuthConfig::default()
            };
            assert_eq!(config.validate().is_ok(), valid, "ttl {}", ttl);
        }
    }
}
