//! JWT access tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{AuthUser, Role};
use crate::config::{AuthConfig, MAX_TTL_SECONDS};
use crate::db::models::User;
use crate::error::AppResult;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    /// User email
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    /// User role
    pub scope: Role,
    #[serde(rename = "userId")]
    pub user_id: i64,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.user_id,
            email: claims.sub,
            role: claims.scope,
        }
    }
}

/// Signs and verifies access tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    issuer: String,
    ttl: Duration,
}

impl TokenIssuer {
    /// Build an issuer from `config`. The lifetime is clamped to
    /// `1..=MAX_TTL_SECONDS`.
    pub fn new(config: &AuthConfig) -> Self {
        let ttl_seconds = config.ttl_seconds.clamp(1, MAX_TTL_SECONDS);
        Self {
            encoding: Arc::new(EncodingKey::from_secret(config.secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(config.secret.as_bytes())),
            issuer: config.issuer.clone(),
            ttl: Duration::try_seconds(ttl_seconds).unwrap_or_else(|| Duration::hours(1)),
        }
    }

    /// Issue a token for `user` valid from now.
    pub fn issue(&self, user: &User) -> AppResult<String> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> AppResult<String> {
        let claims = Claims {
            iss: self.issuer.clone(),
            sub: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            scope: user.role(),
            user_id: user.id,
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Check signature, issuer and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}
