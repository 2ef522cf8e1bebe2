//! Signed access tokens carrying the caller's identity and role claims.
//!
//! Tokens are self-contained; nothing is stored server-side. HS256 with a
//! shared secret from config is enough for a single-service deployment.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (account guid)
    pub sub: String,
    /// Email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Names of every role granted to the account at issue time
    pub roles: Vec<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    pub fn issue(
        &self,
        account_guid: Uuid,
        email: &str,
        name: &str,
        roles: Vec<String>,
    ) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_guid.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            roles,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).context("Failed to sign access token")
    }

    /// Signature and expiry are both checked.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .context("Invalid access token")?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", 60)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let guid = Uuid::new_v4();
        let token = issuer()
            .issue(guid, "a@x.com", "Ada Lovelace", vec!["employee".to_string()])
            .unwrap();

        let claims = issuer().verify(&token).unwrap();
        assert_eq!(claims.sub, guid.to_string());
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.roles, vec!["employee"]);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issuer()
            .issue(Uuid::new_v4(), "a@x.com", "Ada", vec![])
            .unwrap();

        let other = TokenIssuer::new("another-secret", 60);
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // jsonwebtoken validates exp with 60s leeway by default.
        let stale = TokenIssuer::new("test-secret", -5);
        let token = stale
            .issue(Uuid::new_v4(), "a@x.com", "Ada", vec![])
            .unwrap();

        assert!(issuer().verify(&token).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(issuer().verify("not-a-token").is_err());
    }
}
