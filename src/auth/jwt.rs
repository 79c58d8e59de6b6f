//! JWT Token Handler
//! Mission: Sign and validate short-lived access tokens

use crate::auth::models::{AccessToken, AccountId, Claims};
use crate::config::AuthConfig;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// Access tokens live for 15 minutes; there is no refresh mechanism.
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;

/// JWT Handler for token operations
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtHandler {
    /// Create a handler signing with the configured secret
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        // Expired means expired: no grace period
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
        }
    }

    /// Generate a token for an account, issued now
    pub fn generate_token(&self, account_id: AccountId, email: &str) -> Result<AccessToken> {
        self.generate_token_at(account_id, email, Utc::now())
    }

    /// Generate a token with an explicit issue time
    pub fn generate_token_at(
        &self,
        account_id: AccountId,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<AccessToken> {
        let expiration = issued_at
            .checked_add_signed(self.ttl)
            .context("Invalid timestamp")?;

        let claims = Claims {
            user_id: account_id,
            email: email.to_string(),
            iat: issued_at.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        debug!(
            account_id,
            "Generating JWT, expires in {}m", ACCESS_TOKEN_TTL_MINUTES
        );

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("Failed to generate JWT")?;

        Ok(AccessToken {
            token,
            expires_in: self.ttl.num_seconds() as usize,
        })
    }

    /// Validate a JWT token and extract claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let decoded = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .context("Invalid or expired token")?;

        debug!(account_id = decoded.claims.user_id, "Validated JWT");

        Ok(decoded.claims)
    }
}
