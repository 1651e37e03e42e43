//! JWT service for token generation and validation
//!
//! Tokens carry the numeric user id in a `user_id` claim together with a
//! `token_type` of `access` or `refresh`. They are signed either with a
//! shared HS256 secret or with an RS256 key pair. A service that only
//! verifies tokens needs nothing more than the public key.

use anyhow::{Result, anyhow};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Signing material for tokens
#[derive(Debug, Clone)]
pub enum JwtKeys {
    /// Shared secret (HS256)
    Secret(String),
    /// PEM encoded key pair (RS256); the private key is only needed to issue tokens
    Rsa {
        private_key: Option<String>,
        public_key: String,
    },
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub keys: JwtKeys,
    /// Access token expiration time in seconds (default: 15 minutes)
    pub access_token_expiry: u64,
    /// Refresh token expiration time in seconds (default: 7 days)
    pub refresh_token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Shared HS256 secret; when set, the key variables below are ignored
    /// - `JWT_PRIVATE_KEY`: Private key for signing tokens (PEM format) or path to a PEM file
    /// - `JWT_PUBLIC_KEY`: Public key for verifying tokens (PEM format) or path to a PEM file
    /// - `JWT_ACCESS_TOKEN_EXPIRY`: Access token expiry in seconds (default: 900)
    /// - `JWT_REFRESH_TOKEN_EXPIRY`: Refresh token expiry in seconds (default: 604800)
    pub fn from_env() -> Result<Self> {
        let keys = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => JwtKeys::Secret(secret),
            _ => {
                let public_key = std::env::var("JWT_PUBLIC_KEY").map_err(|_| {
                    anyhow!("Neither JWT_SECRET nor JWT_PUBLIC_KEY environment variable is set")
                })?;
                let private_key = std::env::var("JWT_PRIVATE_KEY")
                    .ok()
                    .map(|value| read_pem(&value))
                    .transpose()?;

                JwtKeys::Rsa {
                    private_key,
                    public_key: read_pem(&public_key)?,
                }
            }
        };

        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "900".to_string()) // 15 minutes
            .parse()
            .unwrap_or(900);

        let refresh_token_expiry = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "604800".to_string()) // 7 days
            .parse()
            .unwrap_or(604800);

        Ok(JwtConfig {
            keys,
            access_token_expiry,
            refresh_token_expiry,
        })
    }

    /// HS256 configuration with the default expiries
    pub fn with_secret(secret: impl Into<String>) -> Self {
        JwtConfig {
            keys: JwtKeys::Secret(secret.into()),
            access_token_expiry: 900,
            refresh_token_expiry: 604800,
        }
    }
}

/// Accept either an inline PEM or a path to a PEM file
fn read_pem(value: &str) -> Result<String> {
    if value.starts_with("-----BEGIN") {
        return Ok(value.to_string());
    }

    std::fs::read_to_string(value)
        .map(|pem| pem.trim().to_string())
        .map_err(|e| anyhow!("Failed to read key file {}: {}", value, e))
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Primary key of the user in `crud_user`
    pub user_id: i32,
    /// Token type (access or refresh)
    pub token_type: TokenType,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
    /// Unique token id
    pub jti: String,
}

/// Token type enum
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token
    Access,
    /// Refresh token
    Refresh,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    algorithm: Algorithm,
    encoding_key: Option<EncodingKey>,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Result<Self> {
        let (algorithm, encoding_key, decoding_key) = match &config.keys {
            JwtKeys::Secret(secret) => (
                Algorithm::HS256,
                Some(EncodingKey::from_secret(secret.as_bytes())),
                DecodingKey::from_secret(secret.as_bytes()),
            ),
            JwtKeys::Rsa {
                private_key,
                public_key,
            } => (
                Algorithm::RS256,
                private_key
                    .as_deref()
                    .map(|pem| EncodingKey::from_rsa_pem(pem.as_bytes()))
                    .transpose()?,
                DecodingKey::from_rsa_pem(public_key.as_bytes())?,
            ),
        };

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;

        Ok(JwtService {
            algorithm,
            encoding_key,
            decoding_key,
            validation,
            config,
        })
    }

    /// Generate an access token for a user
    pub fn generate_access_token(&self, user_id: i32) -> Result<String> {
        self.generate_token(user_id, TokenType::Access, self.config.access_token_expiry)
    }

    /// Generate a refresh token for a user
    pub fn generate_refresh_token(&self, user_id: i32) -> Result<String> {
        self.generate_token(user_id, TokenType::Refresh, self.config.refresh_token_expiry)
    }

    fn generate_token(&self, user_id: i32, token_type: TokenType, expiry: u64) -> Result<String> {
        let encoding_key = self
            .encoding_key
            .as_ref()
            .ok_or_else(|| anyhow!("No signing key configured; this service can only verify tokens"))?;

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            user_id,
            token_type,
            iat: now,
            exp: now + expiry,
            jti: Uuid::new_v4().simple().to_string(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, encoding_key)?;
        Ok(token)
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Validate a token and require it to be of the given type
    pub fn validate_token_of_type(&self, token: &str, expected: TokenType) -> Result<Claims> {
        let claims = self.validate_token(token)?;
        if claims.token_type != expected {
            return Err(anyhow!(
                "Expected {:?} token, got {:?}",
                expected,
                claims.token_type
            ));
        }
        Ok(claims)
    }

    /// Whether a signing key is configured
    pub fn can_issue(&self) -> bool {
        self.encoding_key.is_some()
    }

    /// Get the access token expiry time
    pub fn access_token_expiry(&self) -> u64 {
        self.config.access_token_expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new(JwtConfig::with_secret("test-secret")).unwrap()
    }

    #[test]
    fn test_access_token_round_trip() {
        let jwt = service();
        let token = jwt.generate_access_token(42).unwrap();

        let claims = jwt.validate_token_of_type(&token, TokenType::Access).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let jwt = service();
        let token = jwt.generate_refresh_token(7).unwrap();

        assert!(jwt.validate_token_of_type(&token, TokenType::Access).is_err());
        assert!(jwt.validate_token_of_type(&token, TokenType::Refresh).is_ok());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other = JwtService::new(JwtConfig::with_secret("another-secret")).unwrap();
        let token = other.generate_access_token(1).unwrap();

        assert!(service().validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = Claims {
            user_id: 1,
            token_type: TokenType::Access,
            iat: now - 7200,
            exp: now - 3600,
            jti: "expired".to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(service().validate_token(&token).is_err());
    }

    #[test]
    fn test_token_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TokenType::Refresh).unwrap(),
            "\"refresh\""
        );
    }

    #[test]
    fn test_verify_only_service_cannot_issue() {
        let mut jwt = service();
        assert!(jwt.can_issue());
        jwt.encoding_key = None;
        assert!(!jwt.can_issue());
        assert!(jwt.generate_access_token(1).is_err());
    }
}
