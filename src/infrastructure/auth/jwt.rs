//! Session token issuing and verification
//!
//! Tokens are HS256 JWTs signed with a server-held secret. The claims
//! identify the user and carry issuance metadata only - deliberately no
//! role claim, since role is re-fetched from the directory at the point
//! of every privileged action.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::user::User;
use crate::domain::DomainError;

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Display name
    pub name: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl SessionClaims {
    /// Create new claims for a user
    pub fn new(user: &User, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: user.id().as_str().to_string(),
            name: user.name().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Get user ID from claims
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: u64,
}

impl TokenConfig {
    /// Create new token configuration
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }
}

/// Trait for session token operations
pub trait TokenService: Send + Sync + Debug {
    /// Issue a session token for a user
    fn issue(&self, user: &User) -> Result<String, DomainError>;

    /// Verify a token's signature and expiry, returning the claims
    fn verify(&self, token: &str) -> Result<SessionClaims, DomainError>;

    /// Get the token expiration time in hours
    fn expiration_hours(&self) -> u64;
}

/// Token service implementation backed by a shared secret
#[derive(Clone)]
pub struct JwtTokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("expiration_hours", &self.config.expiration_hours)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtTokenService {
    /// Create a new token service with the given configuration
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &User) -> Result<String, DomainError> {
        let claims = SessionClaims::new(user, self.config.expiration_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to issue session token: {}", e)))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, DomainError> {
        let validation = Validation::default();

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| DomainError::unauthorized(format!("Invalid session token: {}", e)))?;

        Ok(token_data.claims)
    }

    fn expiration_hours(&self) -> u64 {
        self.config.expiration_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Role, UserId};

    fn create_test_user() -> User {
        let id = UserId::new("test-user").unwrap();
        User::new(id, "testuser", "test@example.com", Role::Player)
    }

    fn create_service() -> JwtTokenService {
        JwtTokenService::new(TokenConfig::new("test-secret-key-12345", 24))
    }

    #[test]
    fn test_issue_and_verify() {
        let service = create_service();
        let user = create_test_user();

        let token = service.issue(&user).unwrap();
        assert!(!token.is_empty());

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, "test-user");
        assert_eq!(claims.name, "testuser");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_invalid_token() {
        let service = create_service();

        let result = service.verify("not-a-token");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtTokenService::new(TokenConfig::new("secret-1", 24));
        let service2 = JwtTokenService::new(TokenConfig::new("secret-2", 24));

        let user = create_test_user();
        let token = service1.issue(&user).unwrap();

        // Token signed with a different secret must fail verification
        let result = service2.verify(&token);
        assert!(result.is_err());
    }

    #[test]
    fn test_expired_token() {
        let service = JwtTokenService::new(TokenConfig::new("test-secret", 24));
        let user = create_test_user();

        // Craft claims whose expiry is an hour in the past
        let past_time = Utc::now() - Duration::hours(1);
        let claims = SessionClaims {
            sub: user.id().as_str().to_string(),
            name: user.name().to_string(),
            iat: (past_time - Duration::hours(2)).timestamp(),
            exp: past_time.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let result = service.verify(&token);
        assert!(result.is_err());
    }

    #[test]
    fn test_claims_carry_no_role() {
        let service = create_service();
        let user = create_test_user();

        let token = service.issue(&user).unwrap();

        let payload = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(b"test-secret-key-12345"),
            &Validation::default(),
        )
        .unwrap()
        .claims;

        // Role never rides along in the token payload
        assert!(payload.get("role").is_none());
        assert_eq!(payload.get("sub").unwrap(), "test-user");
    }

    #[test]
    fn test_claims_expiration() {
        let user = create_test_user();
        let claims = SessionClaims::new(&user, 24);

        assert!(!claims.is_expired());
        assert_eq!(claims.user_id(), "test-user");
    }

    #[test]
    fn test_expiration_hours() {
        let service = JwtTokenService::new(TokenConfig::new("secret", 48));
        assert_eq!(service.expiration_hours(), 48);
    }
}
