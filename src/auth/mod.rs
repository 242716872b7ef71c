use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config;

/// Decoded token payload. The email is the caller's identity; nothing here is
/// checked against the users table at issue time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(email: String) -> Self {
        let now = Utc::now();
        let expiry_days = config::config().security.jwt_expiry_days;
        let exp = (now + Duration::days(expiry_days as i64)).timestamp();

        Self {
            email,
            exp,
            iat: now.timestamp(),
        }
    }

    #[cfg(test)]
    fn with_expiry(email: String, expiry_days: i64) -> Self {
        let now = Utc::now();
        Self {
            email,
            exp: (now + Duration::days(expiry_days)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    TokenInvalid(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::TokenInvalid(msg) => write!(f, "Invalid JWT token: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

/// Sign claims with the configured server secret.
pub fn generate_jwt(claims: &Claims) -> Result<String, JwtError> {
    generate_jwt_with_secret(claims, &config::config().security.jwt_secret)
}

/// Validate a token against the configured server secret and return its claims.
pub fn validate_jwt(token: &str) -> Result<Claims, JwtError> {
    validate_jwt_with_secret(token, &config::config().security.jwt_secret)
}

fn generate_jwt_with_secret(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

fn validate_jwt_with_secret(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| JwtError::TokenInvalid(e.to_string()))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-signing-secret";

    #[test]
    fn token_round_trips_within_expiry() {
        let claims = Claims::with_expiry("a@x.com".to_string(), 365);
        let token = generate_jwt_with_secret(&claims, SECRET).unwrap();

        let decoded = validate_jwt_with_secret(&token, SECRET).unwrap();
        assert_eq!(decoded.email, "a@x.com");
        assert_eq!(decoded.exp, claims.exp);
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let claims = Claims::with_expiry("a@x.com".to_string(), 365);
        let token = generate_jwt_with_secret(&claims, SECRET).unwrap();

        // Flip the last character of the signature segment
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(matches!(
            validate_jwt_with_secret(&tampered, SECRET),
            Err(JwtError::TokenInvalid(_))
        ));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = Claims::with_expiry("a@x.com".to_string(), 365);
        let token = generate_jwt_with_secret(&claims, SECRET).unwrap();

        assert!(validate_jwt_with_secret(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims::with_expiry("a@x.com".to_string(), -1);
        let token = generate_jwt_with_secret(&claims, SECRET).unwrap();

        assert!(matches!(
            validate_jwt_with_secret(&token, SECRET),
            Err(JwtError::TokenInvalid(_))
        ));
    }

    #[test]
    fn empty_secret_is_refused() {
        let claims = Claims::with_expiry("a@x.com".to_string(), 365);
        assert!(matches!(
            generate_jwt_with_secret(&claims, ""),
            Err(JwtError::InvalidSecret)
        ));
    }
}
