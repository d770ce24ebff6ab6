use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey, Algorithm};
use serde::{Deserialize, Serialize};
use chrono::{Utc, Duration};

use crate::config::JwtSettings;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,        // user_id
    pub username: String,
    pub is_staff: bool,  // accès aux routes admin
    pub exp: i64,        // expiration timestamp
}

/// Génère un JWT token pour un utilisateur
pub fn generate_token(
    settings: &JwtSettings,
    user_id: i32,
    username: &str,
    is_staff: bool,
) -> Result<String, String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(settings.ttl_hours))
        .ok_or("Failed to calculate expiration")?
        .timestamp();

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        is_staff,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )
        .map_err(|e| format!("Failed to generate token: {}", e))
}

/// Vérifie et décode un JWT token
pub fn verify_token(settings: &JwtSettings, token: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
        .map(|data| data.claims)
        .map_err(|e| format!("Invalid token: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(secret: &str) -> JwtSettings {
        JwtSettings { secret: secret.to_string(), ttl_hours: 24 }
    }

    #[test]
    fn test_generate_and_verify_token() {
        let settings = settings("test-secret");

        let token = generate_token(&settings, 123, "testuser", true).unwrap();
        let claims = verify_token(&settings, &token).unwrap();

        assert_eq!(claims.sub, 123);
        assert_eq!(claims.username, "testuser");
        assert!(claims.is_staff);
    }

    #[test]
    fn test_invalid_token() {
        let result = verify_token(&settings("test-secret"), "invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret() {
        let token = generate_token(&settings("secret-a"), 1, "alice", false).unwrap();
        assert!(verify_token(&settings("secret-b"), &token).is_err());
    }

    #[test]
    fn test_expired_token() {
        // -2h : au-delà de la marge de 60s de jsonwebtoken
        let expired = JwtSettings { secret: "test-secret".into(), ttl_hours: -2 };
        let token = generate_token(&expired, 1, "alice", false).unwrap();
        assert!(verify_token(&expired, &token).is_err());
    }
}
