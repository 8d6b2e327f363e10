use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    env_config::JwtConfig,
    error::{AppError, Res},
};

/// Claims carried by the auth provider's access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JwtClaims {
    /// Id of the authenticated user.
    pub sub: Uuid,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

impl JwtClaims {
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}

/// Signs a token the same way the auth provider does.
/// Used by local tooling and tests; production tokens come from the provider.
pub fn generate_jwt(user_id: Uuid, expires_in: Duration, config: &JwtConfig) -> Res<String> {
    let expiration = Utc::now()
        .checked_add_signed(expires_in)
        .ok_or_else(|| AppError::Internal("Token expiration overflowed".to_string()))?
        .timestamp();

    let claims = JwtClaims {
        sub: user_id,
        exp: expiration.max(0) as usize,
        aud: config.audience.clone(),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(AppError::from)
}

/// Extracts claims object from JWT token.
pub fn validate_jwt(token: &str, config: &JwtConfig) -> Res<JwtClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    match &config.audience {
        Some(audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }

    let token_data = jsonwebtoken::decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(audience: Option<&str>) -> JwtConfig {
        JwtConfig {
            secret: "super-secret-test-key".to_string(),
            audience: audience.map(str::to_string),
        }
    }

    #[test]
    fn generated_token_validates() {
        let user_id = Uuid::new_v4();
        let config = config(Some("authenticated"));
        let token = generate_jwt(user_id, Duration::hours(1), &config).unwrap();

        let claims = validate_jwt(&token, &config).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.aud.as_deref(), Some("authenticated"));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_jwt(Uuid::new_v4(), Duration::hours(1), &config(None)).unwrap();
        let other = JwtConfig {
            secret: "another-secret".to_string(),
            audience: None,
        };
        assert!(matches!(validate_jwt(&token, &other), Err(AppError::JWT(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = config(None);
        let token = generate_jwt(Uuid::new_v4(), Duration::hours(-2), &config).unwrap();
        assert!(validate_jwt(&token, &config).is_err());
    }

    #[test]
    fn audience_mismatch_is_rejected() {
        let token =
            generate_jwt(Uuid::new_v4(), Duration::hours(1), &config(Some("anon"))).unwrap();
        assert!(validate_jwt(&token, &config(Some("authenticated"))).is_err());
    }

    #[test]
    fn provider_specific_claims_are_ignored() {
        let config = config(None);
        let user_id = Uuid::new_v4();
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let payload = serde_json::json!({
            "sub": user_id,
            "exp": exp,
            "email": "owner@example.com",
            "role": "authenticated",
        });
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let claims = validate_jwt(&token, &config).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.aud, None);
    }
}
