use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserJwtClaims {
    pub sub: String,
    pub exp: usize,
}

fn user_validation() -> Validation {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation
}

pub fn issue_user_jwt(
    secret: &str,
    user_id: Uuid,
    ttl_hours: i64,
) -> Result<(String, usize), String> {
    let exp = (Utc::now() + Duration::hours(ttl_hours)).timestamp() as usize;
    let claims = UserJwtClaims {
        sub: user_id.to_string(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map(|token| (token, exp))
    .map_err(|err| format!("Failed to sign user JWT: {}", err))
}

pub fn verify_user_jwt(secret: &str, token: &str) -> Result<Uuid, String> {
    let claims = decode::<UserJwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &user_validation(),
    )
    .map(|decoded| decoded.claims)
    .map_err(|err| format!("Invalid user JWT: {}", err))?;

    Uuid::parse_str(&claims.sub).map_err(|_| format!("Invalid user id '{}' in JWT", claims.sub))
}
