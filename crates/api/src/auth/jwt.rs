//! JWT access-token issuing and verification.
//!
//! Access tokens are HS256-signed JWTs containing a [`Claims`] payload. The
//! subject is the user's database id; tokens minted by other issuers may
//! carry it as a JSON float, so [`Claims::sub`] accepts any float that holds
//! an exact integer within the 53-bit safe range.

use std::fmt;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mytasks_core::types::DbId;
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Largest magnitude an `f64` subject may have and still be an exact integer.
const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Default access token lifetime in hours.
const DEFAULT_EXPIRY_HOURS: i64 = 24;

/// Why a request could not be authenticated. Always answered with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No usable `Authorization: Bearer <token>` header.
    #[error("Missing or invalid Authorization header. Expected: Bearer <token>")]
    Missing,
    /// Unparseable token, bad signature, or a subject that is not an id.
    #[error("Invalid token")]
    Malformed,
    #[error("Token expired")]
    Expired,
}

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    #[serde(deserialize_with = "deserialize_subject")]
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    #[serde(default)]
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in hours (default: 24).
    pub expiry_hours: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `JWT_SECRET`       | **yes**  | --      |
    /// | `JWT_EXPIRY_HOURS` | no       | `24`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry_hours: i64 = std::env::var("JWT_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_EXPIRY_HOURS must be a valid i64");

        Self {
            secret,
            expiry_hours,
        }
    }
}

/// Generate an HS256 access token for the given user.
pub fn generate_access_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.expiry_hours * 3600;

    let claims = Claims {
        sub: user_id,
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify an access token and return the user id it was issued for.
///
/// Expiry is checked with zero leeway.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<DbId, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims.sub)
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::Malformed,
    })
}

/// Accept integer subjects, and float subjects that are exact integers
/// within `±MAX_SAFE_INTEGER`.
fn deserialize_subject<'de, D>(deserializer: D) -> Result<DbId, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(SubjectVisitor)
}

struct SubjectVisitor;

impl<'de> Visitor<'de> for SubjectVisitor {
    type Value = DbId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integral user id")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<DbId, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<DbId, E> {
        DbId::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<DbId, E> {
        if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER as f64 {
            Ok(v as DbId)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_hours: 24,
        }
    }

    /// Sign an arbitrary JSON payload with the test secret.
    fn sign(payload: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(test_config().secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    fn future_exp() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn test_generate_and_verify_round_trip() {
        let config = test_config();
        let token = generate_access_token(42, &config).expect("token generation should succeed");
        assert_eq!(verify_token(&token, &config), Ok(42));
    }

    #[test]
    fn test_generated_claims_carry_expiry_and_jti() {
        let config = test_config();
        let token = generate_access_token(7, &config).unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(config.secret.as_bytes()),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, 24 * 3600);
        assert!(!data.claims.jti.is_empty());
    }

    #[test]
    fn test_expired_token_is_expired() {
        let now = chrono::Utc::now().timestamp();
        let token = sign(json!({ "sub": 42, "exp": now - 5, "iat": now - 600 }));
        assert_eq!(verify_token(&token, &test_config()), Err(AuthError::Expired));
    }

    #[test]
    fn test_tampered_signature_is_malformed() {
        let token = generate_access_token(42, &test_config()).unwrap();
        let (unsigned, signature) = token.rsplit_once('.').unwrap();
        let first = signature.chars().next().unwrap();
        let replacement = if first == 'A' { 'B' } else { 'A' };
        let tampered = format!("{unsigned}.{replacement}{}", &signature[1..]);

        assert_eq!(verify_token(&tampered, &test_config()), Err(AuthError::Malformed));
    }

    #[test]
    fn test_different_secret_is_malformed() {
        let other = JwtConfig {
            secret: "secret-bravo".to_string(),
            expiry_hours: 24,
        };
        let token = generate_access_token(1, &other).unwrap();
        assert_eq!(verify_token(&token, &test_config()), Err(AuthError::Malformed));
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert_eq!(verify_token("not-a-jwt", &test_config()), Err(AuthError::Malformed));
        assert_eq!(verify_token("", &test_config()), Err(AuthError::Malformed));
    }

    #[test]
    fn test_float_subject_is_accepted() {
        let token = sign(json!({ "sub": 42.0, "exp": future_exp(), "iat": 0 }));
        assert_eq!(verify_token(&token, &test_config()), Ok(42));
    }

    #[test]
    fn test_largest_safe_subject_round_trips() {
        let as_int = sign(json!({ "sub": MAX_SAFE_INTEGER, "exp": future_exp(), "iat": 0 }));
        let as_float = sign(json!({
            "sub": MAX_SAFE_INTEGER as f64,
            "exp": future_exp(),
            "iat": 0,
        }));
        assert_eq!(verify_token(&as_int, &test_config()), Ok(MAX_SAFE_INTEGER));
        assert_eq!(verify_token(&as_float, &test_config()), Ok(MAX_SAFE_INTEGER));
    }

    #[test]
    fn test_unrepresentable_subjects_are_malformed() {
        for sub in [json!(42.5), json!(9_007_199_254_740_992.0_f64), json!("42"), json!(null)] {
            let token = sign(json!({ "sub": sub, "exp": future_exp(), "iat": 0 }));
            assert_eq!(
                verify_token(&token, &test_config()),
                Err(AuthError::Malformed),
                "sub = {sub}"
            );
        }
    }
}
