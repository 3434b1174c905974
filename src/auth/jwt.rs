use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::state::AppState;

/// Fixed token lifetime. There is no refresh flow; clients log in again.
const TOKEN_TTL_HOURS: i64 = 24;

/// Self-contained identity token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

/// Why a token failed verification. Clients see distinct messages for
/// the two cases; a malformed payload is reported as invalid.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("token is invalid")]
    Invalid,
}

#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.jwt_secret)
    }
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, user_id: Uuid, email: &str) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + Duration::hours(TOKEN_TTL_HOURS);
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "token issued");
        Ok(token)
    }

    /// Checks the HMAC signature, then expiry (exact, zero leeway), then
    /// payload shape. Signature and shape failures are collapsed into
    /// `Invalid`; only a genuinely out-of-date token reports `Expired`.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;
        debug!(user_id = %data.claims.sub, "token verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        JwtKeys::new("dev-secret")
    }

    #[test]
    fn issue_and_verify_roundtrip() {
        let keys = make_keys();
        let user_id = Uuid::new_v4();
        let token = keys.issue(user_id, "a@b.com").expect("issue");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "a@b.com");
    }

    #[test]
    fn token_lifetime_is_24_hours() {
        let keys = make_keys();
        let token = keys.issue(Uuid::new_v4(), "a@b.com").expect("issue");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let keys = make_keys();
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@b.com".into(),
            iat: (now - Duration::hours(25)).unix_timestamp() as usize,
            exp: (now - Duration::hours(1)).unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).expect("encode");
        assert_eq!(keys.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn token_near_expiry_is_still_accepted() {
        let keys = make_keys();
        let now = OffsetDateTime::now_utc();
        // Issued 23h59m ago, one minute of life left.
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@b.com".into(),
            iat: (now - Duration::minutes(23 * 60 + 59)).unix_timestamp() as usize,
            exp: (now + Duration::minutes(1)).unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).expect("encode");
        assert!(keys.verify(&token).is_ok());
    }

    #[test]
    fn tampered_signature_is_rejected_as_invalid() {
        let keys = make_keys();
        let other = JwtKeys::new("a-different-secret");
        let token = other.issue(Uuid::new_v4(), "a@b.com").expect("issue");
        assert_eq!(keys.verify(&token).unwrap_err(), TokenError::Invalid);
    }

    #[tokio::test]
    async fn keys_derive_from_app_state_secret() {
        let state = crate::state::AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let token = keys.issue(Uuid::new_v4(), "a@b.com").expect("issue");
        assert!(keys.verify(&token).is_ok());
        // A different secret must not verify tokens from the state's keys.
        assert!(JwtKeys::new("other").verify(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected_as_invalid() {
        let keys = make_keys();
        assert_eq!(
            keys.verify("not.a.token").unwrap_err(),
            TokenError::Invalid
        );
    }
}
