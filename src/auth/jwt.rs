// Session tokens for hub members
// HS256-signed JWTs that expire after TOKEN_TTL_HOURS

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::Error as TokenError, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifetime of a login token
pub const TOKEN_TTL_HOURS: i64 = 8;

/// Claims carried by a member's session token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Member id
    pub sub: Uuid,
    /// Issued at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

impl Claims {
    fn for_member(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        }
    }
}

/// Issues a session token for a member
///
/// # Example
/// ```
/// use managehub_api::auth::jwt::{create_token, verify_token};
/// use uuid::Uuid;
///
/// let member = Uuid::new_v4();
/// let token = create_token(member, "hub-secret").unwrap();
/// assert_eq!(verify_token(&token, "hub-secret").unwrap().sub, member);
/// ```
pub fn create_token(user_id: Uuid, secret: &str) -> Result<String, TokenError> {
    encode(
        &Header::new(Algorithm::HS256),
        &Claims::for_member(user_id),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Checks signature and expiry, returning the claims
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    const SECRET: &str = "managehub-test-secret";

    #[test]
    fn round_trip_keeps_member() {
        let member = Uuid::new_v4();
        let token = create_token(member, SECRET).unwrap();

        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, member);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_HOURS * 3600);
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = create_token(Uuid::new_v4(), SECRET).unwrap();
        let err = verify_token(&token, "another-secret").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidSignature));
    }

    #[test]
    fn garbage_rejected() {
        assert!(verify_token("not.a.token", SECRET).is_err());
    }

    #[test]
    fn expired_token_rejected() {
        let issued = Utc::now() - Duration::hours(TOKEN_TTL_HOURS + 1);
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: issued.timestamp(),
            exp: (issued + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let err = verify_token(&token, SECRET).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }
}
