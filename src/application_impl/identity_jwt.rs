use crate::application_port::{AuthError, IdentityVerifier};
use crate::domain_model::UserId;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub issuer: String,
    pub audience: String,
    pub signing_key: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String, // user id as string
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
    pub jti: String,
}

/// Verifies HS256 access tokens issued by the auth service.
pub struct JwtHs256Verifier {
    cfg: JwtConfig,
}

impl JwtHs256Verifier {
    pub fn new(cfg: JwtConfig) -> Self {
        JwtHs256Verifier { cfg }
    }

    fn decode_access(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let mut v = Validation::new(Algorithm::HS256);
        v.validate_exp = true;
        v.set_audience(&[self.cfg.audience.clone()]);
        v.set_issuer(&[self.cfg.issuer.clone()]);
        let data = decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(&self.cfg.signing_key),
            &v,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid,
        })?;
        Ok(data.claims)
    }
}

#[async_trait::async_trait]
impl IdentityVerifier for JwtHs256Verifier {
    async fn verify_token(&self, token: &str) -> Result<UserId, AuthError> {
        let claims = self.decode_access(token)?;
        claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AuthError::TokenInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    const KEY: &[u8] = b"test-signing-key";

    fn verifier() -> JwtHs256Verifier {
        JwtHs256Verifier::new(JwtConfig {
            issuer: "amity.auth".to_string(),
            audience: "amity-client".to_string(),
            signing_key: KEY.to_vec(),
        })
    }

    fn token(sub: &str, aud: &str, ttl: Duration) -> String {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: sub.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            iss: "amity.auth".to_string(),
            aud: aud.to_string(),
            jti: uuid::Uuid::new_v4().to_string(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(KEY),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_token() {
        let user = UserId::new_v4();
        let t = token(&user.to_string(), "amity-client", Duration::minutes(5));
        assert_eq!(verifier().verify_token(&t).await.unwrap(), user);
    }

    #[tokio::test]
    async fn rejects_expired_token() {
        let user = UserId::new_v4();
        let t = token(&user.to_string(), "amity-client", Duration::minutes(-10));
        assert!(matches!(
            verifier().verify_token(&t).await,
            Err(AuthError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn rejects_wrong_audience_and_bad_subject() {
        let user = UserId::new_v4();
        let t = token(&user.to_string(), "someone-else", Duration::minutes(5));
        assert!(matches!(
            verifier().verify_token(&t).await,
            Err(AuthError::TokenInvalid)
        ));

        let t = token("not-a-uuid", "amity-client", Duration::minutes(5));
        assert!(matches!(
            verifier().verify_token(&t).await,
            Err(AuthError::TokenInvalid)
        ));
    }
}
