use crate::application_port::*;
use crate::domain_model::UserId;

const FAKE_TOKEN_PREFIX: &str = "fake-access-token:";

#[derive(Debug, Default)]
pub struct FakeIdentityVerifier;

impl FakeIdentityVerifier {
    pub fn new() -> Self {
        Self
    }

    pub fn token_for(user_id: UserId) -> String {
        format!("{FAKE_TOKEN_PREFIX}{user_id}")
    }
}

// Development only: the token is the caller's id in clear.
#[async_trait::async_trait]
impl IdentityVerifier for FakeIdentityVerifier {
    async fn verify_token(&self, token: &str) -> Result<UserId, AuthError> {
        token
            .strip_prefix(FAKE_TOKEN_PREFIX)
            .and_then(|id| id.parse::<UserId>().ok())
            .ok_or(AuthError::TokenInvalid)
    }
}
