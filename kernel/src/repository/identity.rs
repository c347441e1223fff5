use crate::model::auth::VerifiedIdentity;
use async_trait::async_trait;
use shared::error::AppResult;

/// Verifies sign-in assertions issued by the external identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify(&self, id_token: &str) -> AppResult<VerifiedIdentity>;
}
