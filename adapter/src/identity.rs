use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use kernel::{model::auth::VerifiedIdentity, repository::identity::IdentityProvider};
use serde::{Deserialize, Serialize};
use shared::{
    config::IdentityConfig,
    error::{AppError, AppResult},
};

/// Claims carried by the identity provider's ID token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub sub: String,
    pub iss: String,
    pub aud: String,
    pub exp: usize,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Verifies HS256-signed ID tokens against the configured issuer and audience.
pub struct JwtIdentityProvider {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    pub fn new(config: &IdentityConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn verify(&self, id_token: &str) -> AppResult<VerifiedIdentity> {
        let token = decode::<IdentityClaims>(id_token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => "token expired".to_string(),
                    ErrorKind::InvalidSignature => "invalid signature".to_string(),
                    ErrorKind::InvalidIssuer => "untrusted issuer".to_string(),
                    ErrorKind::InvalidAudience => "wrong audience".to_string(),
                    _ => e.to_string(),
                };
                tracing::warn!(%reason, "rejected identity token");
                AppError::InvalidIdentityToken(reason)
            })?;

        let IdentityClaims {
            sub, email, name, ..
        } = token.claims;
        let email = email.trim().to_lowercase();
        if sub.is_empty() || email.is_empty() {
            return Err(AppError::InvalidIdentityToken(
                "missing subject or email".into(),
            ));
        }
        Ok(VerifiedIdentity {
            subject: sub,
            email,
            display_name: name.filter(|n| !n.trim().is_empty()),
        })
    }
}
