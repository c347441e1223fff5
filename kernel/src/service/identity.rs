use std::sync::Arc;

use shared::{
    config::BootstrapConfig,
    error::{AppError, AppResult},
};
use tokio::sync::broadcast;

use crate::{
    model::{
        auth::{AccessToken, SessionEvent, VerifiedIdentity},
        role::Role,
        user::{event::CreateUser, User},
    },
    repository::{auth::AuthRepository, identity::IdentityProvider, user::UserRepository},
};

const SESSION_EVENT_CAPACITY: usize = 64;

#[derive(Debug)]
pub struct SignedIn {
    pub user: User,
    pub access_token: AccessToken,
    pub first_sign_in: bool,
}

/// Sign-in, sign-out and session lookup against the external identity
/// provider. User records are created here on first sign-in.
#[derive(Clone)]
pub struct IdentityService {
    identity_provider: Arc<dyn IdentityProvider>,
    user_repository: Arc<dyn UserRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    bootstrap: BootstrapConfig,
    sessions: broadcast::Sender<SessionEvent>,
}

impl IdentityService {
    pub fn new(
        identity_provider: Arc<dyn IdentityProvider>,
        user_repository: Arc<dyn UserRepository>,
        auth_repository: Arc<dyn AuthRepository>,
        bootstrap: BootstrapConfig,
    ) -> Self {
        let (sessions, _) = broadcast::channel(SESSION_EVENT_CAPACITY);
        Self {
            identity_provider,
            user_repository,
            auth_repository,
            bootstrap,
            sessions,
        }
    }

    pub async fn sign_in(&self, id_token: &str) -> AppResult<SignedIn> {
        let identity = self.identity_provider.verify(id_token).await?;
        let (user, first_sign_in) = self.find_or_create_user(identity).await?;
        let access_token = self.auth_repository.create_token(user.user_id).await?;

        tracing::info!(user_id = %user.user_id, first_sign_in, "signed in");
        self.publish(SessionEvent::SignedIn(user.user_id));
        Ok(SignedIn {
            user,
            access_token,
            first_sign_in,
        })
    }

    pub async fn sign_out(&self, access_token: &AccessToken) -> AppResult<()> {
        if let Some(user_id) = self.auth_repository.delete_token(access_token).await? {
            tracing::info!(%user_id, "signed out");
            self.publish(SessionEvent::SignedOut(user_id));
        }
        Ok(())
    }

    pub async fn current_session(&self, access_token: &AccessToken) -> AppResult<User> {
        let user_id = self
            .auth_repository
            .fetch_user_id_from_token(access_token)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;
        self.user_repository
            .find_current_user(user_id)
            .await?
            .ok_or(AppError::UnauthenticatedError)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sessions.subscribe()
    }

    async fn find_or_create_user(&self, identity: VerifiedIdentity) -> AppResult<(User, bool)> {
        if let Some(user) = self.user_repository.find_by_email(&identity.email).await? {
            return Ok((user, false));
        }

        // 初期管理者の判定はレコード作成時だけ行う
        let role = if self.bootstrap.is_bootstrap_admin(&identity.email) {
            Role::Admin
        } else {
            Role::User
        };
        let user = self
            .user_repository
            .create(CreateUser::new(identity.email, identity.display_name, role))
            .await?;
        tracing::info!(
            user_id = %user.user_id,
            role = user.role.as_ref(),
            subject = %identity.subject,
            "created user record on first sign-in"
        );
        Ok((user, true))
    }

    fn publish(&self, event: SessionEvent) {
        // 購読者がいない場合の送信失敗は無視してよい
        self.sessions.send(event).ok();
    }
}
