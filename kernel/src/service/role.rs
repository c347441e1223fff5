use std::sync::Arc;

use derive_new::new;
use shared::error::AppResult;

use crate::{
    model::{id::UserId, role::Role, user::event::UpdateUserRole},
    repository::user::UserRepository,
};

/// Where role resolution for the current viewer stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleResolution {
    Pending,
    Anonymous,
    Resolved(Role),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Resolution still pending: render neither the content nor the redirect.
    Checking,
    Granted,
    Redirect,
}

/// Permits a capability only for the listed roles.
#[derive(Debug, Clone, Copy)]
pub struct AccessGate {
    allowed: &'static [Role],
}

impl AccessGate {
    pub const fn new(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    pub const fn admin_only() -> Self {
        Self::new(&[Role::Admin])
    }

    pub fn decide(&self, resolution: RoleResolution) -> GateDecision {
        match resolution {
            RoleResolution::Pending => GateDecision::Checking,
            RoleResolution::Anonymous => GateDecision::Redirect,
            RoleResolution::Resolved(role) if self.allowed.contains(&role) => GateDecision::Granted,
            RoleResolution::Resolved(_) => GateDecision::Redirect,
        }
    }
}

#[derive(Clone, new)]
pub struct RoleResolver {
    user_repository: Arc<dyn UserRepository>,
}

impl RoleResolver {
    pub async fn resolve_role(&self, user_id: UserId) -> AppResult<Role> {
        match self.user_repository.find_current_user(user_id).await? {
            Some(user) => Ok(user.role),
            None => {
                // サインイン時に作られているはずのレコードが無い。基本ロールとして扱う
                tracing::warn!(%user_id, "user record not found; resolving to the base role");
                Ok(Role::default())
            }
        }
    }

    pub async fn check(&self, gate: AccessGate, user_id: UserId) -> AppResult<GateDecision> {
        let role = self.resolve_role(user_id).await?;
        Ok(gate.decide(RoleResolution::Resolved(role)))
    }

    pub async fn promote(&self, user_id: UserId) -> AppResult<()> {
        self.set_role(user_id, Role::Admin).await
    }

    pub async fn demote(&self, user_id: UserId) -> AppResult<()> {
        self.set_role(user_id, Role::User).await
    }

    pub async fn set_role(&self, user_id: UserId, role: Role) -> AppResult<()> {
        self.user_repository
            .update_role(UpdateUserRole::new(user_id, role))
            .await?;
        tracing::info!(%user_id, role = role.as_ref(), "user role updated");
        Ok(())
    }
}
