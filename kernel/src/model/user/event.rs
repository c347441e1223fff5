use crate::model::{id::UserId, role::Role};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateUser {
    pub email: String,
    pub display_name: Option<String>,
    pub role: Role,
}

#[derive(Debug, new)]
pub struct UpdateUserRole {
    pub user_id: UserId,
    pub role: Role,
}
