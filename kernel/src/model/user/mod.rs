use crate::model::{
    id::UserId,
    list::{Cursored, SortOrder},
    role::Role,
};
use serde::{Deserialize, Serialize};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
    pub display_name: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// ユーザー一覧はメールアドレスの昇順、同一アドレスは ID で並べる
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserCursor {
    pub email: String,
    pub user_id: UserId,
}

impl Cursored for User {
    type Cursor = UserCursor;

    const ORDER: SortOrder = SortOrder::Ascending;

    fn cursor(&self) -> Self::Cursor {
        UserCursor {
            email: self.email.clone(),
            user_id: self.user_id,
        }
    }
}
