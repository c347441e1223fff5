use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

// 新規ユーザーは User ロールから始まる
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}
