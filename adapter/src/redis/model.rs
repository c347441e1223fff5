use std::str::FromStr;

use kernel::model::{auth::AccessToken, id::UserId};
use shared::error::AppError;

pub trait RedisKey {
    type Value: RedisValue + TryFrom<String, Error = AppError>;
    fn inner(&self) -> String;
}

pub trait RedisValue {
    fn inner(&self) -> String;
}

// アクセストークンをキーにしてユーザー ID を保存する
pub struct SessionKey(String);

impl From<&AccessToken> for SessionKey {
    fn from(token: &AccessToken) -> Self {
        Self(token.0.clone())
    }
}

impl RedisKey for SessionKey {
    type Value = SessionUserId;

    fn inner(&self) -> String {
        format!("session:{}", self.0)
    }
}

pub struct SessionUserId(pub UserId);

impl RedisValue for SessionUserId {
    fn inner(&self) -> String {
        self.0.to_string()
    }
}

impl TryFrom<String> for SessionUserId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self(UserId::from_str(&value)?))
    }
}
