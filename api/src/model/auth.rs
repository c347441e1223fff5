use garde::Validate;
use kernel::model::{auth::AccessToken, id::UserId};
use kernel::service::identity::SignedIn;
use serde::{Deserialize, Serialize};

use super::user::UserResponse;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    // 外部の ID プロバイダが発行した ID トークン
    #[garde(length(min = 1))]
    pub id_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub user_id: UserId,
    pub access_token: String,
    pub first_sign_in: bool,
    pub user: UserResponse,
}

impl From<SignedIn> for AccessTokenResponse {
    fn from(value: SignedIn) -> Self {
        let SignedIn {
            user,
            access_token: AccessToken(access_token),
            first_sign_in,
        } = value;
        Self {
            user_id: user.user_id,
            access_token,
            first_sign_in,
            user: user.into(),
        }
    }
}
