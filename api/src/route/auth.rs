use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::auth::{show_session, sign_in, sign_out};

pub fn routes() -> Router<AppRegistry> {
    let auth_router = Router::new()
        .route("/sign-in", post(sign_in))
        .route("/sign-out", post(sign_out))
        .route("/session", get(show_session));

    Router::new().nest("/auth", auth_router)
}
