use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::admin::{
    change_role, create_event, show_admin_event_list, show_admin_user_list, update_event,
};

pub fn build_admin_routers() -> Router<AppRegistry> {
    let admin_routers = Router::new()
        .route("/events", get(show_admin_event_list).post(create_event))
        .route("/events/:event_id", put(update_event))
        .route("/users", get(show_admin_user_list))
        .route("/users/:user_id/role", put(change_role));

    Router::new().nest("/admin", admin_routers)
}
