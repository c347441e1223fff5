use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    event::{show_event, show_event_list},
    registration::{register_for_event, show_registration_status},
};

pub fn build_event_routers() -> Router<AppRegistry> {
    let events_routers = Router::new()
        .route("/", get(show_event_list))
        .route("/:event_id", get(show_event))
        .route("/:event_id/registrations", post(register_for_event))
        .route("/:event_id/registration", get(show_registration_status));

    Router::new().nest("/events", events_routers)
}
