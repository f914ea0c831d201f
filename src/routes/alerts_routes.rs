use axum::{Router, routing::{delete, get}};
use crate::{AppState, controllers::alerts_controller};

pub const ALERTS_PATH: &str = "/api/alerts";

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(ALERTS_PATH, get(alerts_controller::list_alerts).post(alerts_controller::create_alert))
        .route("/api/alerts/:id", delete(alerts_controller::delete_alert))
}
