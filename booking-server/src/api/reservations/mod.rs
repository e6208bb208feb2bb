//! Reservation API 模块

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // Auto table selection
        .route("/auto", post(handler::auto_create))
        // Lookup by human confirmation code
        .route("/code/{code}", get(handler::get_by_code))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::cancel),
        )
        // Staff lifecycle transitions
        .route("/{id}/status", patch(handler::set_status))
}
