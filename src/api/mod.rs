mod handlers;

use axum::{routing::get, routing::post, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::registry::Registry;

pub fn create_router(registry: Registry) -> Router {
    let api = Router::new()
        // Gifts
        .route("/presentes", get(handlers::list_gifts))
        .route("/reservar", post(handlers::reserve_gift))
        .route("/cancelar-reserva", post(handlers::cancel_reservation))
        // Reservation records
        .route("/pessoas", get(handlers::list_people))
        .route("/resumo", get(handlers::guest_summary))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api", api)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(registry)
}
