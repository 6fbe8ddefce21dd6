//! HTTP routing: server-rendered pages plus the `/api` JSON routes

pub mod health;
pub mod plan;
pub mod trips;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::planner;
use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(plan::form))
        .route("/plan", post(plan::submit))
        .route("/trips/:id", get(trips::show))
        .route("/trips/:id/expenses", post(trips::add_expense))
        .route("/health", get(health::health))
        .nest("/api", planner::router().layer(CorsLayer::permissive()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
