pub mod health;
pub mod typeset;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/typeset", post(typeset::handle_typeset))
        .route("/api/v1/classify", post(typeset::handle_classify))
        .route("/api/v1/keywords/match", post(typeset::handle_keyword_match))
        .route("/api/v1/keywords/density", post(typeset::handle_keyword_density))
        .with_state(state)
}
