pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{analysis, archive, chat, progress};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis + follow-up chat
        .route("/api/v1/analysis", post(analysis::handlers::handle_generate))
        .route("/api/v1/chat", post(chat::handlers::handle_chat))
        // Report archive
        .route("/api/v1/reports", get(archive::handlers::handle_list_reports))
        .route(
            "/api/v1/reports/:name/load",
            post(archive::handlers::handle_load_report),
        )
        // Tabular progress data
        .route(
            "/api/v1/progress/upload",
            post(progress::handlers::handle_upload),
        )
        .route("/api/v1/progress", get(progress::handlers::handle_get_table))
        .route(
            "/api/v1/progress/chart",
            get(progress::handlers::handle_chart),
        )
        .with_state(state)
}
