//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
};
use tower_http::services::ServeDir;

use super::dto::BoardResponse;
use super::state::AppState;
use super::templates::BoardTemplate;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(board_page))
        .route("/health", get(health))
        .route("/api/trips", get(board_json))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The trip board page.
async fn board_page(State(state): State<AppState>) -> impl IntoResponse {
    let board = state.board.read().unwrap().clone();
    let template = BoardTemplate::new(state.title.as_str(), state.refresh_secs, &board);
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// The current board as JSON.
async fn board_json(State(state): State<AppState>) -> Json<BoardResponse> {
    let board = state.board.read().unwrap();
    Json(BoardResponse::from_board(&board))
}
