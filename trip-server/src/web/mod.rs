//! Web layer for the trip board.
//!
//! Serves the board as an auto-refreshing HTML page and as a JSON API.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::BoardResponse;
pub use routes::create_router;
pub use state::AppState;
