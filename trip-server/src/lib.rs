//! TRIAS trip board server.
//!
//! Periodically fetches trip itineraries between two fixed stops from a
//! TRIAS journey-planning endpoint and serves the top results as a small
//! auto-refreshing web board.

pub mod config;
pub mod fetch;
pub mod trias;
pub mod web;
