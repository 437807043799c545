//! Periodic trip fetching and the shared board state.
//!
//! A single background task drives the fetch cycle: immediately at startup
//! and then on every interval tick, it builds request parameters from the
//! configuration, asks the trip source, and publishes the outcome. Cycles
//! run to completion before the next tick is honored, so at most one fetch
//! is ever in flight.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use tokio::sync::watch::Receiver;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::trias::{MockTriasClient, TriasClient, TriasError, TripRequestParams, TripSummary};

/// Latest fetch outcome, as shown by the presentation layer.
///
/// A successful cycle replaces the trips and clears the error; a failed one
/// replaces the error and clears the trips. There is no partial state.
#[derive(Debug, Clone, Default)]
pub struct Board {
    /// Deduplicated summaries from the last successful fetch
    pub trips: Vec<TripSummary>,

    /// Human-readable message from the last failed fetch
    pub error: Option<String>,

    /// When the board last changed, successful or not
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Shared handle to the board, written by the fetch job and read by the web
/// layer.
pub type BoardHandle = Arc<RwLock<Board>>;

/// Create an empty board handle.
pub fn board_handle() -> BoardHandle {
    Arc::new(RwLock::new(Board::default()))
}

/// Where trips come from: the live endpoint or a canned response file.
pub enum TripSource {
    Live(TriasClient),
    Static(MockTriasClient),
}

impl TripSource {
    /// Fetch trips from whichever source is configured.
    pub async fn fetch_trips(
        &self,
        params: &TripRequestParams,
    ) -> Result<Vec<TripSummary>, TriasError> {
        match self {
            TripSource::Live(client) => client.fetch_trips(params).await,
            TripSource::Static(mock) => mock.fetch_trips(params).await,
        }
    }
}

/// Run one fetch cycle and publish the outcome to the board.
pub async fn fetch_cycle(config: &AppConfig, source: &TripSource, board: &BoardHandle) {
    let outcome = fetch_once(config, source).await;
    publish(board, outcome);
}

async fn fetch_once(
    config: &AppConfig,
    source: &TripSource,
) -> Result<Vec<TripSummary>, TriasError> {
    config.validate()?;
    let params = config.trip_params(Local::now().fixed_offset());
    source.fetch_trips(&params).await
}

fn publish(board: &BoardHandle, outcome: Result<Vec<TripSummary>, TriasError>) {
    let next = match outcome {
        Ok(trips) => {
            info!(count = trips.len(), "refreshed trip board");
            Board {
                trips,
                error: None,
                refreshed_at: Some(Utc::now()),
            }
        }
        Err(e) => {
            error!("trip fetch failed: {e}");
            Board {
                trips: Vec::new(),
                error: Some(e.to_string()),
                refreshed_at: Some(Utc::now()),
            }
        }
    };

    // The lock is held only for the swap. A PoisonError means a panic while
    // publishing, which nothing here can recover from.
    *board.write().unwrap() = next;
}

/// Spawn the background fetch job.
///
/// The first tick fires immediately (the board fills right after startup);
/// ticks missed while a slow fetch is in flight are coalesced rather than
/// bursted. The job exits when the shutdown channel flips to `true`.
pub fn spawn_fetch_job(
    config: AppConfig,
    source: TripSource,
    board: BoardHandle,
    mut recv_shutdown: Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(Duration::from_secs(config.update_interval_secs.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    fetch_cycle(&config, &source, &board).await;
                }
                _ = recv_shutdown.changed() => {
                    if *recv_shutdown.borrow() {
                        info!("stopping fetch job");
                        break;
                    }
                }
            }
        }
    })
}
