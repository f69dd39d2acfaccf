pub mod calculator;
pub mod duration;
pub mod models;

pub use calculator::{compute, normalize_desired, projected_finish, watch_window};
pub use duration::format_time;
pub use models::{EstimateRequest, EstimateResult, Mode, PlaybackSpeed, WatchWindow};

use crate::error::EstimateError;
use crate::playlist::{PlaylistProvider, PlaylistSnapshot};

/// A computed answer together with the playlist it was computed from
#[derive(Debug, Clone)]
pub struct Estimate {
    pub snapshot: PlaylistSnapshot,
    pub result: EstimateResult,
}

/// Fetch the playlist and answer the request.
///
/// A provider failure is returned as-is and nothing is computed.
pub fn run(
    provider: &dyn PlaylistProvider,
    reference: &str,
    request: &EstimateRequest,
) -> Result<Estimate, EstimateError> {
    log::debug!("Fetching {} via {}", reference, provider.name());
    let snapshot = provider.fetch(reference)?;
    let result = compute(&snapshot, request);
    Ok(Estimate { snapshot, result })
}
