use crate::estimate::models::{EstimateRequest, EstimateResult, Mode, WatchWindow};
use crate::playlist::PlaylistSnapshot;
use chrono::{Days, NaiveDate};

const SECS_PER_HOUR: f64 = 3_600.0;

/// Clamp the desired count to the playlist size; anything outside
/// `1..=total` means the whole playlist.
pub fn normalize_desired(desired: i64, total: usize) -> u64 {
    let total = total as u64;
    if desired <= 0 || desired as u64 > total {
        total
    } else {
        desired as u64
    }
}

/// Select videos `[watched, desired)` and sum their length.
///
/// When both bounds fall inside the known durations the real lengths
/// are summed. Otherwise the playlist average stands in for each video.
pub fn watch_window(snapshot: &PlaylistSnapshot, watched: u64, desired: i64) -> WatchWindow {
    let desired = normalize_desired(desired, snapshot.total_video_count);
    let known = snapshot.durations_secs.len() as u64;

    if watched < known && desired <= known {
        let (start, end) = (watched as usize, desired as usize);
        let seconds = if start < end {
            snapshot.durations_secs[start..end].iter().sum()
        } else {
            0.0
        };
        return WatchWindow {
            videos_to_watch: desired.saturating_sub(watched),
            seconds,
            exact: true,
        };
    }

    let videos_to_watch = desired.saturating_sub(watched);
    if videos_to_watch > 0 {
        log::warn!(
            "Durations unavailable for videos {}..{}; using the playlist average",
            watched,
            desired
        );
    }
    WatchWindow {
        videos_to_watch,
        seconds: videos_to_watch as f64 * snapshot.average_video_length(),
        exact: false,
    }
}

/// Answer `request` against an already fetched playlist.
pub fn compute(snapshot: &PlaylistSnapshot, request: &EstimateRequest) -> EstimateResult {
    let window = watch_window(snapshot, request.watched_count, request.desired_count);
    let time_needed = window.seconds / request.speed.multiplier();

    log::debug!(
        "Window covers {} videos ({:.0}s at 1x, exact: {}), {:.0}s at {}x",
        window.videos_to_watch,
        window.seconds,
        window.exact,
        time_needed,
        request.speed.multiplier()
    );

    match request.mode {
        Mode::RemainingTime => EstimateResult::Remaining {
            seconds: time_needed,
        },
        Mode::DaysAtDailyPace => {
            if request.daily_hours > 0.0 {
                EstimateResult::Days {
                    days: time_needed / (request.daily_hours * SECS_PER_HOUR),
                }
            } else {
                EstimateResult::UnlimitedDays
            }
        }
        Mode::TimeForSpecificCount => EstimateResult::SpecificCount {
            videos: window.videos_to_watch,
            seconds: time_needed,
        },
    }
}

/// Calendar date the playlist is finished when starting on `today`,
/// counting a partial day as a full one.
pub fn projected_finish(days: f64, today: NaiveDate) -> Option<NaiveDate> {
    if !days.is_finite() || days < 0.0 {
        return None;
    }
    today.checked_add_days(Days::new(days.ceil() as u64))
}
