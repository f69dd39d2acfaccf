use crate::error::EstimateError;
use crate::estimate::duration::format_time;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Which question an estimate answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Total watch time left in the window
    RemainingTime,
    /// Days needed when watching a fixed number of hours per day
    DaysAtDailyPace,
    /// Time needed for the videos between watched and desired
    TimeForSpecificCount,
}

impl Mode {
    pub const ALL: [Mode; 3] = [
        Mode::RemainingTime,
        Mode::DaysAtDailyPace,
        Mode::TimeForSpecificCount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::RemainingTime => "remaining",
            Mode::DaysAtDailyPace => "days",
            Mode::TimeForSpecificCount => "count",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remaining" | "remaining-time" | "total remaining hours" => Ok(Mode::RemainingTime),
            "days" | "days-at-daily-pace" | "days to finish at x hours/day" => {
                Ok(Mode::DaysAtDailyPace)
            }
            "count" | "time-for-specific-count" | "hours needed for specific videos" => {
                Ok(Mode::TimeForSpecificCount)
            }
            _ => Err(EstimateError::InvalidMode(s.to_string())),
        }
    }
}

/// Playback speed multiplier, always finite and greater than zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSpeed(f64);

impl PlaybackSpeed {
    pub const PRESETS: [f64; 5] = [1.0, 1.25, 1.5, 1.75, 2.0];

    pub fn new(multiplier: f64) -> Result<Self, EstimateError> {
        if multiplier.is_finite() && multiplier > 0.0 {
            Ok(Self(multiplier))
        } else {
            Err(EstimateError::InvalidSpeed(multiplier.to_string()))
        }
    }

    pub fn multiplier(&self) -> f64 {
        self.0
    }

    pub fn is_preset(&self) -> bool {
        Self::PRESETS.contains(&self.0)
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self(1.0)
    }
}

impl FromStr for PlaybackSpeed {
    type Err = EstimateError;

    /// Accepts "1.5" and "1.5x"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().trim_end_matches(['x', 'X']);
        let value: f64 = raw
            .parse()
            .map_err(|_| EstimateError::InvalidSpeed(s.to_string()))?;
        Self::new(value)
    }
}

impl Serialize for PlaybackSpeed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EstimateRequest {
    /// Videos already watched, assumed to be the first N in playlist order
    pub watched_count: u64,
    /// 0, negative or more than the playlist size mean "all videos"
    pub desired_count: i64,
    pub mode: Mode,
    /// Only used by [`Mode::DaysAtDailyPace`]
    pub daily_hours: f64,
    pub speed: PlaybackSpeed,
}

impl EstimateRequest {
    pub fn new(mode: Mode) -> Self {
        Self {
            watched_count: 0,
            desired_count: 0,
            mode,
            daily_hours: 1.0,
            speed: PlaybackSpeed::default(),
        }
    }
}

/// The videos selected for an estimate and their combined length at 1x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WatchWindow {
    pub videos_to_watch: u64,
    pub seconds: f64,
    /// Summed from real durations rather than the playlist average
    pub exact: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimateResult {
    Remaining { seconds: f64 },
    Days { days: f64 },
    UnlimitedDays,
    SpecificCount { videos: u64, seconds: f64 },
}

impl fmt::Display for EstimateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateResult::Remaining { seconds } => {
                write!(f, "Remaining Time: {}", format_time(*seconds))
            }
            // The day count is shown as a duration, 1.5 days reads "1d 12h 0m 0s"
            EstimateResult::Days { days } => {
                write!(f, "Days Needed: {}", format_time(days * 86_400.0))
            }
            EstimateResult::UnlimitedDays => f.write_str("Unlimited days needed"),
            EstimateResult::SpecificCount { videos, seconds } => write!(
                f,
                "Time Needed for {} Videos: {}",
                videos,
                format_time(*seconds)
            ),
        }
    }
}
