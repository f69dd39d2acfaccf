use serde::Serialize;

/// Per-video durations of a playlist, in playlist order.
///
/// Built fresh for every query. Providers keep
/// `durations_secs.len() == total_video_count` by reporting unknown
/// durations as 0, but the calculator tolerates a mismatch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaylistSnapshot {
    pub title: Option<String>,
    pub total_video_count: usize,
    pub durations_secs: Vec<f64>,
    /// Entries whose duration was unknown and reported as 0
    pub unknown_durations: usize,
}

impl PlaylistSnapshot {
    pub fn new(durations_secs: Vec<f64>) -> Self {
        Self {
            title: None,
            total_video_count: durations_secs.len(),
            durations_secs,
            unknown_durations: 0,
        }
    }

    /// Build from provider entries where `None` means the duration is unknown.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut unknown = 0;
        let durations: Vec<f64> = entries
            .into_iter()
            .map(|d| match d {
                Some(secs) if secs.is_finite() && secs >= 0.0 => secs,
                _ => {
                    unknown += 1;
                    0.0
                }
            })
            .collect();

        Self {
            unknown_durations: unknown,
            ..Self::new(durations)
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn total_duration(&self) -> f64 {
        self.durations_secs.iter().sum()
    }

    /// Mean video length over the reported count, 0 for an empty playlist.
    pub fn average_video_length(&self) -> f64 {
        if self.total_video_count == 0 {
            return 0.0;
        }
        self.total_duration() / self.total_video_count as f64
    }
}
