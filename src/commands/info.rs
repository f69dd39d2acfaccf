use crate::OutputFormat;
use crate::error::EstimateError;
use crate::estimate::{PlaybackSpeed, format_time};
use crate::playlist::{PlaylistProvider, PlaylistSnapshot};
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PlaylistSummary {
    pub playlist: String,
    pub title: Option<String>,
    pub total_videos: usize,
    pub total_seconds: f64,
    pub average_seconds: f64,
    pub unknown_durations: usize,
}

impl PlaylistSummary {
    pub fn from_snapshot(reference: &str, snapshot: &PlaylistSnapshot) -> Self {
        Self {
            playlist: reference.to_string(),
            title: snapshot.title.clone(),
            total_videos: snapshot.total_video_count,
            total_seconds: snapshot.total_duration(),
            average_seconds: snapshot.average_video_length(),
            unknown_durations: snapshot.unknown_durations,
        }
    }

    fn to_text(&self) -> String {
        let mut lines = vec![
            format!("Playlist: {}", self.title.as_deref().unwrap_or(&self.playlist)),
            format!("Videos: {}", self.total_videos),
            format!("Total Duration: {}", format_time(self.total_seconds)),
            format!("Average Length: {}", format_time(self.average_seconds)),
        ];
        if self.unknown_durations > 0 {
            lines.push(format!(
                "Unknown Durations: {} (counted as 0)",
                self.unknown_durations
            ));
        }
        for speed in PlaybackSpeed::PRESETS.iter().skip(1) {
            lines.push(format!(
                "At {}x: {}",
                speed,
                format_time(self.total_seconds / speed)
            ));
        }
        lines.join("\n")
    }
}

pub fn render(
    provider: &dyn PlaylistProvider,
    reference: &str,
    format: OutputFormat,
) -> Result<String> {
    log::debug!("Fetching {} via {}", reference, provider.name());
    let snapshot = provider.fetch(reference).map_err(EstimateError::from)?;
    let summary = PlaylistSummary::from_snapshot(reference, &snapshot);

    match format {
        OutputFormat::Text => Ok(summary.to_text()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&summary).context("Failed to serialize playlist summary")
        }
    }
}

pub fn info(provider: &dyn PlaylistProvider, reference: &str, format: OutputFormat) -> Result<()> {
    println!("{}", render(provider, reference, format)?);
    Ok(())
}
