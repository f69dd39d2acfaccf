use crate::OutputFormat;
use crate::config::Config;
use crate::error::EstimateError;
use crate::estimate::{self, EstimateRequest, EstimateResult, Mode, PlaybackSpeed};
use crate::playlist::PlaylistProvider;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Estimate options as given on the command line; `None` falls back to
/// the `[defaults]` config section.
#[derive(Debug, Clone, Default)]
pub struct EstimateArgs {
    pub playlist: String,
    pub watched: u64,
    pub desired: i64,
    pub mode: Option<String>,
    pub daily_hours: Option<f64>,
    pub speed: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EstimateReport<'a> {
    pub playlist: &'a str,
    pub title: Option<String>,
    pub total_videos: usize,
    pub request: &'a EstimateRequest,
    pub result: EstimateResult,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected_finish: Option<NaiveDate>,
}

/// Validate the raw arguments before anything is fetched.
pub fn build_request(
    config: &Config,
    args: &EstimateArgs,
) -> Result<EstimateRequest, EstimateError> {
    let mode: Mode = args
        .mode
        .as_deref()
        .unwrap_or(&config.defaults.mode)
        .parse()?;

    let speed = match args.speed.as_deref() {
        Some(raw) => raw.parse::<PlaybackSpeed>()?,
        None => PlaybackSpeed::new(config.defaults.speed)?,
    };

    let daily_hours = args.daily_hours.unwrap_or(config.defaults.daily_hours);
    if daily_hours.is_nan() {
        return Err(EstimateError::InvalidDailyHours(daily_hours));
    }

    Ok(EstimateRequest {
        watched_count: args.watched,
        desired_count: args.desired,
        mode,
        daily_hours,
        speed,
    })
}

pub fn render(
    config: &Config,
    provider: &dyn PlaylistProvider,
    args: &EstimateArgs,
    format: OutputFormat,
    today: NaiveDate,
) -> Result<String> {
    let request = build_request(config, args)?;
    let estimate = estimate::run(provider, &args.playlist, &request)?;
    let message = estimate.result.to_string();

    match format {
        OutputFormat::Text => Ok(message),
        OutputFormat::Json => {
            let projected_finish = match estimate.result {
                EstimateResult::Days { days } => estimate::projected_finish(days, today),
                _ => None,
            };
            let report = EstimateReport {
                playlist: &args.playlist,
                title: estimate.snapshot.title.clone(),
                total_videos: estimate.snapshot.total_video_count,
                request: &request,
                result: estimate.result,
                message,
                projected_finish,
            };
            serde_json::to_string_pretty(&report).context("Failed to serialize estimate")
        }
    }
}

pub fn estimate(
    config: &Config,
    provider: &dyn PlaylistProvider,
    args: &EstimateArgs,
    format: OutputFormat,
) -> Result<()> {
    let output = render(config, provider, args, format, Local::now().date_naive())?;
    println!("{}", output);
    Ok(())
}
