pub mod commands;
pub mod config;
pub mod error;
pub mod estimate;
pub mod platform;
pub mod playlist;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, ValueEnum, Debug, Default, Serialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
