//! Playlist metadata through the `yt-dlp` executable.
//!
//! `yt-dlp -J` prints the whole playlist as one JSON document. Full
//! extraction resolves every video individually; the flat listing is much
//! faster but some extractors leave durations out of it.

use crate::error::FetchError;
use crate::playlist::models::PlaylistSnapshot;
use crate::playlist::provider::PlaylistProvider;
use crate::playlist::reference::PlaylistRef;
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Deserialize)]
struct YtDlpPlaylist {
    title: Option<String>,
    entries: Option<Vec<Option<YtDlpEntry>>>,
}

#[derive(Debug, Deserialize)]
struct YtDlpEntry {
    duration: Option<f64>,
}

pub struct YtDlpProvider {
    binary: PathBuf,
    flat: bool,
    timeout: Duration,
}

impl YtDlpProvider {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            flat: false,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the flat playlist listing instead of resolving every video
    pub fn flat_playlist(mut self, flat: bool) -> Self {
        self.flat = flat;
        self
    }

    fn args(&self, url: &str) -> Vec<String> {
        let mut args = vec!["-J".to_string(), "--no-warnings".to_string()];
        if self.flat {
            args.push("--flat-playlist".to_string());
        }
        args.push(url.to_string());
        args
    }

    fn run(&self, url: &str) -> Result<String, FetchError> {
        log::debug!("Running {} {:?}", self.binary.display(), self.args(url));

        let mut child = Command::new(&self.binary)
            .args(self.args(url))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                FetchError::Extractor(format!("failed to start {}: {}", self.binary.display(), e))
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = wait_with_deadline(&mut child, self.timeout)?;
        let stdout = join(stdout);
        let stderr = join(stderr);

        if !status.success() {
            let message = stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .unwrap_or("no error output")
                .trim()
                .to_string();
            log::debug!("yt-dlp exited with {}: {}", status, message);
            if message.contains("does not exist") || message.contains("Unsupported URL") {
                return Err(FetchError::NotFound(message));
            }
            return Err(FetchError::Extractor(message));
        }

        Ok(stdout)
    }
}

impl PlaylistProvider for YtDlpProvider {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    fn fetch(&self, reference: &str) -> Result<PlaylistSnapshot, FetchError> {
        let playlist = PlaylistRef::parse(reference)?;
        let output = self.run(&playlist.url)?;
        parse_playlist_json(&output)
    }
}

/// Turn `yt-dlp -J` output into a snapshot.
///
/// Unavailable entries (null or without a duration) count as 0 seconds.
/// A document without `entries` is a single video, not a playlist, and
/// yields an empty snapshot.
pub fn parse_playlist_json(json: &str) -> Result<PlaylistSnapshot, FetchError> {
    let playlist: YtDlpPlaylist = serde_json::from_str(json)?;

    let entries = match playlist.entries {
        Some(entries) => entries,
        None => {
            log::warn!("yt-dlp output has no playlist entries; treating as empty");
            Vec::new()
        }
    };

    let snapshot = PlaylistSnapshot::from_entries(
        entries
            .into_iter()
            .map(|entry| entry.and_then(|e| e.duration)),
    )
    .with_title(playlist.title);

    if snapshot.unknown_durations > 0 {
        log::warn!(
            "{} of {} videos have no duration; counted as 0",
            snapshot.unknown_durations,
            snapshot.total_video_count
        );
    }

    Ok(snapshot)
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            if let Err(e) = pipe.read_to_end(&mut buf) {
                log::warn!("Failed to read yt-dlp output: {}", e);
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join(handle: JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}

fn wait_with_deadline(
    child: &mut Child,
    timeout: Duration,
) -> Result<std::process::ExitStatus, FetchError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(FetchError::Timeout(timeout));
        }
        thread::sleep(POLL_INTERVAL);
    }
}
