use crate::error::FetchError;
use crate::playlist::models::PlaylistSnapshot;
use crate::playlist::provider::PlaylistProvider;
use crate::playlist::reference::PlaylistRef;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/youtube/v3";
const PAGE_SIZE: usize = 50;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemsPage {
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    pub content_details: PlaylistItemDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemDetails {
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
pub struct VideosPage {
    #[serde(default)]
    pub items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub content_details: Option<VideoDetails>,
}

#[derive(Debug, Deserialize)]
pub struct VideoDetails {
    /// ISO 8601, e.g. "PT1H2M3S"
    pub duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistsPage {
    #[serde(default)]
    items: Vec<PlaylistResource>,
}

#[derive(Debug, Deserialize)]
struct PlaylistResource {
    snippet: Option<PlaylistSnippet>,
}

#[derive(Debug, Deserialize)]
struct PlaylistSnippet {
    title: Option<String>,
}

/// YouTube Data API v3 backend
pub struct YouTubeApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl YouTubeApiClient {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.to_string(),
            timeout,
        })
    }

    /// Helper for testing to override base URL (e.g. wiremock)
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        playlist_id: &str,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(self.timeout)
                } else {
                    e.into()
                }
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(playlist_id.to_string()));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            log::debug!("YouTube API {} returned {}: {}", endpoint, status, body);
            return Err(FetchError::Network(format!(
                "YouTube API {} error: status {}",
                endpoint, status
            )));
        }

        let text = response.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Video ids of the playlist, in playlist order.
    pub fn playlist_video_ids(&self, playlist_id: &str) -> Result<Vec<String>, FetchError> {
        let max_results = PAGE_SIZE.to_string();
        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;
        let mut seen_tokens = HashSet::new();

        loop {
            let mut query = vec![
                ("part", "contentDetails"),
                ("playlistId", playlist_id),
                ("maxResults", max_results.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let page: PlaylistItemsPage = self.get("playlistItems", &query, playlist_id)?;
            ids.extend(page.items.into_iter().map(|i| i.content_details.video_id));

            match page.next_page_token {
                Some(token) if !token.is_empty() => {
                    if !seen_tokens.insert(token.clone()) {
                        log::warn!(
                            "Playlist {} repeated page token {}; stopping pagination",
                            playlist_id,
                            token
                        );
                        break;
                    }
                    page_token = Some(token);
                }
                _ => break,
            }
        }

        log::debug!("Playlist {} lists {} videos", playlist_id, ids.len());
        Ok(ids)
    }

    /// Durations for `ids` in the same order; `None` when the API
    /// did not return the video or its duration.
    pub fn video_durations(
        &self,
        ids: &[String],
        playlist_id: &str,
    ) -> Result<Vec<Option<f64>>, FetchError> {
        let mut known: HashMap<String, f64> = HashMap::new();

        for chunk in ids.chunks(PAGE_SIZE) {
            let joined = chunk.join(",");
            let page: VideosPage = self.get(
                "videos",
                &[("part", "contentDetails"), ("id", joined.as_str())],
                playlist_id,
            )?;
            for video in page.items {
                let secs = video
                    .content_details
                    .and_then(|d| d.duration)
                    .and_then(|d| parse_iso8601_duration(&d));
                if let Some(secs) = secs {
                    known.insert(video.id, secs as f64);
                }
            }
        }

        Ok(ids.iter().map(|id| known.get(id).copied()).collect())
    }

    fn playlist_title(&self, playlist_id: &str) -> Result<Option<String>, FetchError> {
        let page: PlaylistsPage = self.get(
            "playlists",
            &[("part", "snippet"), ("id", playlist_id)],
            playlist_id,
        )?;
        Ok(page
            .items
            .into_iter()
            .next()
            .and_then(|p| p.snippet)
            .and_then(|s| s.title))
    }
}

impl PlaylistProvider for YouTubeApiClient {
    fn name(&self) -> &str {
        "youtube-api"
    }

    fn fetch(&self, reference: &str) -> Result<PlaylistSnapshot, FetchError> {
        let playlist = PlaylistRef::parse(reference)?;
        let id = playlist.require_id()?;

        let ids = self.playlist_video_ids(id)?;
        let title = self.playlist_title(id)?;
        if ids.is_empty() && title.is_none() {
            // The API answers an unknown playlist id with an empty list
            return Err(FetchError::NotFound(id.to_string()));
        }

        let durations = self.video_durations(&ids, id)?;
        Ok(PlaylistSnapshot::from_entries(durations).with_title(title))
    }
}

/// Parse an ISO 8601 duration as used by the YouTube API ("PT1H2M3S",
/// "P1DT2H", "P0D") into whole seconds.
pub fn parse_iso8601_duration(s: &str) -> Option<u64> {
    let rest = s.strip_prefix('P')?;
    let (date, time) = match rest.split_once('T') {
        Some((d, t)) => (d, Some(t)),
        None => (rest, None),
    };

    let mut total = parse_units(date, &[('W', 604_800), ('D', 86_400)])?;
    if let Some(time) = time {
        if time.is_empty() {
            return None;
        }
        total = total.checked_add(parse_units(time, &[('H', 3_600), ('M', 60), ('S', 1)])?)?;
    }
    Some(total)
}

fn parse_units(part: &str, units: &[(char, u64)]) -> Option<u64> {
    let mut total = 0u64;
    let mut number = String::new();
    let mut next_unit = 0;

    for c in part.chars() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
            continue;
        }
        let idx = units[next_unit..].iter().position(|(u, _)| *u == c)? + next_unit;
        if number.is_empty() {
            return None;
        }
        let value: f64 = number.parse().ok()?;
        let secs = value * units[idx].1 as f64;
        if !secs.is_finite() || secs >= u64::MAX as f64 {
            return None;
        }
        total = total.checked_add(secs as u64)?;
        number.clear();
        next_unit = idx + 1;
    }

    if number.is_empty() { Some(total) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso8601_common_forms() {
        assert_eq!(parse_iso8601_duration("PT4M13S"), Some(253));
        assert_eq!(parse_iso8601_duration("PT1H2M3S"), Some(3723));
        assert_eq!(parse_iso8601_duration("PT10M"), Some(600));
        assert_eq!(parse_iso8601_duration("PT45S"), Some(45));
        assert_eq!(parse_iso8601_duration("P1DT1H1M1S"), Some(90061));
        assert_eq!(parse_iso8601_duration("P0D"), Some(0));
        assert_eq!(parse_iso8601_duration("PT0S"), Some(0));
    }

    #[test]
    fn test_parse_iso8601_rejects_malformed() {
        assert_eq!(parse_iso8601_duration(""), None);
        assert_eq!(parse_iso8601_duration("4M13S"), None);
        assert_eq!(parse_iso8601_duration("PT"), None);
        assert_eq!(parse_iso8601_duration("PT5"), None);
        assert_eq!(parse_iso8601_duration("PTS"), None);
        assert_eq!(parse_iso8601_duration("PT1S2M"), None);
    }

    #[test]
    fn test_parse_iso8601_rejects_overflow() {
        assert_eq!(
            parse_iso8601_duration("P99999999999999999999DT99999999999999999999H"),
            None
        );
        assert_eq!(parse_iso8601_duration("P30000000000000W30000000000000D"), None);
        assert_eq!(parse_iso8601_duration(&format!("PT{}S", "9".repeat(400))), None);
    }

    #[test]
    fn test_deserialize_playlist_items_page() {
        let json = serde_json::json!({
            "nextPageToken": "CDIQAA",
            "pageInfo": { "totalResults": 2, "resultsPerPage": 50 },
            "items": [
                { "contentDetails": { "videoId": "vid1" } },
                { "contentDetails": { "videoId": "vid2" } }
            ]
        });
        let page: PlaylistItemsPage = serde_json::from_value(json).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("CDIQAA"));
        assert_eq!(page.items[1].content_details.video_id, "vid2");
    }
}
