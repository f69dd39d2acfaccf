use crate::error::FetchError;
use reqwest::Url;

const PLAYLIST_URL: &str = "https://www.youtube.com/playlist";

/// A user-supplied playlist reference: a bare id or a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRef {
    /// YouTube playlist id, when one could be found
    pub id: Option<String>,
    /// URL handed to extractors
    pub url: String,
}

impl PlaylistRef {
    pub fn parse(input: &str) -> Result<Self, FetchError> {
        let input = input.trim().trim_matches('"');
        if input.is_empty() {
            return Err(FetchError::InvalidReference(
                "empty playlist reference".to_string(),
            ));
        }

        if input.contains("://") {
            let url = Url::parse(input)
                .map_err(|e| FetchError::InvalidReference(format!("{}: {}", input, e)))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(FetchError::InvalidReference(format!(
                    "unsupported scheme '{}'",
                    url.scheme()
                )));
            }
            let id = url
                .query_pairs()
                .find(|(k, _)| k == "list")
                .map(|(_, v)| v.into_owned())
                .filter(|v| is_playlist_id(v));
            return Ok(Self {
                id,
                url: url.to_string(),
            });
        }

        if is_playlist_id(input) {
            return Ok(Self {
                id: Some(input.to_string()),
                url: format!("{}?list={}", PLAYLIST_URL, input),
            });
        }

        Err(FetchError::InvalidReference(input.to_string()))
    }

    /// The playlist id, required by id-based backends.
    pub fn require_id(&self) -> Result<&str, FetchError> {
        self.id.as_deref().ok_or_else(|| {
            FetchError::InvalidReference(format!("no playlist id in {}", self.url))
        })
    }
}

fn is_playlist_id(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
