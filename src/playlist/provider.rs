use crate::error::FetchError;
use crate::playlist::models::PlaylistSnapshot;
use std::collections::HashMap;

/// Source of playlist metadata.
pub trait PlaylistProvider {
    /// Short backend name used in logs
    fn name(&self) -> &str;

    /// Resolve a reference into per-video durations. A failure never
    /// yields a partial snapshot.
    fn fetch(&self, reference: &str) -> Result<PlaylistSnapshot, FetchError>;
}

impl<P: PlaylistProvider + ?Sized> PlaylistProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, reference: &str) -> Result<PlaylistSnapshot, FetchError> {
        (**self).fetch(reference)
    }
}

/// In-memory provider keyed by the raw reference string.
#[derive(Debug, Default, Clone)]
pub struct StaticProvider {
    playlists: HashMap<String, PlaylistSnapshot>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlist(mut self, reference: &str, snapshot: PlaylistSnapshot) -> Self {
        self.playlists.insert(reference.to_string(), snapshot);
        self
    }
}

impl PlaylistProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch(&self, reference: &str) -> Result<PlaylistSnapshot, FetchError> {
        self.playlists
            .get(reference)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(reference.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_provider_returns_known_playlist() {
        let provider = StaticProvider::new()
            .with_playlist("PLknown", PlaylistSnapshot::new(vec![10.0, 20.0]));
        let snapshot = provider.fetch("PLknown").unwrap();
        assert_eq!(snapshot.total_video_count, 2);
    }

    #[test]
    fn test_static_provider_unknown_is_not_found() {
        let provider: Box<dyn PlaylistProvider> = Box::new(StaticProvider::new());
        let err = provider.fetch("PLmissing").unwrap_err();
        assert!(matches!(err, FetchError::NotFound(_)));
    }
}
