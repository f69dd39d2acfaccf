pub mod models;
pub mod provider;
pub mod reference;
pub mod youtube;
pub mod ytdlp;

pub use models::PlaylistSnapshot;
pub use provider::{PlaylistProvider, StaticProvider};
pub use reference::PlaylistRef;
