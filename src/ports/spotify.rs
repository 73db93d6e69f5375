use crate::spotify_rs::error::SpotifyError;

/// Decoupled representation of a Spotify track: the title plus its artist names in credit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub artists: Vec<String>,
}

impl Track {
    pub fn new(title: impl Into<String>, artists: Vec<String>) -> Self {
        Self {
            title: title.into(),
            artists,
        }
    }

    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(String::as_str)
    }

    /// Artist credits joined for display, e.g. `"Artist X, Artist Y"`.
    pub fn artist_credits(&self) -> String {
        self.artists.join(", ")
    }
}

/// Decoupled representation of a Spotify playlist with its tracks in playlist order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePlaylist {
    pub name: String,
    pub tracks: Vec<Track>,
}

/// Port trait wrapping the Spotify API capabilities used by business logic.
///
/// Implementations live in `services::spotify::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SpotifyClient: Send + Sync {
    async fn playlist(&self, playlist_id: &str) -> Result<SourcePlaylist, SpotifyError>;
}
