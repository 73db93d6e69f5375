use serde::{Deserialize, Serialize};

use crate::ports::spotify::{SourcePlaylist, Track};

/// Spotify client credentials token response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

/// Spotify paging object; `next` is the absolute URL of the following page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPage<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

/// Spotify playlist from API, with the first page of its items inlined
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPlaylist {
    pub name: String,
    pub tracks: SpotifyPage<SpotifyPlaylistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPlaylistItem {
    /// Null for tracks that were removed from Spotify
    pub track: Option<SpotifyPlayable>,
}

/// A track or podcast episode inside a playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPlayable {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

impl SpotifyPlayable {
    pub fn is_track(&self) -> bool {
        self.kind == "track"
    }
}

impl From<SpotifyPlayable> for Track {
    fn from(playable: SpotifyPlayable) -> Self {
        Track::new(
            playable.name,
            playable
                .artists
                .into_iter()
                .map(|artist| artist.name)
                .collect(),
        )
    }
}

impl From<SpotifyPlaylist> for SourcePlaylist {
    fn from(playlist: SpotifyPlaylist) -> Self {
        SourcePlaylist {
            name: playlist.name,
            tracks: playlist
                .tracks
                .items
                .into_iter()
                .filter_map(|item| item.track)
                .filter(SpotifyPlayable::is_track)
                .map(Track::from)
                .collect(),
        }
    }
}
