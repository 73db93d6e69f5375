use crate::playlist_url::{PlaylistUrlError, extract_playlist_id};
use crate::ports::spotify::{SourcePlaylist, SpotifyClient};
use crate::spotify_rs::error::SpotifyError;

#[derive(Debug, thiserror::Error)]
pub enum ReadPlaylistError {
    #[error(transparent)]
    InvalidUrl(#[from] PlaylistUrlError),
    #[error(transparent)]
    Spotify(#[from] SpotifyError),
}

/// Reads a source playlist given its share URL.
pub struct PlaylistReader<C: SpotifyClient> {
    client: C,
}

impl<C: SpotifyClient> PlaylistReader<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub async fn read(&self, playlist_url: &str) -> Result<SourcePlaylist, ReadPlaylistError> {
        let playlist_id = extract_playlist_id(playlist_url)?;
        tracing::info!("Fetching spotify playlist {}", playlist_id);

        let playlist = self.client.playlist(&playlist_id).await?;
        tracing::info!(
            "Fetched spotify playlist '{}' with {} tracks",
            playlist.name,
            playlist.tracks.len()
        );
        Ok(playlist)
    }
}
