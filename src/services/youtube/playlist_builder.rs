use std::sync::Arc;

use crate::ports::youtube::{Visibility, YoutubeClient, YoutubePlaylist};
use crate::youtube_rs::error::YoutubeError;

/// Creates the destination playlist and appends videos to it, one request per video.
pub struct PlaylistBuilder<C: YoutubeClient> {
    client: Arc<C>,
}

impl<C: YoutubeClient> PlaylistBuilder<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub async fn create(
        &self,
        title: &str,
        description: &str,
        visibility: Visibility,
    ) -> Result<YoutubePlaylist, YoutubeError> {
        let playlist = self
            .client
            .create_playlist(title, description, visibility)
            .await?;
        tracing::info!(
            "Created {} YouTube playlist '{}' ({})",
            visibility.as_str(),
            playlist.title,
            playlist.id
        );
        Ok(playlist)
    }

    pub async fn append(&self, playlist_id: &str, video_id: &str) -> Result<(), YoutubeError> {
        self.client.insert_playlist_item(playlist_id, video_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::youtube::MockYoutubeClient;

    #[tokio::test]
    async fn test_create_passes_visibility() {
        let mut client = MockYoutubeClient::new();
        client
            .expect_create_playlist()
            .withf(|title, description, visibility| {
                title == "Spotify Playlist: Road Trip"
                    && description == "Playlist converted from Spotify"
                    && *visibility == Visibility::Unlisted
            })
            .times(1)
            .returning(|title, _, _| {
                Ok(YoutubePlaylist {
                    id: "PL1".into(),
                    title: title.to_string(),
                })
            });

        let builder = PlaylistBuilder::new(Arc::new(client));
        let playlist = builder
            .create(
                "Spotify Playlist: Road Trip",
                "Playlist converted from Spotify",
                Visibility::Unlisted,
            )
            .await
            .unwrap();

        assert_eq!(playlist.id, "PL1");
    }

    #[tokio::test]
    async fn test_append_failures_are_independent() {
        let mut client = MockYoutubeClient::new();
        client
            .expect_insert_playlist_item()
            .withf(|_, video_id| video_id == "bad")
            .returning(|_, _| {
                Err(YoutubeError::Api {
                    status: 404,
                    message: "Video not found.".into(),
                })
            });
        client
            .expect_insert_playlist_item()
            .withf(|_, video_id| video_id == "good")
            .returning(|_, _| Ok(()));

        let builder = PlaylistBuilder::new(Arc::new(client));

        assert!(builder.append("PL1", "bad").await.is_err());
        assert!(builder.append("PL1", "good").await.is_ok());
    }
}
