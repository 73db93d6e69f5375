use std::path::Path;

use reqwest::Client;

use crate::ports::youtube::{Visibility, YoutubeClient, YoutubePlaylist};
use crate::youtube_rs::auth::{AuthError, OAuthClient, authorize};
use crate::youtube_rs::client::YoutubeClient as YoutubeApi;
use crate::youtube_rs::error::YoutubeError;
use crate::youtube_rs::token_store::TokenStore;

pub struct YoutubeHttpAdapter {
    api: YoutubeApi,
}

impl YoutubeHttpAdapter {
    /// Authorizes against the user's YouTube account, reusing or refreshing the token in
    /// `store` and falling back to interactive consent.
    pub async fn authenticate(
        client_secrets_file: &Path,
        store: &TokenStore,
    ) -> Result<Self, AuthError> {
        let oauth_client = OAuthClient::from_file(client_secrets_file)?;
        let client = Client::new();
        let access_token = authorize(&client, &oauth_client, store).await?;

        Ok(Self {
            api: YoutubeApi::new(access_token, client),
        })
    }
}

#[async_trait::async_trait]
impl YoutubeClient for YoutubeHttpAdapter {
    async fn search_videos(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<String>, YoutubeError> {
        Ok(self.api.search(query, max_results).await?.video_ids())
    }

    async fn create_playlist(
        &self,
        title: &str,
        description: &str,
        visibility: Visibility,
    ) -> Result<YoutubePlaylist, YoutubeError> {
        let playlist = self
            .api
            .insert_playlist(title, description, visibility.as_str())
            .await?;

        let id = playlist.id.ok_or_else(|| YoutubeError::Api {
            status: 200,
            message: "Created playlist response had no id".to_string(),
        })?;
        Ok(YoutubePlaylist {
            id,
            title: playlist.snippet.title,
        })
    }

    async fn insert_playlist_item(
        &self,
        playlist_id: &str,
        video_id: &str,
    ) -> Result<(), YoutubeError> {
        self.api.insert_playlist_item(playlist_id, video_id).await
    }
}
