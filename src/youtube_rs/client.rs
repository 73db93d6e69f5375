use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::youtube_rs::error::{YoutubeError, classify_error};
use crate::youtube_rs::types::{
    Playlist, PlaylistItem, PlaylistSnippet, PlaylistStatus, SearchListResponse,
};

const YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// YouTube Data API v3 client authorized with a user OAuth access token
pub struct YoutubeClient {
    access_token: String,
    client: Client,
}

impl YoutubeClient {
    pub fn new(access_token: String, client: Client) -> Self {
        Self {
            access_token,
            client,
        }
    }

    /// `search.list` restricted to videos. Costs 100 quota units per call.
    pub async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<SearchListResponse, YoutubeError> {
        let max_results = max_results.to_string();
        let request = self
            .client
            .get(format!("{}/search", YOUTUBE_API_URL))
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("q", query),
                ("maxResults", max_results.as_str()),
            ]);

        self.send_json(request).await
    }

    /// `playlists.insert`; returns the created playlist with its id filled in.
    pub async fn insert_playlist(
        &self,
        title: &str,
        description: &str,
        privacy_status: &str,
    ) -> Result<Playlist, YoutubeError> {
        let body = Playlist {
            id: None,
            snippet: PlaylistSnippet {
                title: title.to_string(),
                description: description.to_string(),
            },
            status: Some(PlaylistStatus {
                privacy_status: privacy_status.to_string(),
            }),
        };
        let request = self
            .client
            .post(format!("{}/playlists", YOUTUBE_API_URL))
            .query(&[("part", "snippet,status")])
            .json(&body);

        self.send_json(request).await
    }

    /// `playlistItems.insert`, appending the video at the end of the playlist.
    pub async fn insert_playlist_item(
        &self,
        playlist_id: &str,
        video_id: &str,
    ) -> Result<(), YoutubeError> {
        let request = self
            .client
            .post(format!("{}/playlistItems", YOUTUBE_API_URL))
            .query(&[("part", "snippet")])
            .json(&PlaylistItem::video(playlist_id, video_id));

        self.send(request).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, YoutubeError> {
        let response = request
            .bearer_auth(&self.access_token)
            .header("Accept", "application/json")
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(YoutubeError::FailedToSendRequest)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or("Failed to get error text".to_string());
        Err(classify_error(status, &body))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, YoutubeError> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(YoutubeError::FailedToParseResponse)
    }
}
