use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::spotify_rs::error::{SpotifyError, error_message};
use crate::spotify_rs::types::{SpotifyPage, SpotifyPlaylist, SpotifyPlaylistItem};

const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Only the fields the converter needs; keeps playlist payloads small.
const PLAYLIST_FIELDS: &str = "name,tracks(next,items(track(type,name,artists(name))))";
const PLAYLIST_ITEM_FIELDS: &str = "next,items(track(type,name,artists(name)))";

/// Spotify Web API client authorized with an app access token
pub struct SpotifyClient {
    access_token: String,
    client: Client,
}

impl SpotifyClient {
    pub fn new(access_token: String, client: Client) -> Self {
        Self {
            access_token,
            client,
        }
    }

    /// Get a playlist with all of its items, following the `next` links of the item pages.
    /// The returned playlist has `tracks.next == None`.
    pub async fn get_playlist(&self, playlist_id: &str) -> Result<SpotifyPlaylist, SpotifyError> {
        let url = format!(
            "{}/playlists/{}",
            SPOTIFY_API_URL,
            urlencoding::encode(playlist_id)
        );
        let mut playlist: SpotifyPlaylist = self
            .get_json(&url, &[("fields", PLAYLIST_FIELDS)], playlist_id)
            .await?;

        follow_item_pages(&mut playlist, |url| async move {
            // Spotify sometimes carries the field filter over into `next`
            let query: &[(&str, &str)] = if url.contains("fields=") {
                &[]
            } else {
                &[("fields", PLAYLIST_ITEM_FIELDS)]
            };
            self.get_json(&url, query, playlist_id).await
        })
        .await?;

        Ok(playlist)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        playlist_id: &str,
    ) -> Result<T, SpotifyError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .bearer_auth(&self.access_token)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(SpotifyError::FailedToSendRequest)?;

        check_playlist_response(response, playlist_id)
            .await?
            .json::<T>()
            .await
            .map_err(SpotifyError::FailedToParseResponse)
    }
}

/// Appends every remaining item page to `playlist`, in order, until `next` runs out.
async fn follow_item_pages<F, Fut>(
    playlist: &mut SpotifyPlaylist,
    mut fetch_page: F,
) -> Result<(), SpotifyError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<SpotifyPage<SpotifyPlaylistItem>, SpotifyError>>,
{
    let mut next_url = playlist.tracks.next.take();
    while let Some(url) = next_url {
        let page = fetch_page(url).await?;
        tracing::debug!(
            "Fetched {} more items of spotify playlist '{}'",
            page.items.len(),
            playlist.name
        );
        playlist.tracks.items.extend(page.items);
        next_url = page.next;
    }
    Ok(())
}

/// Maps a non-success playlist response onto the error taxonomy.
/// Spotify answers malformed ids with 400 and unknown ids with 404; both mean "no such playlist".
async fn check_playlist_response(
    response: Response,
    playlist_id: &str,
) -> Result<Response, SpotifyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or("Failed to get error text".to_string());
    Err(classify_playlist_error(status, &body, playlist_id))
}

fn classify_playlist_error(status: StatusCode, body: &str, playlist_id: &str) -> SpotifyError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SpotifyError::Authentication {
            reason: error_message(status, body),
        },
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => SpotifyError::NotFound {
            playlist_id: playlist_id.to_string(),
        },
        _ => SpotifyError::Api {
            status: status.as_u16(),
            message: error_message(status, body),
        },
    }
}
