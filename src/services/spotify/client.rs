use reqwest::Client;

use crate::ports::spotify::{SourcePlaylist, SpotifyClient};
use crate::spotify_rs::auth::request_client_credentials_token;
use crate::spotify_rs::client::SpotifyClient as SpotifyApi;
use crate::spotify_rs::error::SpotifyError;

#[derive(Debug, Clone)]
pub struct SpotifyApiCredentials {
    client_id: String,
    client_secret: String,
}

impl SpotifyApiCredentials {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

pub struct SpotifyHttpAdapter {
    api: SpotifyApi,
}

impl SpotifyHttpAdapter {
    /// Authenticates the app with the client credentials flow. Bad credentials surface as
    /// [`SpotifyError::Authentication`].
    pub async fn authenticate(credentials: &SpotifyApiCredentials) -> Result<Self, SpotifyError> {
        let client = Client::new();
        let token = request_client_credentials_token(
            &client,
            &credentials.client_id,
            &credentials.client_secret,
        )
        .await?;
        tracing::debug!(
            "Authenticated with Spotify as client {} (token valid for {}s)",
            credentials.client_id(),
            token.expires_in
        );

        Ok(Self {
            api: SpotifyApi::new(token.access_token, client),
        })
    }
}

#[async_trait::async_trait]
impl SpotifyClient for SpotifyHttpAdapter {
    async fn playlist(&self, playlist_id: &str) -> Result<SourcePlaylist, SpotifyError> {
        Ok(self.api.get_playlist(playlist_id).await?.into())
    }
}
