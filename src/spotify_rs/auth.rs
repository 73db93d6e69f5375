use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::spotify_rs::error::{SpotifyError, error_message};
use crate::spotify_rs::types::SpotifyTokenResponse;

const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Request an app access token with the client credentials flow.
/// https://developer.spotify.com/documentation/web-api/tutorials/client-credentials-flow
///
/// The accounts service answers bad credentials with `400 invalid_client` (and sometimes 401);
/// both are reported as [`SpotifyError::Authentication`].
pub async fn request_client_credentials_token(
    client: &Client,
    client_id: &str,
    client_secret: &str,
) -> Result<SpotifyTokenResponse, SpotifyError> {
    let response = client
        .post(SPOTIFY_TOKEN_URL)
        // Sent as x-www-form-urlencoded, as required by spotify
        .form(&[("grant_type", "client_credentials")])
        .basic_auth(client_id, Some(client_secret))
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .map_err(SpotifyError::FailedToSendRequest)?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or("Failed to get error text".to_string());
        return Err(classify_token_error(status, &body));
    }

    response
        .json::<SpotifyTokenResponse>()
        .await
        .map_err(SpotifyError::FailedToParseResponse)
}

fn classify_token_error(status: StatusCode, body: &str) -> SpotifyError {
    let reason = error_message(status, body);
    if status.is_client_error() {
        SpotifyError::Authentication { reason }
    } else {
        SpotifyError::Api {
            status: status.as_u16(),
            message: reason,
        }
    }
}
