use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum SpotifyError {
    #[error("Spotify rejected the credentials: {reason}")]
    Authentication { reason: String },
    #[error("Spotify playlist `{playlist_id}` not found")]
    NotFound { playlist_id: String },
    #[error("Spotify API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Failed to send http request: {0}")]
    FailedToSendRequest(reqwest::Error),
    #[error("Failed to parse response: {0}")]
    FailedToParseResponse(reqwest::Error),
}

/// Web API error envelope: `{"error": {"status": 404, "message": "..."}}`.
#[derive(Debug, Deserialize)]
struct SpotifyErrorResponse {
    error: SpotifyErrorBody,
}

#[derive(Debug, Deserialize)]
struct SpotifyErrorBody {
    message: String,
}

/// Accounts service error body: `{"error": "invalid_client", "error_description": "..."}`.
#[derive(Debug, Deserialize)]
struct SpotifyAuthErrorResponse {
    error: String,
    error_description: Option<String>,
}

/// Pulls a human readable message out of a Spotify error body, falling back to the raw text.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(response) = serde_json::from_str::<SpotifyErrorResponse>(body) {
        return response.error.message;
    }
    if let Ok(response) = serde_json::from_str::<SpotifyAuthErrorResponse>(body) {
        return response.error_description.unwrap_or(response.error);
    }
    if body.trim().is_empty() {
        status.to_string()
    } else {
        body.trim().to_string()
    }
}
