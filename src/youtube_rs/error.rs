use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum YoutubeError {
    #[error("YouTube rejected the access token: {reason}")]
    Authentication { reason: String },
    #[error("YouTube API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Failed to send http request: {0}")]
    FailedToSendRequest(reqwest::Error),
    #[error("Failed to parse response: {0}")]
    FailedToParseResponse(reqwest::Error),
}

/// Google API error envelope: `{"error": {"code": 403, "message": "...", "errors": [...]}}`
#[derive(Debug, Deserialize)]
struct GoogleErrorResponse {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

pub(crate) fn classify_error(status: StatusCode, body: &str) -> YoutubeError {
    let message = serde_json::from_str::<GoogleErrorResponse>(body)
        .map(|response| response.error.message)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                status.to_string()
            } else {
                body.trim().to_string()
            }
        });

    if status == StatusCode::UNAUTHORIZED {
        YoutubeError::Authentication { reason: message }
    } else {
        YoutubeError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
