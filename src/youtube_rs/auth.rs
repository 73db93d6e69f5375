use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;

use crate::youtube_rs::token_store::{StoredToken, TokenStore, TokenStoreError};

/// Manage playlists on the user's behalf
pub const YOUTUBE_SCOPE: &str = "https://www.googleapis.com/auth/youtube.force-ssl";

const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_REDIRECT_URI: &str = "http://localhost";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Failed to read client secrets file {path}: {source}")]
    ReadClientSecrets {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid client secrets file {path}: {source}")]
    ParseClientSecrets {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Client secrets file {0} has neither an `installed` nor a `web` client")]
    MissingClient(PathBuf),
    #[error("Invalid authorization URL: {0}")]
    InvalidAuthorizationUrl(#[from] url::ParseError),
    #[error("Authorization was denied: {0}")]
    Denied(String),
    #[error("Authorization response does not belong to this login attempt (state mismatch)")]
    StateMismatch,
    #[error("No authorization code found in the pasted response")]
    MissingCode,
    #[error("Failed to read the authorization response: {0}")]
    Prompt(std::io::Error),
    #[error("Token request rejected: {reason}")]
    Rejected { reason: String },
    #[error("Token endpoint returned {status}: {reason}")]
    TokenEndpoint { status: u16, reason: String },
    #[error("Failed to send http request: {0}")]
    FailedToSendRequest(reqwest::Error),
    #[error("Failed to parse response: {0}")]
    FailedToParseResponse(reqwest::Error),
    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),
}

/// OAuth client from a Google Cloud "client_secret.json" download
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthClient {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Deserialize)]
struct ClientSecretsFile {
    installed: Option<OAuthClient>,
    web: Option<OAuthClient>,
}

impl OAuthClient {
    pub fn from_file(path: &Path) -> Result<Self, AuthError> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| AuthError::ReadClientSecrets {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&contents, path)
    }

    fn from_json(contents: &str, path: &Path) -> Result<Self, AuthError> {
        let file: ClientSecretsFile =
            serde_json::from_str(contents).map_err(|source| AuthError::ParseClientSecrets {
                path: path.to_path_buf(),
                source,
            })?;

        file.installed
            .or(file.web)
            .ok_or_else(|| AuthError::MissingClient(path.to_path_buf()))
    }

    pub fn redirect_uri(&self) -> &str {
        self.redirect_uris
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_REDIRECT_URI)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub refresh_token: Option<String>,
}

impl GoogleTokenResponse {
    /// Google omits the refresh token on refresh responses; keep the one we already have.
    pub fn into_stored(self, previous_refresh_token: Option<String>, now: i64) -> StoredToken {
        StoredToken {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(previous_refresh_token),
            expires_at: now + self.expires_in,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoogleTokenError {
    error: String,
    error_description: Option<String>,
}

/// Everything needed to finish one authorization code + PKCE round trip.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: Url,
    pub state: String,
    code_verifier: String,
}

/// Generate a cryptographically secure random string for PKCE
fn generate_random_string(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            const CHARSET: &[u8] =
                b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";
            CHARSET[rng.random_range(0..CHARSET.len())] as char
        })
        .collect()
}

/// Generate PKCE code verifier (43-128 characters)
fn generate_code_verifier() -> String {
    generate_random_string(128)
}

/// Generate PKCE code challenge from verifier using S256 method
fn generate_code_challenge(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Generate a random state parameter for CSRF protection
fn generate_state() -> String {
    generate_random_string(16)
}

/// Build the consent URL for the YouTube scope.
/// https://developers.google.com/identity/protocols/oauth2/native-app
pub fn build_authorization_request(
    client: &OAuthClient,
) -> Result<AuthorizationRequest, AuthError> {
    let code_verifier = generate_code_verifier();
    let state = generate_state();
    let code_challenge = generate_code_challenge(&code_verifier);

    let url = Url::parse_with_params(
        &client.auth_uri,
        [
            ("client_id", client.client_id.as_str()),
            ("redirect_uri", client.redirect_uri()),
            ("response_type", "code"),
            ("scope", YOUTUBE_SCOPE),
            ("state", state.as_str()),
            ("code_challenge", code_challenge.as_str()),
            ("code_challenge_method", "S256"),
            // Google only returns a refresh token with offline access on a fresh consent
            ("access_type", "offline"),
            ("prompt", "consent"),
        ],
    )?;

    Ok(AuthorizationRequest {
        url,
        state,
        code_verifier,
    })
}

/// Accepts either the full URL the browser was redirected to or just the `code` value.
pub fn parse_authorization_response(
    input: &str,
    expected_state: &str,
) -> Result<String, AuthError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AuthError::MissingCode);
    }

    let Ok(url) = Url::parse(input) else {
        return Ok(input.to_string());
    };

    let mut code = None;
    let mut state = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "error" => return Err(AuthError::Denied(value.into_owned())),
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            _ => {}
        }
    }

    if state.as_deref() != Some(expected_state) {
        return Err(AuthError::StateMismatch);
    }
    code.filter(|code| !code.is_empty())
        .ok_or(AuthError::MissingCode)
}

/// Exchange authorization code for access and refresh tokens
pub async fn exchange_code_for_token(
    http: &Client,
    client: &OAuthClient,
    code: &str,
    request: &AuthorizationRequest,
) -> Result<GoogleTokenResponse, AuthError> {
    post_token_request(
        http,
        &client.token_uri,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", client.client_id.as_str()),
            ("client_secret", client.client_secret.as_str()),
            ("redirect_uri", client.redirect_uri()),
            ("code_verifier", request.code_verifier.as_str()),
        ],
    )
    .await
}

/// Refresh an access token using a refresh token
pub async fn refresh_access_token(
    http: &Client,
    client: &OAuthClient,
    refresh_token: &str,
) -> Result<GoogleTokenResponse, AuthError> {
    post_token_request(
        http,
        &client.token_uri,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client.client_id.as_str()),
            ("client_secret", client.client_secret.as_str()),
        ],
    )
    .await
}

async fn post_token_request(
    http: &Client,
    token_uri: &str,
    params: &[(&str, &str)],
) -> Result<GoogleTokenResponse, AuthError> {
    let response = http
        .post(token_uri)
        .form(params)
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .map_err(AuthError::FailedToSendRequest)?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or("Failed to get error text".to_string());
        let reason = serde_json::from_str::<GoogleTokenError>(&body)
            .map(|error| error.error_description.unwrap_or(error.error))
            .unwrap_or(body);
        return Err(if status.is_client_error() {
            AuthError::Rejected { reason }
        } else {
            AuthError::TokenEndpoint {
                status: status.as_u16(),
                reason,
            }
        });
    }

    response
        .json::<GoogleTokenResponse>()
        .await
        .map_err(AuthError::FailedToParseResponse)
}

/// Returns a usable access token, in order of preference:
/// the stored token, a refreshed stored token, or a new token from interactive consent.
/// Whatever is obtained is written back to the store so later runs skip the consent screen.
pub async fn authorize(
    http: &Client,
    client: &OAuthClient,
    store: &TokenStore,
) -> Result<String, AuthError> {
    let now = chrono::Utc::now().timestamp();

    if let Some(stored) = store.load()? {
        if stored.is_fresh(now) {
            tracing::debug!("Using stored YouTube token");
            return Ok(stored.access_token);
        }

        if let Some(refresh_token) = stored.refresh_token {
            match refresh_access_token(http, client, &refresh_token).await {
                Ok(response) => {
                    tracing::info!("Refreshed YouTube access token");
                    let token = response.into_stored(Some(refresh_token), now);
                    store.save(&token)?;
                    return Ok(token.access_token);
                }
                Err(AuthError::Rejected { reason }) => {
                    tracing::warn!("Stored YouTube refresh token was rejected: {}", reason);
                }
                Err(error) => return Err(error),
            }
        }
    }

    let response = authorize_interactively(http, client).await?;
    let token = response.into_stored(None, chrono::Utc::now().timestamp());
    store.save(&token)?;
    Ok(token.access_token)
}

async fn authorize_interactively(
    http: &Client,
    client: &OAuthClient,
) -> Result<GoogleTokenResponse, AuthError> {
    let request = build_authorization_request(client)?;

    println!("Open this URL in your browser to allow access to your YouTube account:");
    println!();
    println!("{}", request.url);
    println!();
    println!("After approving, paste the address you were redirected to (or just the code):");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let input = lines
        .next_line()
        .await
        .map_err(AuthError::Prompt)?
        .unwrap_or_default();

    let code = parse_authorization_response(&input, &request.state)?;
    exchange_code_for_token(http, client, &code, &request).await
}
