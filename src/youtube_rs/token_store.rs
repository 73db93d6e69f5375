use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directory name of the persisted YouTube credentials, shared by every run.
pub const TOKEN_STORE_NAME: &str = "YouTube.Auth.Store";
pub const DEFAULT_USER: &str = "user";

/// A stored token must stay valid at least this long to be reused without refreshing.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds)
    pub expires_at: i64,
}

impl StoredToken {
    pub fn is_fresh(&self, now: i64) -> bool {
        self.expires_at - EXPIRY_MARGIN_SECS > now
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    #[error("No data directory found for the YouTube token store")]
    NoDataDirectory,
    #[error("Failed to access token store {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Token store {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// File backed store holding one user's YouTube OAuth token.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(directory: &Path, user: &str) -> Self {
        Self {
            path: directory.join(format!("{}.json", user)),
        }
    }

    /// `<data dir>/youtify/YouTube.Auth.Store/user.json`
    pub fn open_default() -> Result<Self, TokenStoreError> {
        let directory = dirs::data_dir()
            .ok_or(TokenStoreError::NoDataDirectory)?
            .join("youtify")
            .join(TOKEN_STORE_NAME);
        Ok(Self::new(&directory, DEFAULT_USER))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<StoredToken>, TokenStoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(TokenStoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| TokenStoreError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    pub fn save(&self, token: &StoredToken) -> Result<(), TokenStoreError> {
        let io_error = |source| TokenStoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let contents = serde_json::to_string_pretty(token).map_err(|source| {
            TokenStoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        write_private(&self.path, &contents).map_err(io_error)?;

        tracing::debug!("Saved YouTube token to {}", self.path.display());
        Ok(())
    }

    /// Deletes the stored token. Returns whether there was one.
    pub fn clear(&self) -> Result<bool, TokenStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(TokenStoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Writes `contents` readable by the owner only; the file holds a refresh token.
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    // `mode` only applies on creation, so tighten a file left by an older run too
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents.as_bytes())
}
