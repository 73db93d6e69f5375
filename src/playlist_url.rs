use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaylistUrlError {
    #[error("`{url}` is not a valid playlist URL: {reason}")]
    Invalid { url: String, reason: String },
    #[error("`{0}` does not end with a playlist identifier")]
    MissingIdentifier(String),
}

/// Extracts the playlist identifier from a playlist URL: the last `/`-delimited path segment.
///
/// Query string and fragment are ignored, so share links such as
/// `https://open.spotify.com/playlist/3cEYpjA9oz9GiPac4AsH4n?si=abc` work as-is.
pub fn extract_playlist_id(playlist_url: &str) -> Result<String, PlaylistUrlError> {
    let playlist_url = playlist_url.trim();
    let url = Url::parse(playlist_url).map_err(|error| PlaylistUrlError::Invalid {
        url: playlist_url.to_string(),
        reason: error.to_string(),
    })?;

    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| PlaylistUrlError::MissingIdentifier(playlist_url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_playlist_id() {
        assert_eq!(
            extract_playlist_id("https://open.example.com/playlist/3cEYpjA9oz9GiPac4AsH4n"),
            Ok("3cEYpjA9oz9GiPac4AsH4n".to_string())
        );
    }

    #[test]
    fn test_extract_playlist_id_ignores_query_and_whitespace() {
        assert_eq!(
            extract_playlist_id(
                "  https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=1a2b3c#top\n"
            ),
            Ok("37i9dQZF1DXcBWIGoYBM5M".to_string())
        );
    }

    #[test]
    fn test_extract_playlist_id_trailing_slash() {
        assert_eq!(
            extract_playlist_id("https://open.spotify.com/playlist/"),
            Err(PlaylistUrlError::MissingIdentifier(
                "https://open.spotify.com/playlist/".to_string()
            ))
        );
    }

    #[test]
    fn test_extract_playlist_id_rejects_non_urls() {
        assert!(matches!(
            extract_playlist_id("3cEYpjA9oz9GiPac4AsH4n"),
            Err(PlaylistUrlError::Invalid { .. })
        ));
        // Spotify URIs have no path segments to take from
        assert!(matches!(
            extract_playlist_id("spotify:playlist:3cEYpjA9oz9GiPac4AsH4n"),
            Err(PlaylistUrlError::MissingIdentifier(_))
        ));
    }
}
