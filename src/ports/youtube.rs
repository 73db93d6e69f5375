use serde::{Deserialize, Serialize};

use crate::youtube_rs::error::YoutubeError;

/// Privacy status of a created YouTube playlist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Unlisted,
}

impl Visibility {
    /// The `privacyStatus` value the YouTube API expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Unlisted => "unlisted",
        }
    }
}

/// A playlist that exists on YouTube.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YoutubePlaylist {
    pub id: String,
    pub title: String,
}

/// Port trait wrapping the YouTube Data API capabilities used by business logic.
///
/// Implementations live in `services::youtube::client` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait YoutubeClient: Send + Sync {
    /// Video ids of the top `max_results` search hits, best first. Empty when nothing matched.
    async fn search_videos(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<String>, YoutubeError>;

    async fn create_playlist(
        &self,
        title: &str,
        description: &str,
        visibility: Visibility,
    ) -> Result<YoutubePlaylist, YoutubeError>;

    async fn insert_playlist_item(
        &self,
        playlist_id: &str,
        video_id: &str,
    ) -> Result<(), YoutubeError>;
}
