use std::sync::Arc;

use crate::ports::spotify::Track;
use crate::ports::youtube::YoutubeClient;
use crate::youtube_rs::error::YoutubeError;

/// The first search hit is taken as the match.
const MAX_RESULTS: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Found { video_id: String },
    NotFound,
}

/// `"<title> <first artist>"`, or just the title for tracks without artists.
pub fn search_query(track: &Track) -> String {
    match track.primary_artist() {
        Some(artist) => format!("{} {}", track.title, artist),
        None => track.title.clone(),
    }
}

pub struct TrackMatcher<C: YoutubeClient> {
    client: Arc<C>,
}

impl<C: YoutubeClient> TrackMatcher<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// An empty result set is [`MatchResult::NotFound`]; only a failed request is an error.
    pub async fn find(&self, track: &Track) -> Result<MatchResult, YoutubeError> {
        let query = search_query(track);
        let video_ids = self.client.search_videos(&query, MAX_RESULTS).await?;

        Ok(match video_ids.into_iter().next() {
            Some(video_id) => {
                tracing::debug!("Matched '{}' to video {}", query, video_id);
                MatchResult::Found { video_id }
            }
            None => {
                tracing::debug!("No video found for '{}'", query);
                MatchResult::NotFound
            }
        })
    }
}
