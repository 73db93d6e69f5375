use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};

use crate::ports::spotify::{SourcePlaylist, Track};
use crate::ports::youtube::{Visibility, YoutubeClient, YoutubePlaylist};
use crate::services::youtube::matcher::{MatchResult, TrackMatcher};
use crate::services::youtube::playlist_builder::PlaylistBuilder;

pub const DEFAULT_DESCRIPTION: &str = "Playlist converted from Spotify";

/// Title of the YouTube playlist created for a Spotify playlist.
pub fn destination_title(source_name: &str) -> String {
    format!("Spotify Playlist: {}", source_name)
}

#[derive(Debug, Clone)]
pub struct TransferOptions {
    pub description: String,
    pub visibility: Visibility,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.to_string(),
            visibility: Visibility::default(),
        }
    }
}

/// What happened to a single source track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    Added { video_id: String },
    /// Search returned nothing
    Skipped,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackReport {
    /// 1-based position in the source playlist
    pub position: usize,
    pub track: Track,
    pub outcome: TrackOutcome,
}

#[derive(Debug, Clone)]
pub struct TransferSummary {
    pub playlist: YoutubePlaylist,
    pub reports: Vec<TrackReport>,
}

impl TransferSummary {
    pub fn added(&self) -> usize {
        self.count(|outcome| matches!(outcome, TrackOutcome::Added { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, TrackOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, TrackOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&TrackOutcome) -> bool) -> usize {
        self.reports
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}

/// Prints the playlist name and a numbered track listing.
pub fn print_source_playlist(playlist: &SourcePlaylist) {
    println!("Playlist Name: {}", playlist.name);
    println!("Tracks in the Playlist:");
    for (index, track) in playlist.tracks.iter().enumerate() {
        println!("{}. {}", index + 1, describe(track));
    }
}

fn describe(track: &Track) -> String {
    if track.artists.is_empty() {
        track.title.clone()
    } else {
        format!("{} by {}", track.title, track.artist_credits())
    }
}

/// Copies a source playlist into a freshly created YouTube playlist.
///
/// Only creating the playlist can fail the transfer. Every track is then attempted exactly once,
/// in source order, and its outcome recorded whether or not earlier tracks failed.
/// Nothing is deduplicated against earlier runs: each call creates a new playlist.
pub struct PlaylistTransfer<C: YoutubeClient> {
    matcher: TrackMatcher<C>,
    builder: PlaylistBuilder<C>,
}

impl<C: YoutubeClient> PlaylistTransfer<C> {
    pub fn new(client: C) -> Self {
        let client = Arc::new(client);
        Self {
            matcher: TrackMatcher::new(client.clone()),
            builder: PlaylistBuilder::new(client),
        }
    }

    pub async fn transfer(
        &self,
        source: &SourcePlaylist,
        options: &TransferOptions,
    ) -> Result<TransferSummary> {
        let playlist = self
            .builder
            .create(
                &destination_title(&source.name),
                &options.description,
                options.visibility,
            )
            .await
            .wrap_err("Failed to create YouTube playlist")?;
        println!("Created YouTube playlist: {}", playlist.title);

        let mut reports = Vec::with_capacity(source.tracks.len());
        for (index, track) in source.tracks.iter().enumerate() {
            let outcome = self.process_track(&playlist, track).await;
            print_outcome(track, &outcome);
            reports.push(TrackReport {
                position: index + 1,
                track: track.clone(),
                outcome,
            });
        }

        let summary = TransferSummary { playlist, reports };
        tracing::info!(
            "Transfer of '{}' finished: {} added, {} skipped, {} failed",
            source.name,
            summary.added(),
            summary.skipped(),
            summary.failed()
        );
        println!(
            "Summary: {} added, {} not found, {} failed (of {} tracks)",
            summary.added(),
            summary.skipped(),
            summary.failed(),
            summary.reports.len()
        );
        println!("Finished adding songs to YouTube playlist.");

        Ok(summary)
    }

    async fn process_track(&self, playlist: &YoutubePlaylist, track: &Track) -> TrackOutcome {
        let video_id = match self.matcher.find(track).await {
            Ok(MatchResult::Found { video_id }) => video_id,
            Ok(MatchResult::NotFound) => return TrackOutcome::Skipped,
            Err(error) => {
                tracing::warn!("Search for '{}' failed: {}", track.title, error);
                return TrackOutcome::Failed {
                    reason: error.to_string(),
                };
            }
        };

        match self.builder.append(&playlist.id, &video_id).await {
            Ok(()) => TrackOutcome::Added { video_id },
            Err(error) => {
                tracing::warn!(
                    "Adding video {} for '{}' to playlist {} failed: {}",
                    video_id,
                    track.title,
                    playlist.id,
                    error
                );
                TrackOutcome::Failed {
                    reason: error.to_string(),
                }
            }
        }
    }
}

fn print_outcome(track: &Track, outcome: &TrackOutcome) {
    match outcome {
        TrackOutcome::Added { .. } => println!("Added: {}", describe(track)),
        TrackOutcome::Skipped => println!("Track '{}' not found on YouTube.", track.title),
        TrackOutcome::Failed { reason } => println!(
            "Error adding track '{}' to YouTube playlist: {}",
            track.title, reason
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use mockall::Sequence;

    use super::*;
    use crate::ports::youtube::MockYoutubeClient;
    use crate::youtube_rs::error::YoutubeError;

    fn track(title: &str, artists: &[&str]) -> Track {
        Track::new(title, artists.iter().map(|artist| artist.to_string()).collect())
    }

    fn playlist(name: &str, tracks: Vec<Track>) -> SourcePlaylist {
        SourcePlaylist {
            name: name.into(),
            tracks,
        }
    }

    fn expect_create(client: &mut MockYoutubeClient) {
        client
            .expect_create_playlist()
            .times(1)
            .returning(|title, _, _| {
                Ok(YoutubePlaylist {
                    id: "PL1".into(),
                    title: title.to_string(),
                })
            });
    }

    fn service_error(message: &str) -> YoutubeError {
        YoutubeError::Api {
            status: 500,
            message: message.into(),
        }
    }

    #[test]
    fn test_destination_title() {
        assert_eq!(destination_title("Road Trip"), "Spotify Playlist: Road Trip");
    }

    #[test]
    fn test_describe_track() {
        assert_eq!(
            describe(&track("Song A", &["Artist X", "Artist Y"])),
            "Song A by Artist X, Artist Y"
        );
        assert_eq!(describe(&track("Song B", &[])), "Song B");
    }

    #[tokio::test]
    async fn test_road_trip_end_to_end() {
        let mut client = MockYoutubeClient::new();
        let mut seq = Sequence::new();

        client
            .expect_create_playlist()
            .withf(|title, description, visibility| {
                title == "Spotify Playlist: Road Trip"
                    && description == DEFAULT_DESCRIPTION
                    && *visibility == Visibility::Public
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|title, _, _| {
                Ok(YoutubePlaylist {
                    id: "PL1".into(),
                    title: title.to_string(),
                })
            });
        client
            .expect_search_videos()
            .withf(|query, max_results| query == "Song A Artist X" && *max_results == 1)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(vec!["vid-a".into()]));
        client
            .expect_insert_playlist_item()
            .withf(|playlist_id, video_id| playlist_id == "PL1" && video_id == "vid-a")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        client
            .expect_search_videos()
            .withf(|query, _| query == "Song B")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(vec!["vid-b".into()]));
        client
            .expect_insert_playlist_item()
            .withf(|playlist_id, video_id| playlist_id == "PL1" && video_id == "vid-b")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let source = playlist(
            "Road Trip",
            vec![track("Song A", &["Artist X"]), track("Song B", &[])],
        );
        let summary = PlaylistTransfer::new(client)
            .transfer(&source, &TransferOptions::default())
            .await
            .unwrap();

        assert_eq!(summary.playlist.title, "Spotify Playlist: Road Trip");
        assert_eq!(summary.reports.len(), 2);
        assert_eq!(summary.added() + summary.skipped() + summary.failed(), 2);
        assert_eq!(summary.added(), 2);
        assert_eq!(summary.reports[0].track.title, "Song A");
        assert_eq!(summary.reports[1].track.title, "Song B");
    }

    #[tokio::test]
    async fn test_every_track_searched_once_in_order() {
        let queries = Arc::new(Mutex::new(Vec::new()));

        let mut client = MockYoutubeClient::new();
        expect_create(&mut client);
        let recorded = queries.clone();
        client
            .expect_search_videos()
            .times(5)
            .returning(move |query, _| {
                recorded.lock().unwrap().push(query.to_string());
                Ok(vec![format!("vid-{}", query)])
            });
        client
            .expect_insert_playlist_item()
            .times(5)
            .returning(|_, _| Ok(()));

        let tracks: Vec<Track> = (1..=5).map(|n| track(&format!("Song {}", n), &[])).collect();
        let summary = PlaylistTransfer::new(client)
            .transfer(&playlist("Five", tracks), &TransferOptions::default())
            .await
            .unwrap();

        assert_eq!(
            *queries.lock().unwrap(),
            vec!["Song 1", "Song 2", "Song 3", "Song 4", "Song 5"]
        );
        let positions: Vec<usize> = summary.reports.iter().map(|report| report.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_search_failure_does_not_stop_later_tracks() {
        let mut client = MockYoutubeClient::new();
        expect_create(&mut client);
        client
            .expect_search_videos()
            .withf(|query, _| query == "Song 2")
            .times(1)
            .returning(|_, _| Err(service_error("backend error")));
        client
            .expect_search_videos()
            .withf(|query, _| query == "Song 1" || query == "Song 3")
            .times(2)
            .returning(|query, _| Ok(vec![format!("vid-{}", query)]));
        client
            .expect_insert_playlist_item()
            .times(2)
            .returning(|_, _| Ok(()));

        let source = playlist(
            "Mixed",
            vec![track("Song 1", &[]), track("Song 2", &[]), track("Song 3", &[])],
        );
        let summary = PlaylistTransfer::new(client)
            .transfer(&source, &TransferOptions::default())
            .await
            .unwrap();

        let outcomes: Vec<&TrackOutcome> =
            summary.reports.iter().map(|report| &report.outcome).collect();
        assert!(matches!(outcomes[0], TrackOutcome::Added { .. }));
        assert!(matches!(outcomes[1], TrackOutcome::Failed { reason } if reason.contains("backend error")));
        assert!(matches!(outcomes[2], TrackOutcome::Added { .. }));
        assert_eq!((summary.added(), summary.skipped(), summary.failed()), (2, 0, 1));
    }

    #[tokio::test]
    async fn test_no_results_is_skipped_not_failed() {
        let mut client = MockYoutubeClient::new();
        expect_create(&mut client);
        client
            .expect_search_videos()
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        client.expect_insert_playlist_item().never();

        let summary = PlaylistTransfer::new(client)
            .transfer(
                &playlist("Obscure", vec![track("Unknown Demo", &["Nobody"])]),
                &TransferOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(summary.reports[0].outcome, TrackOutcome::Skipped);
        assert_eq!((summary.added(), summary.skipped(), summary.failed()), (0, 1, 0));
    }

    #[tokio::test]
    async fn test_append_failure_is_recorded_and_loop_continues() {
        let mut client = MockYoutubeClient::new();
        expect_create(&mut client);
        client
            .expect_search_videos()
            .times(2)
            .returning(|query, _| Ok(vec![format!("vid-{}", query)]));
        client
            .expect_insert_playlist_item()
            .withf(|_, video_id| video_id == "vid-Song 1")
            .times(1)
            .returning(|_, _| {
                Err(YoutubeError::Api {
                    status: 403,
                    message: "The request cannot be completed because you have exceeded your quota.".into(),
                })
            });
        client
            .expect_insert_playlist_item()
            .withf(|_, video_id| video_id == "vid-Song 2")
            .times(1)
            .returning(|_, _| Ok(()));

        let summary = PlaylistTransfer::new(client)
            .transfer(
                &playlist("Quota", vec![track("Song 1", &[]), track("Song 2", &[])]),
                &TransferOptions::default(),
            )
            .await
            .unwrap();

        assert!(matches!(summary.reports[0].outcome, TrackOutcome::Failed { .. }));
        assert_eq!(
            summary.reports[1].outcome,
            TrackOutcome::Added {
                video_id: "vid-Song 2".into()
            }
        );
    }

    #[tokio::test]
    async fn test_create_failure_is_fatal() {
        let mut client = MockYoutubeClient::new();
        client
            .expect_create_playlist()
            .times(1)
            .returning(|_, _, _| {
                Err(YoutubeError::Authentication {
                    reason: "Invalid Credentials".into(),
                })
            });
        client.expect_search_videos().never();
        client.expect_insert_playlist_item().never();

        let result = PlaylistTransfer::new(client)
            .transfer(
                &playlist("Road Trip", vec![track("Song A", &["Artist X"])]),
                &TransferOptions::default(),
            )
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_rerun_creates_second_playlist() {
        let created = Arc::new(AtomicUsize::new(0));

        let mut client = MockYoutubeClient::new();
        let counter = created.clone();
        client
            .expect_create_playlist()
            .times(2)
            .returning(move |title, _, _| {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(YoutubePlaylist {
                    id: format!("PL{}", n),
                    title: title.to_string(),
                })
            });
        client
            .expect_search_videos()
            .times(2)
            .returning(|_, _| Ok(vec!["vid-a".into()]));
        client
            .expect_insert_playlist_item()
            .times(2)
            .returning(|_, _| Ok(()));

        let transfer = PlaylistTransfer::new(client);
        let source = playlist("Road Trip", vec![track("Song A", &["Artist X"])]);
        let options = TransferOptions {
            description: DEFAULT_DESCRIPTION.into(),
            visibility: Visibility::Private,
        };

        let first = transfer.transfer(&source, &options).await.unwrap();
        let second = transfer.transfer(&source, &options).await.unwrap();

        assert_eq!(created.load(Ordering::SeqCst), 2);
        assert_ne!(first.playlist.id, second.playlist.id);
        assert_eq!(first.playlist.title, second.playlist.title);
    }

    #[tokio::test]
    async fn test_empty_playlist_still_created() {
        let mut client = MockYoutubeClient::new();
        expect_create(&mut client);
        client.expect_search_videos().never();

        let summary = PlaylistTransfer::new(client)
            .transfer(&playlist("Empty", Vec::new()), &TransferOptions::default())
            .await
            .unwrap();

        assert!(summary.reports.is_empty());
        assert_eq!(summary.playlist.id, "PL1");
    }
}
