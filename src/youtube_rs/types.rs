use serde::{Deserialize, Serialize};

/* ---------- Search ---------- */

#[derive(Debug, Clone, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: ResourceId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

impl SearchListResponse {
    /// Video ids in ranking order; channel and playlist hits carry no video id and are dropped.
    pub fn video_ids(self) -> Vec<String> {
        self.items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect()
    }
}

/* ---------- Playlists ---------- */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub snippet: PlaylistSnippet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PlaylistStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistStatus {
    pub privacy_status: String,
}

/* ---------- Playlist items ---------- */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub playlist_id: String,
    pub resource_id: ResourceId,
}

impl PlaylistItem {
    pub fn video(playlist_id: &str, video_id: &str) -> Self {
        Self {
            snippet: PlaylistItemSnippet {
                playlist_id: playlist_id.to_string(),
                resource_id: ResourceId {
                    kind: "youtube#video".to_string(),
                    video_id: Some(video_id.to_string()),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_response_video_ids() {
        let body = json!({
            "kind": "youtube#searchListResponse",
            "items": [
                {"kind": "youtube#searchResult", "id": {"kind": "youtube#channel", "channelId": "UC1"}},
                {"kind": "youtube#searchResult", "id": {"kind": "youtube#video", "videoId": "dQw4w9WgXcQ"}}
            ]
        });
        let response: SearchListResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.video_ids(), vec!["dQw4w9WgXcQ".to_string()]);
    }

    #[test]
    fn test_search_response_without_items() {
        let response: SearchListResponse =
            serde_json::from_value(json!({"kind": "youtube#searchListResponse"})).unwrap();
        assert!(response.video_ids().is_empty());
    }

    #[test]
    fn test_playlist_item_body() {
        let item = PlaylistItem::video("PL123", "dQw4w9WgXcQ");
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({
                "snippet": {
                    "playlistId": "PL123",
                    "resourceId": {"kind": "youtube#video", "videoId": "dQw4w9WgXcQ"}
                }
            })
        );
    }

    #[test]
    fn test_playlist_insert_body() {
        let playlist = Playlist {
            id: None,
            snippet: PlaylistSnippet {
                title: "Spotify Playlist: Road Trip".into(),
                description: "Playlist converted from Spotify".into(),
            },
            status: Some(PlaylistStatus {
                privacy_status: "unlisted".into(),
            }),
        };
        assert_eq!(
            serde_json::to_value(&playlist).unwrap(),
            json!({
                "snippet": {
                    "title": "Spotify Playlist: Road Trip",
                    "description": "Playlist converted from Spotify"
                },
                "status": {"privacyStatus": "unlisted"}
            })
        );
    }
}
