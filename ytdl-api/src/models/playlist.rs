use serde::Serialize;
use yt_dlp::PlaylistInfo;

use crate::models::DownloadLink;
use crate::youtube;

/// One video summary inside a playlist response.
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistEntry {
    pub id: String,
    pub title: String,
    pub url: String,
    pub duration: Option<f64>,
    pub uploader: Option<String>
}

/// Response body for `/playlist/info`.
#[derive(Debug, Serialize)]
pub struct PlaylistInfoResponse {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub uploader: Option<String>,
    pub video_count: usize,
    pub videos: Vec<PlaylistEntry>
}

impl PlaylistInfoResponse {
    pub fn from_playlist(playlist: &PlaylistInfo, limit: usize) -> Self {
        let videos: Vec<PlaylistEntry> = playlist
            .entries
            .iter()
            .take(limit)
            .map(|entry| PlaylistEntry {
                id: entry.id.clone(),
                title: entry.title.clone(),
                url: entry
                    .webpage_url
                    .clone()
                    .unwrap_or_else(|| youtube::watch_url(&entry.id)),
                duration: entry.duration,
                uploader: entry.uploader.clone()
            })
            .collect();

        Self {
            id: playlist.id.clone(),
            title: playlist.title.clone(),
            description: playlist.description.clone(),
            uploader: playlist.uploader.clone().or_else(|| playlist.channel.clone()),
            video_count: videos.len(),
            videos
        }
    }
}

/// One element of `/playlist/download`'s `download_links`: either a resolved
/// link or the error that prevented resolving this entry.
#[derive(Debug, Serialize)]
pub struct PlaylistDownloadEntry {
    pub video_info: PlaylistEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_info: Option<DownloadLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>
}

/// Response body for `/playlist/download`.
#[derive(Debug, Serialize)]
pub struct PlaylistDownloadResponse {
    pub playlist_info: PlaylistInfoResponse,
    pub download_links: Vec<PlaylistDownloadEntry>,
    pub total_processed: usize
}
