use serde::Serialize;
use yt_dlp::VideoInfo;

use crate::quality::{MediaFormat, Quality};

/// Response body for `/video/info`.
#[derive(Debug, Serialize)]
pub struct VideoInfoResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<f64>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub uploader: Option<String>,
    pub upload_date: Option<String>,
    pub thumbnail: Option<String>,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub age_limit: Option<u32>,
    pub webpage_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<Vec<FormatEntry>>
}

impl VideoInfoResponse {
    pub fn from_info(info: &VideoInfo, requested_url: &str, include_formats: bool) -> Self {
        Self {
            id: info.id.clone(),
            title: info.title.clone(),
            description: info.description.clone(),
            duration: info.duration,
            view_count: info.view_count,
            like_count: info.like_count,
            uploader: info.uploader.clone(),
            upload_date: info.upload_date.clone(),
            thumbnail: info.best_thumbnail().map(String::from),
            tags: info.tags.clone(),
            categories: info.categories.clone(),
            age_limit: info.age_limit,
            webpage_url: info
                .webpage_url
                .clone()
                .unwrap_or_else(|| requested_url.to_string()),
            formats: include_formats.then(|| collect_formats(info))
        }
    }
}

/// One downloadable media variant, as listed by `/video/info?include_formats=true`.
#[derive(Debug, Serialize)]
pub struct FormatEntry {
    pub format_id: String,
    pub ext: Option<String>,
    pub quality: Option<f64>,
    pub filesize: Option<u64>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    pub fps: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub url: Option<String>
}

// Storyboard-style entries with neither codec carry nothing downloadable.
fn collect_formats(info: &VideoInfo) -> Vec<FormatEntry> {
    info.formats
        .iter()
        .filter(|f| f.has_video() || f.has_audio())
        .map(|f| FormatEntry {
            format_id: f.format_id.clone(),
            ext: f.ext.clone(),
            quality: f.quality,
            filesize: f.estimated_size(),
            vcodec: f.vcodec.clone(),
            acodec: f.acodec.clone(),
            fps: f.fps,
            width: f.width,
            height: f.height,
            url: f.url.clone()
        })
        .collect()
}

/// Response body for `/video/download`.
#[derive(Debug, Serialize)]
pub struct DownloadLink {
    pub title: String,
    pub id: String,
    pub duration: Option<f64>,
    pub filesize: Option<u64>,
    pub ext: Option<String>,
    pub format_id: Option<String>,
    pub quality: &'static str,
    pub requested_format: &'static str,
    pub download_url: String,
    pub thumbnail: Option<String>
}

impl DownloadLink {
    /// `None` when yt-dlp resolved no direct URL for the selected format.
    pub fn from_selected(info: &VideoInfo, quality: Quality, format: MediaFormat) -> Option<Self> {
        let download_url = info.url.clone()?;
        Some(Self {
            title: info.title.clone(),
            id: info.id.clone(),
            duration: info.duration,
            filesize: info.estimated_size(),
            ext: info.ext.clone(),
            format_id: info.format_id.clone(),
            quality: quality.as_str(),
            requested_format: format.as_str(),
            download_url,
            thumbnail: info.best_thumbnail().map(String::from)
        })
    }
}

/// Response body for `/video/status`. Inaccessible videos still yield a 200
/// with `accessible: false` rather than an error.
#[derive(Debug, Serialize)]
pub struct VideoStatusResponse {
    pub accessible: bool,
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>
}

impl VideoStatusResponse {
    pub fn available(info: &VideoInfo) -> Self {
        Self {
            accessible: true,
            status: "available",
            message: "Video is accessible".to_string(),
            title: Some(info.title.clone()),
            uploader: info.uploader.clone(),
            duration: info.duration
        }
    }

    pub fn inaccessible(status: &'static str, message: impl Into<String>) -> Self {
        Self {
            accessible: false,
            status,
            message: message.into(),
            title: None,
            uploader: None,
            duration: None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> VideoInfo {
        serde_json::from_str(
            r#"{
                "id": "dQw4w9WgXcQ",
                "title": "Test Video",
                "description": "desc",
                "duration": 212.0,
                "view_count": 1000,
                "uploader": "Channel A",
                "upload_date": "20091025",
                "thumbnail": "https://i.ytimg.com/t.jpg",
                "tags": ["music"],
                "webpage_url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
                "ext": "mp4",
                "format_id": "18",
                "url": "https://rr1.example/video.mp4",
                "filesize_approx": 9000,
                "formats": [
                    {"format_id": "sb0", "vcodec": "none", "acodec": "none"},
                    {"format_id": "18", "ext": "mp4", "vcodec": "avc1", "acodec": "mp4a", "height": 360},
                    {"format_id": "251", "ext": "webm", "vcodec": "none", "acodec": "opus"}
                ]
            }"#
        )
        .unwrap()
    }

    #[test]
    fn test_from_info_without_formats() {
        let resp = VideoInfoResponse::from_info(&sample_info(), "ignored", false);
        assert_eq!(resp.id, "dQw4w9WgXcQ");
        assert_eq!(resp.webpage_url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert!(resp.formats.is_none());
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("formats").is_none());
        // absent optional fields serialize as null, not omitted
        assert!(json.get("like_count").unwrap().is_null());
    }

    #[test]
    fn test_from_info_filters_codecless_formats() {
        let resp = VideoInfoResponse::from_info(&sample_info(), "u", true);
        let formats = resp.formats.unwrap();
        assert_eq!(formats.len(), 2);
        assert!(formats.iter().all(|f| f.format_id != "sb0"));
    }

    #[test]
    fn test_from_info_falls_back_to_requested_url() {
        let mut info = sample_info();
        info.webpage_url = None;
        let resp = VideoInfoResponse::from_info(&info, "https://youtu.be/dQw4w9WgXcQ", false);
        assert_eq!(resp.webpage_url, "https://youtu.be/dQw4w9WgXcQ");
    }

    #[test]
    fn test_download_link_from_selected() {
        let link =
            DownloadLink::from_selected(&sample_info(), Quality::High, MediaFormat::Mp4).unwrap();
        assert_eq!(link.download_url, "https://rr1.example/video.mp4");
        assert_eq!(link.ext.as_deref(), Some("mp4"));
        assert_eq!(link.filesize, Some(9000));
        assert_eq!(link.quality, "high");
        assert_eq!(link.requested_format, "mp4");
    }

    #[test]
    fn test_download_link_requires_url() {
        let mut info = sample_info();
        info.url = None;
        assert!(DownloadLink::from_selected(&info, Quality::High, MediaFormat::Mp4).is_none());
    }

    #[test]
    fn test_status_response_shapes() {
        let ok = VideoStatusResponse::available(&sample_info());
        assert!(ok.accessible);
        assert_eq!(ok.status, "available");
        assert_eq!(ok.title.as_deref(), Some("Test Video"));

        let bad = VideoStatusResponse::inaccessible("private", "Video is private");
        assert!(!bad.accessible);
        let json = serde_json::to_value(&bad).unwrap();
        assert!(json.get("title").is_none());
    }
}
