use axum::{
    extract::{Query, State},
    response::Json
};
use serde::Deserialize;
use yt_dlp::FailureKind;

use crate::error::ApiError;
use crate::models::{
    DownloadLink, PlaylistDownloadEntry, PlaylistDownloadResponse, PlaylistInfoResponse,
    VideoInfoResponse, VideoStatusResponse
};
use crate::quality::{self, MediaFormat, Quality};
use crate::state::AppState;
use crate::youtube;

const PLAYLIST_INFO_MAX_LIMIT: u32 = 100;
const PLAYLIST_INFO_DEFAULT_LIMIT: u32 = 50;
const PLAYLIST_DOWNLOAD_MAX_LIMIT: u32 = 50;
const PLAYLIST_DOWNLOAD_DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct VideoInfoParams {
    url: Option<String>,
    include_formats: Option<String>
}

#[derive(Debug, Deserialize)]
pub struct VideoUrlParams {
    url: Option<String>
}

#[derive(Debug, Deserialize)]
pub struct VideoDownloadParams {
    url: Option<String>,
    quality: Option<String>,
    format: Option<String>
}

#[derive(Debug, Deserialize)]
pub struct PlaylistInfoParams {
    url: Option<String>,
    limit: Option<String>
}

#[derive(Debug, Deserialize)]
pub struct PlaylistDownloadParams {
    url: Option<String>,
    quality: Option<String>,
    format: Option<String>,
    limit: Option<String>
}

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "YouTube Downloader API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/video/info": "Get video information",
            "/video/download": "Get video download links",
            "/video/status": "Check video accessibility status",
            "/playlist/info": "Get playlist information",
            "/playlist/download": "Get playlist download links",
            "/health": "Health check endpoint"
        }
    }))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "message": "API is running"
    }))
}

#[tracing::instrument(skip(state))]
pub async fn video_info(
    State(state): State<AppState>,
    Query(params): Query<VideoInfoParams>
) -> Result<Json<VideoInfoResponse>, ApiError> {
    let url = require_video_url(params.url.as_deref())?;
    let include_formats = parse_bool(params.include_formats.as_deref(), "include_formats")?;

    let info = state.yt_dlp.get_video_info(&url).await?;

    Ok(Json(VideoInfoResponse::from_info(&info, &url, include_formats)))
}

#[tracing::instrument(skip(state))]
pub async fn video_status(
    State(state): State<AppState>,
    Query(params): Query<VideoUrlParams>
) -> Result<Json<VideoStatusResponse>, ApiError> {
    let url = require_video_url(params.url.as_deref())?;

    let status = match state.yt_dlp.get_video_info(&url).await {
        Ok(info) => VideoStatusResponse::available(&info),
        Err(err) => match err.failure_kind() {
            FailureKind::SignInRequired => VideoStatusResponse::inaccessible(
                "restricted",
                "Video requires sign-in verification"
            ),
            FailureKind::PrivateVideo => {
                VideoStatusResponse::inaccessible("private", "Video is private")
            }
            FailureKind::VideoUnavailable => {
                VideoStatusResponse::inaccessible("unavailable", "Video is unavailable or deleted")
            }
            FailureKind::Other => {
                VideoStatusResponse::inaccessible("error", format!("Error accessing video: {err}"))
            }
        }
    };

    Ok(Json(status))
}

#[tracing::instrument(skip(state))]
pub async fn video_download(
    State(state): State<AppState>,
    Query(params): Query<VideoDownloadParams>
) -> Result<Json<DownloadLink>, ApiError> {
    let url = require_video_url(params.url.as_deref())?;
    let quality = parse_quality(params.quality.as_deref())?;
    let format = parse_format(params.format.as_deref())?;

    let selector = quality::format_selector(quality, format);
    let info = state.yt_dlp.get_video_info_with_format(&url, selector).await?;

    DownloadLink::from_selected(&info, quality, format)
        .map(Json)
        .ok_or_else(|| {
            ApiError::unavailable(
                "Unable to generate download link. The video may be protected or unavailable."
            )
        })
}

#[tracing::instrument(skip(state))]
pub async fn playlist_info(
    State(state): State<AppState>,
    Query(params): Query<PlaylistInfoParams>
) -> Result<Json<PlaylistInfoResponse>, ApiError> {
    let url = require_playlist_url(params.url.as_deref())?;
    let limit = parse_limit(
        params.limit.as_deref(),
        PLAYLIST_INFO_DEFAULT_LIMIT,
        PLAYLIST_INFO_MAX_LIMIT
    )?;

    let playlist = state.yt_dlp.get_playlist_info(&url, Some(limit)).await?;

    Ok(Json(PlaylistInfoResponse::from_playlist(&playlist, limit as usize)))
}

#[tracing::instrument(skip(state))]
pub async fn playlist_download(
    State(state): State<AppState>,
    Query(params): Query<PlaylistDownloadParams>
) -> Result<Json<PlaylistDownloadResponse>, ApiError> {
    let url = require_playlist_url(params.url.as_deref())?;
    let quality = parse_quality(params.quality.as_deref())?;
    let format = parse_format(params.format.as_deref())?;
    let limit = parse_limit(
        params.limit.as_deref(),
        PLAYLIST_DOWNLOAD_DEFAULT_LIMIT,
        PLAYLIST_DOWNLOAD_MAX_LIMIT
    )?;

    let playlist = state.yt_dlp.get_playlist_info(&url, Some(limit)).await?;
    let playlist_info = PlaylistInfoResponse::from_playlist(&playlist, limit as usize);

    let selector = quality::format_selector(quality, format);
    let mut download_links = Vec::with_capacity(playlist_info.videos.len());

    // Entries that fail to resolve are reported in place, not fatal for
    // the rest of the batch.
    for video in &playlist_info.videos {
        let video_url = youtube::watch_url(&video.id);
        let entry = match state.yt_dlp.get_video_info_with_format(&video_url, selector).await {
            Ok(info) => match DownloadLink::from_selected(&info, quality, format) {
                Some(link) => PlaylistDownloadEntry {
                    video_info: video.clone(),
                    download_info: Some(link),
                    error: None
                },
                None => PlaylistDownloadEntry {
                    video_info: video.clone(),
                    download_info: None,
                    error: Some("No direct download URL available".to_string())
                }
            },
            Err(err) => {
                tracing::warn!(video_id = %video.id, "skipping playlist entry: {err}");
                PlaylistDownloadEntry {
                    video_info: video.clone(),
                    download_info: None,
                    error: Some(err.to_string())
                }
            }
        };
        download_links.push(entry);
    }

    let total_processed = download_links.len();

    Ok(Json(PlaylistDownloadResponse {
        playlist_info,
        download_links,
        total_processed
    }))
}

fn require_video_url(url: Option<&str>) -> Result<String, ApiError> {
    let url = url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing required parameter: url"))?;

    if !youtube::is_valid_video_url(url) {
        return Err(ApiError::bad_request("Invalid YouTube URL"));
    }

    Ok(youtube::normalize_video_url(url))
}

fn require_playlist_url(url: Option<&str>) -> Result<String, ApiError> {
    let url = url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing required parameter: url"))?;

    if !youtube::is_playlist_url(url) {
        return Err(ApiError::bad_request("Invalid playlist URL"));
    }

    Ok(url.to_string())
}

fn parse_quality(raw: Option<&str>) -> Result<Quality, ApiError> {
    match raw {
        None => Ok(Quality::default()),
        Some(s) => Quality::parse(s).ok_or_else(|| ApiError::bad_request("Invalid quality option"))
    }
}

fn parse_format(raw: Option<&str>) -> Result<MediaFormat, ApiError> {
    match raw {
        None => Ok(MediaFormat::default()),
        Some(s) => {
            MediaFormat::parse(s).ok_or_else(|| ApiError::bad_request("Invalid format option"))
        }
    }
}

fn parse_limit(raw: Option<&str>, default: u32, max: u32) -> Result<u32, ApiError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    let limit: u32 = raw
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid limit: must be an integer between 1 and {max}")))?;

    if limit == 0 || limit > max {
        return Err(ApiError::bad_request(format!(
            "Invalid limit: must be between 1 and {max}"
        )));
    }

    Ok(limit)
}

fn parse_bool(raw: Option<&str>, name: &str) -> Result<bool, ApiError> {
    match raw {
        None => Ok(false),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ApiError::bad_request(format!("Invalid boolean value for {name}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use yt_dlp::YtDlp;

    // Validation must reject before the extractor is touched, so a state
    // pointing at a binary that cannot exist proves no external call is made
    // whenever a handler returns 400.
    fn stub_state() -> AppState {
        AppState::new(YtDlp::with_binary("/nonexistent/yt-dlp"))
    }

    fn video_info_params(url: Option<&str>, include_formats: Option<&str>) -> VideoInfoParams {
        VideoInfoParams {
            url: url.map(String::from),
            include_formats: include_formats.map(String::from)
        }
    }

    #[tokio::test]
    async fn test_video_info_missing_url() {
        let err = video_info(State(stub_state()), Query(video_info_params(None, None)))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_video_info_invalid_url() {
        for url in ["not a url", "https://vimeo.com/123", "https://www.youtube.com/watch?v=short"] {
            let err = video_info(State(stub_state()), Query(video_info_params(Some(url), None)))
                .await
                .unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST, "{url}");
        }
    }

    #[tokio::test]
    async fn test_video_info_invalid_include_formats() {
        let params = video_info_params(Some("https://youtu.be/dQw4w9WgXcQ"), Some("maybe"));
        let err = video_info(State(stub_state()), Query(params)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_video_download_rejects_unknown_enums() {
        let err = video_download(
            State(stub_state()),
            Query(VideoDownloadParams {
                url: Some("https://youtu.be/dQw4w9WgXcQ".to_string()),
                quality: Some("ultra".to_string()),
                format: None
            })
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = video_download(
            State(stub_state()),
            Query(VideoDownloadParams {
                url: Some("https://youtu.be/dQw4w9WgXcQ".to_string()),
                quality: None,
                format: Some("avi".to_string())
            })
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_video_download_extraction_failure_is_internal() {
        // Valid input with an unreachable binary falls through to the
        // extractor and surfaces as 500, not 400.
        let err = video_download(
            State(stub_state()),
            Query(VideoDownloadParams {
                url: Some("https://youtu.be/dQw4w9WgXcQ".to_string()),
                quality: Some("high".to_string()),
                format: Some("mp4".to_string())
            })
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_playlist_info_rejects_non_playlist_url() {
        let err = playlist_info(
            State(stub_state()),
            Query(PlaylistInfoParams {
                url: Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()),
                limit: None
            })
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_playlist_info_rejects_out_of_range_limit() {
        for limit in ["0", "101", "-1", "abc"] {
            let err = playlist_info(
                State(stub_state()),
                Query(PlaylistInfoParams {
                    url: Some("https://www.youtube.com/playlist?list=PL123".to_string()),
                    limit: Some(limit.to_string())
                })
            )
            .await
            .unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST, "limit={limit}");
        }
    }

    #[tokio::test]
    async fn test_playlist_download_rejects_limit_over_fifty() {
        let err = playlist_download(
            State(stub_state()),
            Query(PlaylistDownloadParams {
                url: Some("https://www.youtube.com/playlist?list=PL123".to_string()),
                quality: None,
                format: None,
                limit: Some("51".to_string())
            })
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_parse_limit_defaults_and_bounds() {
        assert_eq!(parse_limit(None, 50, 100).unwrap(), 50);
        assert_eq!(parse_limit(Some("1"), 50, 100).unwrap(), 1);
        assert_eq!(parse_limit(Some("100"), 50, 100).unwrap(), 100);
        assert!(parse_limit(Some("0"), 50, 100).is_err());
        assert!(parse_limit(Some("101"), 50, 100).is_err());
        assert!(parse_limit(Some("ten"), 50, 100).is_err());
    }

    #[test]
    fn test_parse_bool_values() {
        assert!(!parse_bool(None, "x").unwrap());
        assert!(parse_bool(Some("true"), "x").unwrap());
        assert!(parse_bool(Some("TRUE"), "x").unwrap());
        assert!(parse_bool(Some("1"), "x").unwrap());
        assert!(!parse_bool(Some("false"), "x").unwrap());
        assert!(!parse_bool(Some("0"), "x").unwrap());
        assert!(parse_bool(Some("yes"), "x").is_err());
    }

    #[test]
    fn test_require_video_url_normalizes() {
        let url = require_video_url(Some(" https://youtu.be/dQw4w9WgXcQ ")).unwrap();
        assert_eq!(url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let Json(body) = root().await;
        assert_eq!(body["message"], "YouTube Downloader API");
        assert!(body["endpoints"].get("/video/download").is_some());
        assert!(body["endpoints"].get("/playlist/info").is_some());
    }

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "healthy");
    }
}
