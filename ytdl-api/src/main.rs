mod error;
mod handlers;
mod models;
mod quality;
mod state;
mod youtube;

use std::path::PathBuf;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yt_dlp::YtDlp;

use handlers::api;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ytdl_api=info,tower_http=debug".into())
        )
        .init();

    let mut yt_dlp = match std::env::var("YTDLP_PATH") {
        Ok(path) if !path.is_empty() => {
            tracing::info!("Using custom yt-dlp path: {}", path);
            YtDlp::with_binary(path)
        }
        _ => YtDlp::new()
    };

    if let Ok(cookies) = std::env::var("YTDLP_COOKIES") {
        if !cookies.is_empty() {
            let path = PathBuf::from(&cookies);
            if path.exists() {
                yt_dlp.set_cookies_file(Some(path));
                tracing::info!("Using cookies file: {}", cookies);
            } else {
                tracing::warn!("Cookies file does not exist: {}", cookies);
            }
        }
    }

    if let Ok(args_str) = std::env::var("YTDLP_EXTRACTOR_ARGS") {
        let parsed = parse_extractor_args(&args_str);
        if !parsed.is_empty() {
            yt_dlp.set_extra_args(parsed);
        }
    }

    match yt_dlp.check_binary().await {
        Ok(version) => tracing::info!("yt-dlp version: {}", version),
        Err(e) => tracing::warn!("yt-dlp not found or not executable: {}", e)
    }

    let state = AppState::new(yt_dlp);

    let app = Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health))
        .route("/video/info", get(api::video_info))
        .route("/video/status", get(api::video_status))
        .route("/video/download", get(api::video_download))
        .route("/playlist/info", get(api::playlist_info))
        .route("/playlist/download", get(api::playlist_download))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("0.0.0.0:{port}");
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Turn newline-separated extractor args (e.g. `youtube:player_client=android,web`)
/// into the single `--extractor-args` flag yt-dlp expects.
fn parse_extractor_args(input: &str) -> Vec<String> {
    let joined: Vec<&str> = input
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if joined.is_empty() {
        return Vec::new();
    }
    vec![
        "--extractor-args".to_string(),
        joined.join(";")
    ]
}
