//! Async Rust wrapper for the yt-dlp CLI, limited to metadata extraction.
//!
//! This library shells out to the yt-dlp command-line tool to resolve video
//! and playlist metadata (including direct media URLs for a selected format)
//! without downloading anything.
//!
//! # Example
//!
//! ```no_run
//! use yt_dlp::YtDlp;
//!
//! #[tokio::main]
//! async fn main() -> yt_dlp::Result<()> {
//!     let client = YtDlp::new();
//!
//!     // Check that yt-dlp is available
//!     let version = client.check_binary().await?;
//!     println!("yt-dlp version: {}", version);
//!
//!     // Get video info without downloading
//!     let info = client.get_video_info("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await?;
//!     println!("Title: {}", info.title);
//!
//!     // Resolve a direct URL for the best format capped at 720p
//!     let info = client
//!         .get_video_info_with_format("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "best[height<=720]")
//!         .await?;
//!     println!("Direct URL: {:?}", info.url);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod command;
pub mod error;
pub mod types;

pub use client::YtDlp;
pub use error::{Error, FailureKind, Result};
pub use types::{Format, PlaylistInfo, Thumbnail, VideoInfo};
