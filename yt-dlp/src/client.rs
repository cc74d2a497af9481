use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Output;

use tokio::process::Command;

use crate::command::CommandBuilder;
use crate::error::{Error, Result};
use crate::types::{PlaylistInfo, VideoInfo};

#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
    cookies_file: Option<PathBuf>,
    extra_args: Vec<String>,
    env_vars: HashMap<String, String>
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new()
    }
}

impl YtDlp {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("yt-dlp"),
            cookies_file: None,
            extra_args: Vec::new(),
            env_vars: HashMap::new()
        }
    }

    pub fn with_binary(path: impl Into<PathBuf>) -> Self {
        Self {
            binary: path.into(),
            cookies_file: None,
            extra_args: Vec::new(),
            env_vars: HashMap::new()
        }
    }

    pub fn set_binary(&mut self, path: PathBuf) {
        self.binary = path;
    }

    pub fn set_cookies_file(&mut self, path: Option<PathBuf>) {
        self.cookies_file = path;
    }

    pub fn set_extra_args(&mut self, args: Vec<String>) {
        self.extra_args = args;
    }

    pub fn set_env(&mut self, key: String, value: String) {
        self.env_vars.insert(key, value);
    }

    pub async fn check_binary(&self) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .await?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(Error::BinaryNotExecutable(self.binary.clone()))
        }
    }

    /// Fetch full metadata for a single video without downloading it.
    pub async fn get_video_info(&self, url: &str) -> Result<VideoInfo> {
        let output = self
            .command()
            .json_output()
            .skip_download()
            .no_playlist()
            .url(url)
            .build_with_env(&self.env_vars)
            .output()
            .await?;

        let output = Self::check_output(output)?;
        let info: VideoInfo = serde_json::from_slice(&output.stdout)?;
        Ok(info)
    }

    /// Fetch metadata with a yt-dlp format selection expression applied.
    ///
    /// The returned `url`/`ext`/`format_id` fields describe the format the
    /// expression selected, which is how direct media URLs are resolved.
    pub async fn get_video_info_with_format(
        &self,
        url: &str,
        format_expr: &str
    ) -> Result<VideoInfo> {
        let output = self
            .command()
            .json_output()
            .skip_download()
            .no_playlist()
            .format(format_expr)
            .url(url)
            .build_with_env(&self.env_vars)
            .output()
            .await?;

        let output = Self::check_output(output)?;
        let info: VideoInfo = serde_json::from_slice(&output.stdout)?;
        Ok(info)
    }

    /// Fetch a playlist's entries as flat metadata, one JSON object per line
    /// of stdout, optionally stopping at `limit` entries.
    pub async fn get_playlist_info(&self, url: &str, limit: Option<u32>) -> Result<PlaylistInfo> {
        let mut builder = self
            .command()
            .json_output()
            .skip_download()
            .yes_playlist()
            .flat_playlist();

        if let Some(limit) = limit {
            builder = builder.playlist_end(limit);
        }

        let output = builder
            .url(url)
            .build_with_env(&self.env_vars)
            .output()
            .await?;

        let output = Self::check_output(output)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_flat_playlist(&stdout)
    }

    fn check_output(output: Output) -> Result<Output> {
        if output.status.success() {
            Ok(output)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            Err(Error::CommandFailed {
                code: output.status.code().unwrap_or(-1),
                stderr
            })
        }
    }

    fn command(&self) -> CommandBuilder {
        CommandBuilder::new(&self.binary)
            .no_warnings()
            .cookies_file_opt(self.cookies_file.as_ref())
            .args(self.extra_args.iter().map(String::as_str))
    }
}

/// Fold `--flat-playlist --dump-json` output (one entry per line) into a
/// single [`PlaylistInfo`]. Lines that fail to parse are skipped, matching
/// yt-dlp's own ignore-errors behavior for dead entries.
fn parse_flat_playlist(stdout: &str) -> Result<PlaylistInfo> {
    let mut entries = Vec::new();
    let mut playlist_info: Option<PlaylistInfo> = None;

    for line in stdout.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(info) = serde_json::from_str::<VideoInfo>(line) {
            if playlist_info.is_none() {
                playlist_info = Some(PlaylistInfo {
                    id: info.playlist_id.clone().unwrap_or_default(),
                    title: info.playlist_title.clone(),
                    description: None,
                    uploader: info.uploader.clone(),
                    uploader_id: info.uploader_id.clone(),
                    channel: info.channel.clone(),
                    channel_id: info.channel_id.clone(),
                    entries: Vec::new(),
                    playlist_count: info.playlist_count
                });
            }
            entries.push(info);
        } else {
            tracing::debug!(line, "skipping unparseable playlist entry");
        }
    }

    match playlist_info {
        Some(mut info) => {
            info.entries = entries;
            Ok(info)
        }
        None => Err(Error::EmptyPlaylist)
    }
}
