use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("yt-dlp binary not executable: {0}")]
    BinaryNotExecutable(PathBuf),

    #[error("failed to execute yt-dlp: {0}")]
    ExecutionFailed(#[from] std::io::Error),

    #[error("yt-dlp command failed with exit code {code}: {stderr}")]
    CommandFailed { code: i32, stderr: String },

    #[error("failed to parse JSON output: {0}")]
    JsonParseFailed(#[from] serde_json::Error),

    #[error("playlist is empty")]
    EmptyPlaylist
}

/// Coarse classification of an extraction failure, derived from yt-dlp's
/// stderr. Lets callers distinguish user-caused failures (private or removed
/// videos) from everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    SignInRequired,
    PrivateVideo,
    VideoUnavailable,
    Other
}

impl Error {
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Error::CommandFailed { stderr, .. } => classify_stderr(stderr),
            _ => FailureKind::Other
        }
    }
}

fn classify_stderr(stderr: &str) -> FailureKind {
    if stderr.contains("Sign in to confirm") {
        FailureKind::SignInRequired
    } else if stderr.contains("Private video") {
        FailureKind::PrivateVideo
    } else if stderr.contains("Video unavailable") {
        FailureKind::VideoUnavailable
    } else {
        FailureKind::Other
    }
}

pub type Result<T> = std::result::Result<T, Error>;
