use std::sync::Arc;

use yt_dlp::YtDlp;

#[derive(Clone)]
pub struct AppState {
    pub yt_dlp: Arc<YtDlp>
}

impl AppState {
    pub fn new(yt_dlp: YtDlp) -> Self {
        Self {
            yt_dlp: Arc::new(yt_dlp)
        }
    }
}
