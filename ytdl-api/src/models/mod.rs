mod playlist;
mod video;

pub use playlist::{PlaylistDownloadEntry, PlaylistDownloadResponse, PlaylistEntry, PlaylistInfoResponse};
pub use video::{DownloadLink, FormatEntry, VideoInfoResponse, VideoStatusResponse};
