//! Quality tiers and container formats accepted by the download endpoints,
//! and their translation into yt-dlp format selection expressions.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    Highest,
    #[default]
    High,
    Medium,
    Low,
    AudioOnly
}

impl Quality {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "highest" => Some(Self::Highest),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            "audio_only" => Some(Self::AudioOnly),
            _ => None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Highest => "highest",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::AudioOnly => "audio_only"
        }
    }

    pub fn selector(self) -> &'static str {
        match self {
            Self::Highest => "best",
            Self::High => "best[height<=720]",
            Self::Medium => "best[height<=480]",
            Self::Low => "best[height<=360]",
            Self::AudioOnly => "bestaudio/best"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaFormat {
    #[default]
    Mp4,
    Webm,
    Mkv,
    Mp3
}

impl MediaFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mp4" => Some(Self::Mp4),
            "webm" => Some(Self::Webm),
            "mkv" => Some(Self::Mkv),
            "mp3" => Some(Self::Mp3),
            _ => None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Webm => "webm",
            Self::Mkv => "mkv",
            Self::Mp3 => "mp3"
        }
    }

    pub fn is_audio(self) -> bool {
        matches!(self, Self::Mp3)
    }
}

/// The expression handed to yt-dlp's `-f`. An mp3 request always selects
/// audio, regardless of the quality tier; otherwise the tier alone decides
/// and the container preference is only echoed back to the caller.
pub fn format_selector(quality: Quality, format: MediaFormat) -> &'static str {
    if format.is_audio() {
        Quality::AudioOnly.selector()
    } else {
        quality.selector()
    }
}
