//! YouTube URL validation and normalization.
//!
//! URLs are treated as untrusted input: only known YouTube hosts are
//! accepted, and video ids must be exactly 11 characters over
//! `[A-Za-z0-9_-]`. Accepted shapes: `watch?v=`, `embed/`, `v/`, `shorts/`,
//! `live/` paths and `youtu.be/` short links.

const VIDEO_ID_LEN: usize = 11;

const WATCH_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "youtube-nocookie.com",
    "www.youtube-nocookie.com"
];

const SHORT_HOSTS: &[&str] = &["youtu.be", "www.youtu.be"];

pub fn is_valid_video_url(url: &str) -> bool {
    extract_video_id(url).is_some()
}

/// Canonical watch URL for whatever shape the caller supplied.
pub fn normalize_video_url(url: &str) -> String {
    match extract_video_id(url) {
        Some(id) => watch_url(&id),
        None => url.to_string()
    }
}

pub fn watch_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={id}")
}

/// Playlist URLs carry a list id rather than a video id, so validation for
/// the playlist endpoints only checks the URL points at a playlist at all.
pub fn is_playlist_url(url: &str) -> bool {
    url.to_ascii_lowercase().contains("playlist")
}

pub fn extract_video_id(url: &str) -> Option<String> {
    let rest = strip_scheme(url.trim());
    let (host, path_and_query) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx + 1..]),
        None => (rest, "")
    };
    let host = host.split(':').next().unwrap_or(host).to_ascii_lowercase();

    if SHORT_HOSTS.contains(&host.as_str()) {
        let id = path_and_query
            .split(['?', '&', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        return valid_id(id);
    }

    if !WATCH_HOSTS.contains(&host.as_str()) {
        return None;
    }

    // ?v= wins wherever it appears, matching the shapes YouTube itself emits
    if let Some(id) = query_param(path_and_query, "v") {
        return valid_id(&id);
    }

    let mut segments = path_and_query
        .split('?')
        .next()
        .unwrap_or_default()
        .split('/')
        .filter(|s| !s.is_empty());

    match segments.next() {
        Some("embed" | "v" | "shorts" | "live") => {
            valid_id(segments.next().unwrap_or_default())
        }
        _ => None
    }
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

fn query_param(path_and_query: &str, key: &str) -> Option<String> {
    let query = path_and_query.split('?').nth(1)?;
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key).then(|| v.to_string())
    })
}

fn valid_id(id: &str) -> Option<String> {
    let ok = id.len() == VIDEO_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    ok.then(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_urls() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "http://youtube.com/watch?v=dQw4w9WgXcQ",
            "www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ&t=43s",
            "https://music.youtube.com/watch?v=dQw4w9WgXcQ&list=RD123"
        ] {
            assert_eq!(extract_video_id(url).as_deref(), Some("dQw4w9WgXcQ"), "{url}");
        }
    }

    #[test]
    fn test_short_and_path_urls() {
        for url in [
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?t=30",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/live/dQw4w9WgXcQ?feature=share",
            "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ"
        ] {
            assert_eq!(extract_video_id(url).as_deref(), Some("dQw4w9WgXcQ"), "{url}");
        }
    }

    #[test]
    fn test_invalid_urls() {
        for url in [
            "",
            "not a url",
            "https://example.com/watch?v=dQw4w9WgXcQ",
            "https://vimeo.com/12345",
            "https://www.youtube.com/watch?v=tooshort",
            "https://www.youtube.com/watch?v=waytoolongid42",
            "https://www.youtube.com/watch?v=bad%chars!!",
            "https://www.youtube.com/feed/subscriptions",
            "https://youtu.be/"
        ] {
            assert!(extract_video_id(url).is_none(), "{url}");
        }
    }

    #[test]
    fn test_normalize_video_url() {
        assert_eq!(
            normalize_video_url("https://youtu.be/dQw4w9WgXcQ?t=30"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
        assert_eq!(
            normalize_video_url("https://www.youtube.com/shorts/dQw4w9WgXcQ"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_is_playlist_url() {
        assert!(is_playlist_url("https://www.youtube.com/playlist?list=PL123"));
        assert!(is_playlist_url("https://www.youtube.com/PLAYLIST?list=PL123"));
        assert!(!is_playlist_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
    }
}
