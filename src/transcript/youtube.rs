//! YouTube video references and metadata.

use crate::error::{BrieflyError, Result};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static VIDEO_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^
        (?:https?://)?
        (?:(?:www|m|music)\.)?
        (?:
            youtube\.com/(?:watch\?(?:[^\#\s]*&)?v=|embed/|v/|shorts/|live/)
            |
            youtu\.be/
        )
        ([a-zA-Z0-9_-]{11})
        (?:[?&\#/][^\s]*)?
        $
    ",
    )
    .expect("Invalid regex")
});

/// A validated reference to a single YouTube video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReference {
    id: String,
    url: String,
}

impl VideoReference {
    /// Validate a URL and extract its video ID.
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(BrieflyError::InvalidUrl("URL is empty".to_string()));
        }

        let id = VIDEO_URL
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| BrieflyError::InvalidUrl(url.to_string()))?;

        Ok(Self {
            id,
            url: url.to_string(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The URL as supplied by the caller.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Watch URL without playlist or tracking parameters.
    pub fn canonical_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

impl std::fmt::Display for VideoReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Metadata reported by `yt-dlp --dump-json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoMetadata {
    pub id: String,
    /// Primary language of the video, when YouTube reports one.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    pub title: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, rename = "duration")]
    pub duration_seconds: Option<f64>,
    /// Upload date as `YYYYMMDD`.
    #[serde(default)]
    pub upload_date: Option<String>,
}

impl VideoMetadata {
    /// Parse the first JSON record of `--dump-json` output.
    pub fn from_dump_json(stdout: &[u8]) -> Result<Self> {
        let text = String::from_utf8_lossy(stdout);
        let line = text
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .ok_or_else(|| BrieflyError::ToolFailed("yt-dlp printed no metadata".to_string()))?;

        Ok(serde_json::from_str(line)?)
    }

    pub fn upload_date(&self) -> Option<NaiveDate> {
        self.upload_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y%m%d").ok())
    }

    /// Format the duration as MM:SS or HH:MM:SS.
    pub fn format_duration(&self) -> Option<String> {
        let total_seconds = self.duration_seconds? as u64;
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let secs = total_seconds % 60;

        Some(if hours > 0 {
            format!("{:02}:{:02}:{:02}", hours, minutes, secs)
        } else {
            format!("{:02}:{:02}", minutes, secs)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_video_urls() {
        let cases = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=abc",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://music.youtube.com/watch?v=dQw4w9WgXcQ&list=RD",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/live/dQw4w9WgXcQ",
            "youtube.com/watch?v=dQw4w9WgXcQ",
            "  https://youtu.be/dQw4w9WgXcQ  ",
        ];

        for url in cases {
            let reference = VideoReference::parse(url).unwrap_or_else(|e| panic!("{url}: {e}"));
            assert_eq!(reference.id(), "dQw4w9WgXcQ");
            assert_eq!(
                reference.canonical_url(),
                "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
            );
        }
    }

    #[test]
    fn test_reject_non_video_urls() {
        let cases = [
            "",
            "dQw4w9WgXcQ",
            "https://vimeo.com/123456789",
            "https://www.youtube.com/",
            "https://www.youtube.com/playlist?list=PLtest",
            "https://www.youtube.com/@channel",
            "https://youtu.be/short",
            "https://evil.example/youtube.com/watch?v=dQw4w9WgXcQ",
            "--exec rm https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ extra",
        ];

        for url in cases {
            assert!(
                matches!(VideoReference::parse(url), Err(BrieflyError::InvalidUrl(_))),
                "{url}"
            );
        }
    }

    #[test]
    fn test_metadata_from_dump_json() {
        let stdout = br#"{"id": "dQw4w9WgXcQ", "title": "Never Gonna Give You Up", "uploader": "Rick Astley", "language": "en", "thumbnail": "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg", "duration": 213, "upload_date": "20091025", "formats": []}
"#;
        let meta = VideoMetadata::from_dump_json(stdout).unwrap();
        assert_eq!(meta.title, "Never Gonna Give You Up");
        assert_eq!(meta.uploader.as_deref(), Some("Rick Astley"));
        assert_eq!(meta.language.as_deref(), Some("en"));
        assert_eq!(meta.format_duration().as_deref(), Some("03:33"));
        assert_eq!(meta.upload_date(), NaiveDate::from_ymd_opt(2009, 10, 25));
    }

    #[test]
    fn test_metadata_with_null_fields() {
        let meta = VideoMetadata::from_dump_json(
            br#"{"id": "abc", "title": "t", "language": null, "uploader": null}"#,
        )
        .unwrap();
        assert!(meta.language.is_none());
        assert!(meta.format_duration().is_none());
    }

    #[test]
    fn test_metadata_garbage_fails() {
        assert!(VideoMetadata::from_dump_json(b"ERROR: not json").is_err());
        assert!(VideoMetadata::from_dump_json(b"\n\n").is_err());
    }
}
