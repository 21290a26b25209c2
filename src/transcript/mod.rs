//! Transcript acquisition for Briefly.
//!
//! Video links are validated, `yt-dlp` is asked for metadata or a subtitle
//! track, and the downloaded SRT file is cleaned into plain text.

mod fetcher;
mod srt;
mod youtube;
mod ytdlp;

pub use fetcher::TranscriptFetcher;
pub use srt::clean_srt;
pub use youtube::{VideoMetadata, VideoReference};
pub use ytdlp::{run_with_retry, ExtractorRunner, RetryPolicy, YtDlp};
