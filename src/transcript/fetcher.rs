//! Metadata and transcript retrieval through yt-dlp.

use super::srt::clean_srt;
use super::youtube::{VideoMetadata, VideoReference};
use super::ytdlp::{run_with_retry, ExtractorRunner, RetryPolicy, YtDlp};
use crate::config::Settings;
use crate::error::{BrieflyError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, instrument};

const SUBTITLE_FORMAT: &str = "srt";

static LANGUAGE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,3}(?:-[A-Za-z0-9]{2,8})?$").expect("Invalid regex"));

/// Fetches video metadata and cleaned transcripts.
pub struct TranscriptFetcher {
    runner: Arc<dyn ExtractorRunner>,
    additional_options: Vec<String>,
    policy: RetryPolicy,
    scratch_root: PathBuf,
    default_language: String,
}

impl TranscriptFetcher {
    /// Create a fetcher that runs the configured yt-dlp binary.
    pub fn new(settings: &Settings) -> Self {
        let runner = Arc::new(YtDlp::new(settings.extractor.binary.clone()));
        Self::with_runner(runner, settings)
    }

    /// Create a fetcher with a custom extractor runner.
    pub fn with_runner(runner: Arc<dyn ExtractorRunner>, settings: &Settings) -> Self {
        Self {
            runner,
            additional_options: settings.extractor.additional_options.clone(),
            policy: RetryPolicy::from_settings(&settings.extractor),
            scratch_root: settings.scratch_dir(),
            default_language: settings.general.default_language.clone(),
        }
    }

    /// Fetch video metadata without downloading anything.
    #[instrument(skip(self))]
    pub async fn fetch_metadata(&self, url: &str) -> Result<VideoMetadata> {
        let video = VideoReference::parse(url)?;
        debug!(video_id = video.id(), "Fetching video info");

        let args = self.build_args(&["--dump-json".to_string()], &video);
        let stdout = run_with_retry(self.runner.as_ref(), &args, &self.policy)
            .await
            .map_err(|e| extraction_error("metadata", &video, e))?;

        let metadata = VideoMetadata::from_dump_json(&stdout).map_err(|e| BrieflyError::Extraction {
            stage: "metadata",
            url: video.url().to_string(),
            message: format!("failed to parse video info: {e}"),
        })?;

        debug!(title = %metadata.title, "Video info fetched");
        Ok(metadata)
    }

    /// Download the subtitle track for `language` (or its auto-generated
    /// variant) and return it as clean text.
    ///
    /// An empty `language` selects the configured default.
    #[instrument(skip(self))]
    pub async fn fetch_transcript(&self, url: &str, language: &str) -> Result<String> {
        let video = VideoReference::parse(url)?;
        let language = self.normalize_language(language)?;

        let scratch_error = |e: std::io::Error| stage_error("transcript", &video, e);
        tokio::fs::create_dir_all(&self.scratch_root)
            .await
            .map_err(scratch_error)?;
        let scratch = tempfile::Builder::new()
            .prefix(&format!("briefly-{}-", video.id()))
            .tempdir_in(&self.scratch_root)
            .map_err(scratch_error)?;

        let template = scratch
            .path()
            .join(format!("subtitles_{}.%(ext)s", video.id()));

        let args = self.build_args(
            &[
                "--no-progress".to_string(),
                "--skip-download".to_string(),
                "--write-subs".to_string(),
                "--write-auto-subs".to_string(),
                "--convert-subs".to_string(),
                SUBTITLE_FORMAT.to_string(),
                "--sub-lang".to_string(),
                format!("{language},{language}_auto,-live_chat"),
                "--output".to_string(),
                template.to_string_lossy().into_owned(),
            ],
            &video,
        );

        info!(video_id = video.id(), %language, "Extracting transcript");
        run_with_retry(self.runner.as_ref(), &args, &self.policy)
            .await
            .map_err(|e| extraction_error("transcript", &video, e))?;

        let path = find_subtitle_file(scratch.path(), video.id(), &language).ok_or_else(|| {
            BrieflyError::TranscriptUnavailable {
                url: video.url().to_string(),
                language: language.clone(),
            }
        })?;

        let raw = read_and_remove(&path).await.map_err(scratch_error)?;
        debug!(bytes = raw.len(), "Transcript extracted");

        let cleaned = clean_srt(&raw).map_err(|e| stage_error("cleaning", &video, e))?;
        debug!(chars = cleaned.len(), "Transcript cleaned");

        Ok(cleaned)
    }

    /// Validate a language code, applying the default for empty input.
    ///
    /// The primary subtag is lowercased; region and script subtags keep
    /// their case because yt-dlp matches track names case-sensitively.
    pub fn normalize_language(&self, language: &str) -> Result<String> {
        let language = language.trim();
        if language.is_empty() {
            return Ok(self.default_language.clone());
        }

        if !LANGUAGE_CODE.is_match(language) {
            return Err(BrieflyError::InvalidInput(format!(
                "unsupported language code: {language:?}"
            )));
        }

        Ok(match language.split_once('-') {
            Some((primary, rest)) => format!("{}-{}", primary.to_lowercase(), rest),
            None => language.to_lowercase(),
        })
    }

    /// Operator options first, then mode arguments, then the video URL.
    fn build_args(&self, mode_args: &[String], video: &VideoReference) -> Vec<String> {
        let mut args = Vec::with_capacity(self.additional_options.len() + mode_args.len() + 1);
        args.extend(self.additional_options.iter().cloned());
        args.extend(mode_args.iter().cloned());
        args.push(video.canonical_url());
        args
    }
}

fn extraction_error(
    stage: &'static str,
    video: &VideoReference,
    err: BrieflyError,
) -> BrieflyError {
    match err {
        BrieflyError::ToolNotFound(_) => err,
        other => stage_error(stage, video, other),
    }
}

/// Attach the stage and video URL to a failure.
fn stage_error(
    stage: &'static str,
    video: &VideoReference,
    err: impl std::fmt::Display,
) -> BrieflyError {
    BrieflyError::Extraction {
        stage,
        url: video.url().to_string(),
        message: err.to_string(),
    }
}

/// Locate the subtitle file written for `language`.
///
/// Prefers `subtitles_<id>.<language>.srt`, then a variant of that language
/// such as `en-orig` or `en.auto`. `eng` is a different language.
fn find_subtitle_file(dir: &Path, video_id: &str, language: &str) -> Option<PathBuf> {
    let exact = dir.join(format!("subtitles_{video_id}.{language}.{SUBTITLE_FORMAT}"));
    if exact.exists() {
        return Some(exact);
    }

    let prefix = format!("subtitles_{video_id}.{language}");
    let suffix = format!(".{SUBTITLE_FORMAT}");

    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .flatten()
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let Some(rest) = name.strip_prefix(&prefix) else {
                return false;
            };
            (rest.starts_with('.') || rest.starts_with('-')) && rest.ends_with(&suffix)
        })
        .map(|entry| entry.path())
        .collect();

    candidates.sort();
    candidates.into_iter().next()
}

/// Read a file and delete it, whether or not the read succeeded.
async fn read_and_remove(path: &Path) -> std::io::Result<String> {
    let read = tokio::fs::read(path).await;
    let removed = tokio::fs::remove_file(path).await;

    let bytes = read?;
    removed?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
