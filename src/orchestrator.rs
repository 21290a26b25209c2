//! Request orchestration for Briefly.
//!
//! Coordinates one retelling: validate the link, fetch the transcript,
//! summarize it. Each request is a single linear pipeline; any failure is
//! returned to the caller as-is.

use crate::config::{Prompts, ProviderConfig, Settings};
use crate::error::Result;
use crate::summarization::{OpenAISummarizer, Summarizer, Summary};
use crate::transcript::{TranscriptFetcher, VideoMetadata, VideoReference};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// The main orchestrator for the Briefly pipeline.
pub struct Orchestrator {
    fetcher: TranscriptFetcher,
    summarizer: Arc<dyn Summarizer>,
}

impl Orchestrator {
    /// Create an orchestrator from validated startup configuration.
    pub fn new(settings: &Settings, provider: ProviderConfig) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
            &settings.general.default_language,
        )?;

        let summarizer = Arc::new(OpenAISummarizer::new(provider, prompts)?);
        info!(model = summarizer.model(), "Summarizer ready");

        Ok(Self::with_components(TranscriptFetcher::new(settings), summarizer))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(fetcher: TranscriptFetcher, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            fetcher,
            summarizer,
        }
    }

    pub fn fetcher(&self) -> &TranscriptFetcher {
        &self.fetcher
    }

    /// Fetch the transcript of `url` and summarize it in `language`.
    #[instrument(skip(self))]
    pub async fn retell(&self, url: &str, language: &str) -> Result<Summary> {
        let video = VideoReference::parse(url)?;
        let language = self.fetcher.normalize_language(language)?;

        let transcript = self.fetcher.fetch_transcript(url, &language).await?;
        info!(video_id = video.id(), chars = transcript.len(), "Summarizing transcript");

        let text = self.summarizer.summarize(&transcript, &language).await?;

        Ok(Summary {
            video_id: video.id().to_string(),
            language,
            text,
        })
    }

    /// Like [`retell`](Self::retell), but also returns the video's metadata.
    #[instrument(skip(self))]
    pub async fn retell_with_info(&self, url: &str, language: &str) -> Result<Retelling> {
        VideoReference::parse(url)?;
        self.fetcher.normalize_language(language)?;

        let metadata = self.fetcher.fetch_metadata(url).await?;
        info!(title = %metadata.title, "Video info fetched");

        let summary = self.retell(url, language).await?;
        Ok(Retelling { metadata, summary })
    }

    /// Fetch video metadata only.
    pub async fn video_info(&self, url: &str) -> Result<VideoMetadata> {
        self.fetcher.fetch_metadata(url).await
    }

    /// Fetch the cleaned transcript only.
    pub async fn transcript(&self, url: &str, language: &str) -> Result<String> {
        self.fetcher.fetch_transcript(url, language).await
    }
}

/// Summary together with the metadata of the video it describes.
#[derive(Debug, Clone, Serialize)]
pub struct Retelling {
    pub metadata: VideoMetadata,
    pub summary: Summary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BrieflyError;
    use crate::transcript::ExtractorRunner;
    use async_trait::async_trait;
    use std::sync::Mutex;

    const HELLO_SRT: &str = "1\n00:00:00,000 --> 00:00:01,500\nHello world\n\n\
                             2\n00:00:01,500 --> 00:00:03,000\nHello world\n";

    const GREETING_JSON: &[u8] = br#"{"id":"dQw4w9WgXcQ","title":"Greeting","uploader":"Test"}"#;

    /// Imitates yt-dlp: prints metadata or writes an English SRT track.
    #[derive(Default)]
    struct FakeYtDlp {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl ExtractorRunner for FakeYtDlp {
        async fn run(&self, args: &[String]) -> Result<Vec<u8>> {
            *self.calls.lock().unwrap() += 1;

            if args.iter().any(|a| a == "--dump-json") {
                return Ok(GREETING_JSON.to_vec());
            }

            let i = args.iter().position(|a| a == "--output").unwrap();
            let path = args[i + 1].replace("%(ext)s", "en.srt");
            std::fs::write(path, HELLO_SRT)?;
            Ok(Vec::new())
        }
    }

    /// Echoes the transcript it was given.
    #[derive(Default)]
    struct RecordingSummarizer {
        seen: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl Summarizer for RecordingSummarizer {
        async fn summarize(&self, text: &str, language: &str) -> Result<String> {
            self.seen
                .lock()
                .unwrap()
                .push((text.to_string(), language.to_string()));
            if self.fail {
                return Err(BrieflyError::Provider("connection refused".to_string()));
            }
            Ok(format!("Summary of: {text}"))
        }
    }

    fn orchestrator(
        scratch: &std::path::Path,
        runner: Arc<FakeYtDlp>,
        summarizer: Arc<RecordingSummarizer>,
    ) -> Orchestrator {
        let mut settings = Settings::default();
        settings.general.scratch_dir = scratch.to_string_lossy().into_owned();
        let fetcher = TranscriptFetcher::with_runner(runner, &settings);
        Orchestrator::with_components(fetcher, summarizer)
    }

    #[tokio::test]
    async fn test_retell_deduplicated_transcript() {
        let scratch = tempfile::tempdir().unwrap();
        let runner = Arc::new(FakeYtDlp::default());
        let summarizer = Arc::new(RecordingSummarizer::default());
        let orchestrator = orchestrator(scratch.path(), runner, summarizer.clone());

        let summary = orchestrator
            .retell("https://youtu.be/dQw4w9WgXcQ", "en")
            .await
            .unwrap();

        assert_eq!(summary.video_id, "dQw4w9WgXcQ");
        assert_eq!(summary.language, "en");
        assert_eq!(summary.text, "Summary of: Hello world");
        assert_eq!(
            summarizer.seen.lock().unwrap().as_slice(),
            &[("Hello world".to_string(), "en".to_string())]
        );
    }

    #[tokio::test]
    async fn test_invalid_url_makes_no_external_calls() {
        let scratch = tempfile::tempdir().unwrap();
        let runner = Arc::new(FakeYtDlp::default());
        let summarizer = Arc::new(RecordingSummarizer::default());
        let orchestrator = orchestrator(scratch.path(), runner.clone(), summarizer.clone());

        let err = orchestrator
            .retell("https://example.com/watch?v=dQw4w9WgXcQ", "en")
            .await
            .unwrap_err();

        assert!(matches!(err, BrieflyError::InvalidUrl(_)));
        assert_eq!(*runner.calls.lock().unwrap(), 0);
        assert!(summarizer.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summarizer_error_is_returned_unchanged() {
        let scratch = tempfile::tempdir().unwrap();
        let runner = Arc::new(FakeYtDlp::default());
        let summarizer = Arc::new(RecordingSummarizer {
            fail: true,
            ..Default::default()
        });
        let orchestrator = orchestrator(scratch.path(), runner, summarizer);

        let err = orchestrator
            .retell("https://youtu.be/dQw4w9WgXcQ", "en")
            .await
            .unwrap_err();
        assert!(matches!(err, BrieflyError::Provider(ref m) if m == "connection refused"));
    }

    #[tokio::test]
    async fn test_retell_with_info() {
        let scratch = tempfile::tempdir().unwrap();
        let runner = Arc::new(FakeYtDlp::default());
        let summarizer = Arc::new(RecordingSummarizer::default());
        let orchestrator = orchestrator(scratch.path(), runner.clone(), summarizer);

        let retelling = orchestrator
            .retell_with_info("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "")
            .await
            .unwrap();

        assert_eq!(retelling.metadata.title, "Greeting");
        assert_eq!(retelling.summary.language, "en");
        assert_eq!(*runner.calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_retell_with_info_rejects_language_before_extraction() {
        let scratch = tempfile::tempdir().unwrap();
        let runner = Arc::new(FakeYtDlp::default());
        let summarizer = Arc::new(RecordingSummarizer::default());
        let orchestrator = orchestrator(scratch.path(), runner.clone(), summarizer.clone());

        let err = orchestrator
            .retell_with_info("https://youtu.be/dQw4w9WgXcQ", "english!")
            .await
            .unwrap_err();

        assert!(matches!(err, BrieflyError::InvalidInput(_)));
        assert_eq!(*runner.calls.lock().unwrap(), 0);
        assert!(summarizer.seen.lock().unwrap().is_empty());
    }
}
