use crate::config::Config;
use crate::error::{QuizError, Result};
use crate::metadata::{MetadataSource, YouTubeDataApi};
use crate::transcript::{format_segments, is_english, select_track, TranscriptSource, YouTubeCaptions};
use crate::translate::{chunk_text, LibreTranslator, Translator, DEFAULT_CHUNK_SIZE};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where the quiz content came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentOrigin {
    /// An English caption track.
    English,
    /// A non-English track translated to English.
    Translated(String),
    /// A non-English track kept as-is (translation disabled).
    Untranslated(String),
    /// Title, description and tags from the Data API.
    Metadata,
}

impl std::fmt::Display for ContentOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentOrigin::English => write!(f, "English transcript"),
            ContentOrigin::Translated(lang) => write!(f, "Translated {} transcript", lang),
            ContentOrigin::Untranslated(lang) => write!(f, "{} transcript", lang),
            ContentOrigin::Metadata => write!(f, "YouTube metadata (title, description, tags)"),
        }
    }
}

/// Text to build a quiz from, with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptResult {
    pub text: String,
    pub origin: ContentOrigin,
}

impl TranscriptResult {
    pub fn source_label(&self) -> String {
        self.origin.to_string()
    }
}

/// Acquires quiz content for a video: captions first, translated to
/// English when needed, with video metadata as the fallback.
pub struct TranscriptPipeline {
    transcripts: Arc<dyn TranscriptSource>,
    metadata: Arc<dyn MetadataSource>,
    translator: Option<Arc<dyn Translator>>,
    preferred_languages: Vec<String>,
    chunk_size: usize,
}

impl TranscriptPipeline {
    pub fn new(transcripts: Arc<dyn TranscriptSource>, metadata: Arc<dyn MetadataSource>) -> Self {
        Self {
            transcripts,
            metadata,
            translator: None,
            preferred_languages: Vec::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Build the pipeline with the live YouTube and LibreTranslate clients.
    pub fn from_config(config: &Config) -> Self {
        let transcripts = Arc::new(YouTubeCaptions::with_base_url(config.youtube_base_url.clone()));
        let metadata = Arc::new(YouTubeDataApi::with_base_url(
            config.youtube_api_key.clone(),
            config.youtube_data_url.clone(),
        ));

        let mut pipeline = Self::new(transcripts, metadata)
            .with_preferred_languages(config.preferred_languages.clone())
            .with_chunk_size(config.chunk_size);

        if config.translate {
            let translator = LibreTranslator::new(config.translate_url.clone())
                .with_api_key(config.translate_api_key.clone());
            pipeline = pipeline.with_translator(Arc::new(translator));
        }

        pipeline
    }

    /// Translate non-English transcripts with this translator.
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_preferred_languages(mut self, languages: Vec<String>) -> Self {
        self.preferred_languages = languages;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Run the acquisition for one video.
    ///
    /// A video without captions falls back to metadata and, if that also
    /// fails, reports the metadata error. Any other transcript failure also
    /// falls back, but a metadata failure then reports both errors.
    pub async fn acquire(&self, video_id: &str) -> Result<TranscriptResult> {
        match self.fetch_transcript(video_id).await {
            Ok(result) => Ok(result),
            Err(e) if e.is_transcript_unavailable() => {
                info!("No transcript for {} ({}), using metadata", video_id, e);
                self.fetch_metadata(video_id).await
            }
            Err(e) => {
                warn!(
                    "Failed to fetch transcript for {}: {}. Attempting to fetch metadata.",
                    video_id, e
                );
                self.fetch_metadata(video_id)
                    .await
                    .map_err(|m| QuizError::ContentUnavailable {
                        transcript: e.to_string(),
                        metadata: m.to_string(),
                    })
            }
        }
    }

    async fn fetch_transcript(&self, video_id: &str) -> Result<TranscriptResult> {
        let tracks = self.transcripts.list_tracks(video_id).await?;

        let track = select_track(&tracks, &self.preferred_languages).ok_or_else(|| {
            QuizError::TranscriptUnavailable(format!("no transcript found for video {}", video_id))
        })?;
        let lang = track.language_code.clone();
        debug!("Selected {} track '{}'", lang, track.name);

        let segments = self.transcripts.fetch_track(track).await?;
        let text = format_segments(&segments);
        if text.trim().is_empty() {
            return Err(QuizError::TranscriptUnavailable(format!(
                "{} transcript for video {} is empty",
                lang, video_id
            )));
        }

        info!(
            "Fetched {} transcript for {} ({} segments) via {}",
            lang,
            video_id,
            segments.len(),
            self.transcripts.name()
        );

        if is_english(&lang) {
            return Ok(TranscriptResult {
                text,
                origin: ContentOrigin::English,
            });
        }

        match &self.translator {
            Some(translator) => {
                let text = self.translate_chunks(translator.as_ref(), &text, &lang).await;
                Ok(TranscriptResult {
                    text,
                    origin: ContentOrigin::Translated(lang),
                })
            }
            None => Ok(TranscriptResult {
                text,
                origin: ContentOrigin::Untranslated(lang),
            }),
        }
    }

    /// Translate chunk by chunk, in order, each chunk followed by a newline.
    async fn translate_chunks(&self, translator: &dyn Translator, text: &str, lang: &str) -> String {
        let chunks = chunk_text(text, self.chunk_size);
        info!(
            "Translating {} transcript in {} chunk(s) with {}",
            lang,
            chunks.len(),
            translator.name()
        );

        let mut translated = String::with_capacity(text.len());
        for chunk in &chunks {
            translated.push_str(&translator.translate_or_passthrough(chunk, lang, "en").await);
            translated.push('\n');
        }
        translated
    }

    async fn fetch_metadata(&self, video_id: &str) -> Result<TranscriptResult> {
        let metadata = self.metadata.fetch_metadata(video_id).await?;
        info!("Using {} for {}: '{}'", self.metadata.name(), video_id, metadata.title);

        Ok(TranscriptResult {
            text: metadata.to_text(),
            origin: ContentOrigin::Metadata,
        })
    }
}
