use crate::config::Config;
use crate::error::{QuizError, Result};
use crate::llm::{ChatModel, OpenAiChat};
use crate::pipeline::TranscriptPipeline;
use crate::quiz::{build_quiz_prompt, parse_quiz, Difficulty, QuizQuestion};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Length of a YouTube video id.
pub const VIDEO_ID_LEN: usize = 11;

pub const INVALID_VIDEO_ID: &str = "Invalid video ID. Must be an 11-character string.";

pub const ALL_MODELS_FAILED: &str = "All AI models failed to generate valid quizzes";

/// Result of one quiz generation request.
///
/// Either `quizzes` is non-empty or `error` is set. The transcript and its
/// source label are attached whenever they were acquired.
#[derive(Debug, Clone)]
pub struct QuizOutcome {
    pub quizzes: Vec<QuizQuestion>,
    pub error: Option<String>,
    pub transcript: Option<String>,
    pub transcript_source: Option<String>,
    /// Model that produced the quiz.
    pub model: Option<String>,
}

impl QuizOutcome {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            quizzes: Vec::new(),
            error: Some(error.into()),
            transcript: None,
            transcript_source: None,
            model: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && !self.quizzes.is_empty()
    }
}

/// Drives transcript acquisition and the model fallback chain.
pub struct QuizGenerator {
    pipeline: TranscriptPipeline,
    chat: Arc<dyn ChatModel>,
    models: Vec<String>,
}

impl QuizGenerator {
    pub fn new(pipeline: TranscriptPipeline, chat: Arc<dyn ChatModel>, models: Vec<String>) -> Self {
        Self {
            pipeline,
            chat,
            models,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let chat = OpenAiChat::new(config.llm_base_url.clone(), config.llm_api_key.clone())
            .with_temperature(config.temperature);

        Self::new(
            TranscriptPipeline::from_config(config),
            Arc::new(chat),
            config.models.clone(),
        )
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Generate `num_questions` questions for a video.
    ///
    /// Only invalid input is returned as `Err`; every downstream failure is
    /// reported through the outcome's `error`.
    pub async fn generate(
        &self,
        video_id: &str,
        num_questions: usize,
        difficulty: Difficulty,
    ) -> Result<QuizOutcome> {
        validate_video_id(video_id)?;
        if num_questions == 0 {
            return Err(QuizError::InvalidInput(
                "Number of questions must be a positive integer".to_string(),
            ));
        }

        let start = Instant::now();
        info!(
            "Generating {} {} questions for {}",
            num_questions, difficulty, video_id
        );

        let content = match self.pipeline.acquire(video_id).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Content acquisition failed for {}: {}", video_id, e);
                return Ok(QuizOutcome::failure(e.to_string()));
            }
        };
        let source_label = content.source_label();

        let prompt = build_quiz_prompt(num_questions, &content.text, &source_label, difficulty.as_str());

        for model in &self.models {
            debug!("Trying model {}", model);

            let reply = match self.chat.complete(model, &prompt).await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!("Model {} failed: {}", model, e);
                    continue;
                }
            };

            let quizzes = parse_quiz(&reply);
            if quizzes.is_empty() {
                warn!("Model {} returned no parseable questions", model);
                continue;
            }

            info!(
                "Model {} produced {} question(s) from {} in {:.2}s",
                model,
                quizzes.len(),
                source_label,
                start.elapsed().as_secs_f64()
            );

            return Ok(QuizOutcome {
                quizzes,
                error: None,
                transcript: Some(content.text),
                transcript_source: Some(source_label),
                model: Some(model.clone()),
            });
        }

        warn!("All {} model(s) failed for {}", self.models.len(), video_id);
        Ok(QuizOutcome {
            quizzes: Vec::new(),
            error: Some(ALL_MODELS_FAILED.to_string()),
            transcript: Some(content.text),
            transcript_source: Some(source_label),
            model: None,
        })
    }
}

pub fn validate_video_id(video_id: &str) -> Result<()> {
    if video_id.chars().count() != VIDEO_ID_LEN {
        return Err(QuizError::InvalidInput(INVALID_VIDEO_ID.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_video_id() {
        assert!(validate_video_id("dQw4w9WgXcQ").is_ok());
        assert!(validate_video_id("short").is_err());
        assert!(validate_video_id("").is_err());
        assert!(validate_video_id("dQw4w9WgXcQx").is_err());
    }

    #[test]
    fn test_failure_outcome() {
        let outcome = QuizOutcome::failure("boom");
        assert!(!outcome.is_success());
        assert!(outcome.quizzes.is_empty());
        assert_eq!(outcome.error.as_deref(), Some("boom"));
        assert!(outcome.transcript.is_none());
    }

    #[test]
    fn test_from_config_models() {
        let generator = QuizGenerator::from_config(&Config::default());
        assert_eq!(generator.models(), ["gpt-4o", "gpt-4", "llama-3", "mistral"]);
    }
}
