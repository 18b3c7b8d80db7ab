pub mod config;
pub mod error;
pub mod llm;
pub mod metadata;
pub mod pipeline;
pub mod quiz;
pub mod server;
pub mod transcript;
pub mod translate;

pub use config::Config;
pub use error::{QuizError, Result};
pub use pipeline::{ContentOrigin, TranscriptPipeline, TranscriptResult};
pub use quiz::{Difficulty, QuizGenerator, QuizOutcome, QuizQuestion};
