pub mod orchestrator;
pub mod parser;
pub mod prompt;

pub use orchestrator::{QuizGenerator, QuizOutcome, INVALID_VIDEO_ID};
pub use parser::parse_quiz;
pub use prompt::build_quiz_prompt;

use serde::{Deserialize, Serialize};

/// A multiple-choice question whose answer is always one of its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    text: String,
    options: [String; 4],
    correct: String,
}

impl QuizQuestion {
    /// Build a question, resolving the answer by option index.
    /// Returns `None` when the index is out of range or the text is empty.
    pub fn new(text: impl Into<String>, options: [String; 4], correct_index: usize) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            return None;
        }
        let correct = options.get(correct_index)?.clone();
        Some(Self {
            text,
            options,
            correct,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String; 4] {
        &self.options
    }

    pub fn correct(&self) -> &str {
        &self.correct
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse without failing: anything unrecognized is treated as medium.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Wording used in the quiz prompt.
    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Easy => "simple and straightforward, testing basic understanding and recall",
            Difficulty::Medium => "moderately challenging, testing comprehension and application",
            Difficulty::Hard => "challenging, testing deep understanding, analysis, and synthesis",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!(
                "Invalid difficulty. Must be one of: {}",
                Difficulty::ALL.map(|d| d.as_str()).join(", ")
            )),
        }
    }
}
