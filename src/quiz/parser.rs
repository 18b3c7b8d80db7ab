//! Decoder for the line-based quiz format the model is asked to produce:
//!
//! ```text
//! 1. Question text
//! A) Option
//! B) Option
//! C) Option
//! D) Option
//! Correct: B
//! ```
//!
//! Malformed blocks are dropped; parsing never fails as a whole.

use crate::quiz::QuizQuestion;
use regex::Regex;
use tracing::debug;

/// Minimum lines in a block: question, four options, answer.
const MIN_BLOCK_LINES: usize = 6;

/// Parse a model reply into questions, skipping any block that does not
/// have a question, exactly four options and a resolvable answer letter.
pub fn parse_quiz(reply: &str) -> Vec<QuizQuestion> {
    let (Ok(item_start), Ok(marker)) = (Regex::new(r"^\d+\.(\s|$)"), Regex::new(r"^\d+\.")) else {
        return Vec::new();
    };

    let blocks = split_blocks(reply.trim(), &item_start);
    let total = blocks.len();

    let questions: Vec<QuizQuestion> = blocks
        .into_iter()
        .filter_map(|block| parse_block(&block, &marker))
        .collect();

    if questions.len() < total {
        debug!("Dropped {} malformed quiz block(s)", total - questions.len());
    }

    questions
}

fn split_blocks<'a>(text: &'a str, item_start: &Regex) -> Vec<Vec<&'a str>> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();

    for line in text.lines() {
        match blocks.last_mut() {
            Some(block) if !item_start.is_match(line) => block.push(line),
            _ => blocks.push(vec![line]),
        }
    }

    blocks
}

fn parse_block(block: &[&str], marker: &Regex) -> Option<QuizQuestion> {
    // Trailing blank lines belong to the separator, not the block.
    let end = block.iter().rposition(|l| !l.trim().is_empty())? + 1;
    let lines = &block[..end];
    if lines.len() < MIN_BLOCK_LINES {
        return None;
    }

    let first = lines[0].trim();
    let question = marker.replace(first, "").trim().to_string();

    let options: Vec<String> = lines[1..5]
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(option_text)
        .collect();
    let options: [String; 4] = options.try_into().ok()?;

    let index = answer_index(lines[lines.len() - 1])?;
    QuizQuestion::new(question, options, index)
}

/// Text after the `X)` label, or the whole line when there is no label.
fn option_text(line: &str) -> String {
    match line.split_once(')') {
        Some((_, rest)) => rest.trim().to_string(),
        None => line.to_string(),
    }
}

/// Map the letter after `correct:` to an option index.
fn answer_index(line: &str) -> Option<usize> {
    let lower = line.to_lowercase();
    let (_, after) = lower.split_once("correct:")?;
    let letter = after.trim().trim_matches(|c: char| !c.is_alphanumeric());

    match letter {
        "a" => Some(0),
        "b" => Some(1),
        "c" => Some(2),
        "d" => Some(3),
        _ => None,
    }
}
