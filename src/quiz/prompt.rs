use crate::llm::ChatMessage;
use crate::quiz::Difficulty;

const SYSTEM_PROMPT: &str = "You are an expert quiz generator.";

const FORMAT_EXAMPLE: &str =
    "1. Question text\nA) Option 1\nB) Option 2\nC) Option 3\nD) Option 4\nCorrect: C";

/// Build the system and user messages asking for `num_questions` MCQs.
///
/// Content whose source label mentions metadata is framed as title,
/// description and tags, and the model is asked for general-knowledge
/// questions on the inferred topic. Anything else is treated as a transcript.
pub fn build_quiz_prompt(
    num_questions: usize,
    content: &str,
    source_label: &str,
    difficulty: &str,
) -> Vec<ChatMessage> {
    let difficulty = Difficulty::parse_lenient(difficulty).description();

    let instruction = if source_label.to_lowercase().contains("metadata") {
        format!(
            "Identify the main learning topic of a video from its metadata (title, description, tags):\n\n\
             {content}\n\n\
             Generate exactly {num_questions} accurate multiple-choice questions about that topic, \
             no more and no less, drawing on general knowledge of the subject. \
             Each question must have exactly 4 options labeled A) to D) and exactly 1 correct answer, \
             focus on key concepts or practical applications, and be {difficulty}. \
             Use clear, precise wording and plausible distractors.\n\n\
             Format every question exactly like this:\n{FORMAT_EXAMPLE}"
        )
    } else {
        format!(
            "Generate exactly {num_questions} multiple-choice quiz questions, no more and no less, \
             from this video transcript:\n\n\
             {content}\n\n\
             Each question must have exactly 4 options labeled A) to D) and exactly 1 correct answer, \
             focusing on the vocabulary, phrases and concepts used in the transcript. \
             Questions should be {difficulty}, with clear wording and plausible distractors.\n\n\
             Format every question exactly like this:\n{FORMAT_EXAMPLE}"
        )
    };

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(instruction)]
}
