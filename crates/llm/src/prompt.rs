//! One-shot study prompts layered on top of the conversation endpoint.

/// Valid difficulty range for study prompts.
pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 5;

/// Input for a single explanation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyPrompt {
    pub subject: String,
    pub topic: String,
    pub question: String,
    pub difficulty: u8,
}

impl StudyPrompt {
    pub fn new(
        subject: impl Into<String>,
        topic: impl Into<String>,
        question: impl Into<String>,
        difficulty: u8,
    ) -> Self {
        Self {
            subject: subject.into(),
            topic: topic.into(),
            question: question.into(),
            difficulty: difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY),
        }
    }

    /// Renders the tutoring instruction for this request.
    pub fn explanation_prompt(&self) -> String {
        format!(
            "You are an expert educator in {}. Provide a detailed explanation for {} related to '{}'. \
            Adjust the explanation to difficulty level {} (1 = beginner, 5 = advanced). \
            Keep it concise, clear, and educational.",
            self.subject, self.topic, self.question, self.difficulty
        )
    }
}

/// Renders an instruction asking for one practice question.
///
/// The reply is expected to follow the `Question: … Answer: …` convention
/// that [`PracticeQuestion::parse`] understands.
pub fn practice_prompt(subject: &str, topic: &str, difficulty: u8) -> String {
    let difficulty = difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
    format!(
        "Generate a practice question for {} on the topic '{}'. \
        The question should match difficulty level {} (1 = easy, 5 = very hard). \
        Provide the question and its answer in this format: 'Question: <text> Answer: <text>'.",
        subject, topic, difficulty
    )
}

/// A generated practice question with its expected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeQuestion {
    pub question: String,
    pub answer: String,
}

impl PracticeQuestion {
    /// Splits a reply into question and answer parts.
    ///
    /// Returns `None` when the reply does not follow the expected format so
    /// callers can fall back to showing the raw reply.
    pub fn parse(reply: &str) -> Option<Self> {
        let (question_part, answer_part) = reply.split_once("Answer:")?;
        let question = question_part.replace("Question:", "").trim().to_string();
        let answer = answer_part.trim().to_string();

        if question.is_empty() || answer.is_empty() {
            return None;
        }

        Some(Self { question, answer })
    }
}
