//! Core data model types for quizforge.
//!
//! `RawBlock` is what the adapters hand to the parser; `Question` is what the
//! parser hands back. Everything in between is private to the assembler.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One unit of extracted document text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBlock {
    /// Trimmed text content.
    pub text: String,
    /// Letters rendered with underline emphasis in the source markup.
    #[serde(default)]
    pub emphasized_tokens: BTreeSet<String>,
}

impl RawBlock {
    /// A block without formatting metadata.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into().trim().to_string(),
            emphasized_tokens: BTreeSet::new(),
        }
    }

    /// A block with the given emphasized tokens.
    pub fn with_emphasis<I, S>(text: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into().trim().to_string(),
            emphasized_tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

/// The two question shapes the portal can grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalseGroup,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "MULTIPLE_CHOICE"),
            QuestionType::TrueFalseGroup => write!(f, "TRUE_FALSE_GROUP"),
        }
    }
}

/// Which input shape a parse run consumes.
///
/// The tag doubles as the answer-key capability: only rich text keeps the
/// underline formatting that encodes correct answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pipeline {
    /// Word-processor export with per-run emphasis flags.
    RichText,
    /// Page-by-page text extraction, no formatting.
    PlainText,
}

impl Pipeline {
    /// Whether this pipeline can recover answer keys from formatting.
    pub fn detects_answers(self) -> bool {
        matches!(self, Pipeline::RichText)
    }

    /// Separator used when a stem spans several blocks.
    pub fn stem_separator(self) -> &'static str {
        match self {
            Pipeline::RichText => "\n",
            Pipeline::PlainText => " ",
        }
    }

    /// Default id prefix for questions produced by this pipeline.
    pub fn default_id_prefix(self) -> &'static str {
        match self {
            Pipeline::RichText => "qi",
            Pipeline::PlainText => "pdf",
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pipeline::RichText => write!(f, "rich_text"),
            Pipeline::PlainText => write!(f, "plain_text"),
        }
    }
}

impl FromStr for Pipeline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rich_text" | "rich" | "html" | "docx" => Ok(Pipeline::RichText),
            "plain_text" | "plain" | "text" | "pdf" => Ok(Pipeline::PlainText),
            other => Err(format!("unknown pipeline: {other}")),
        }
    }
}

/// Correct option of a multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnswerKey {
    /// An underlined option letter identified the answer.
    Detected { index: usize },
    /// No formatting identified the answer; a human has to pick one.
    Undetermined,
}

impl AnswerKey {
    pub fn is_determined(&self) -> bool {
        matches!(self, AnswerKey::Detected { .. })
    }
}

/// Judgement attached to one statement of a true/false group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
    Undetermined,
}

/// One lettered statement of a true/false group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub id: String,
    pub text: String,
    pub verdict: Verdict,
}

impl Statement {
    /// Legacy boolean view: only an explicit `Correct` counts as true.
    pub fn is_correct(&self) -> bool {
        self.verdict == Verdict::Correct
    }
}

/// Type-specific payload of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionBody {
    MultipleChoice {
        /// Always four entries, padded with empty strings.
        options: Vec<String>,
        answer: AnswerKey,
    },
    TrueFalseGroup { statements: Vec<Statement> },
}

/// A structured, gradable quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    /// Question stem, including the numbering marker.
    pub text: String,
    #[serde(flatten)]
    pub body: QuestionBody,
    /// Shared reading passage, present on the first question after a cue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passage_content: Option<String>,
}

impl Question {
    pub fn question_type(&self) -> QuestionType {
        match self.body {
            QuestionBody::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionBody::TrueFalseGroup { .. } => QuestionType::TrueFalseGroup,
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match &self.body {
            QuestionBody::MultipleChoice { options, .. } => Some(options),
            QuestionBody::TrueFalseGroup { .. } => None,
        }
    }

    pub fn statements(&self) -> Option<&[Statement]> {
        match &self.body {
            QuestionBody::TrueFalseGroup { statements } => Some(statements),
            QuestionBody::MultipleChoice { .. } => None,
        }
    }

    pub fn answer(&self) -> Option<AnswerKey> {
        match self.body {
            QuestionBody::MultipleChoice { answer, .. } => Some(answer),
            QuestionBody::TrueFalseGroup { .. } => None,
        }
    }

    /// Legacy integer view of the answer key (`0` when undetermined).
    ///
    /// Returns `None` for true/false groups.
    pub fn correct_option_index(&self) -> Option<usize> {
        self.answer().map(|key| match key {
            AnswerKey::Detected { index } => index,
            AnswerKey::Undetermined => 0,
        })
    }

    /// Whether a human still has to supply part of the answer key.
    pub fn needs_answer_review(&self) -> bool {
        match &self.body {
            QuestionBody::MultipleChoice { answer, .. } => !answer.is_determined(),
            QuestionBody::TrueFalseGroup { statements } => statements
                .iter()
                .any(|s| s.verdict == Verdict::Undetermined),
        }
    }
}

/// Label for the `index`-th option or statement: `A`, `B`, ... from
/// `first`, or `?` once the alphabet runs out.
pub fn index_letter(first: char, index: usize) -> char {
    u32::try_from(index)
        .ok()
        .filter(|&i| i < 26)
        .and_then(|i| char::from_u32(u32::from(first) + i))
        .unwrap_or('?')
}
