//! Block classifier.
//!
//! Labels a block of text with its structural role. Classification is pure:
//! it looks at one string and never at parser state.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

static UPPER_OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([A-D])[.:]\s*(.*)$").expect("static regex"));

static LOWER_STATEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([a-d])[).]\s*(.*)$").expect("static regex"));

/// Patterns that drive classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Words that introduce a numbered question ("Question 1:", "Câu 2.").
    #[serde(default = "default_question_keywords")]
    pub question_keywords: Vec<String>,
    /// Regular expressions matched case-insensitively anywhere in a block.
    #[serde(default = "default_passage_cues")]
    pub passage_cues: Vec<String>,
}

pub fn default_question_keywords() -> Vec<String> {
    ["Question", "Item", "Câu", "Bài"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn default_passage_cues() -> Vec<String> {
    vec![
        r"read\b.*\banswers?\b.*\bquestions?".to_string(),
        r"đọc thông tin.*trả lời.*câu hỏi".to_string(),
    ]
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            question_keywords: default_question_keywords(),
            passage_cues: default_passage_cues(),
        }
    }
}

/// Structural role of one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role<'a> {
    /// "Read the following passage and answer the questions ..."
    PassageTrigger,
    /// "Question 3:" / "Câu 3." at the start of the block.
    QuestionStart,
    /// "A." / "B:": a multiple-choice option.
    UpperOption { letter: char, text: &'a str },
    /// "a)" / "b.": a true/false statement.
    LowerStatement { letter: char, text: &'a str },
    Continuation,
}

impl Role<'_> {
    /// Short, stable label used in logs and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Role::PassageTrigger => "passage",
            Role::QuestionStart => "question",
            Role::UpperOption { .. } => "option",
            Role::LowerStatement { .. } => "statement",
            Role::Continuation => "text",
        }
    }
}

impl fmt::Display for Role<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::UpperOption { letter, .. } | Role::LowerStatement { letter, .. } => {
                write!(f, "{} {}", self.label(), letter)
            }
            _ => f.write_str(self.label()),
        }
    }
}

/// Compiled classification rules.
#[derive(Debug, Clone)]
pub struct Classifier {
    passage_cues: Vec<Regex>,
    question_start: Regex,
}

impl Classifier {
    /// Compile a classifier from configuration.
    pub fn new(config: &ClassifierConfig) -> Result<Self, ExtractError> {
        let keywords: Vec<String> = config
            .question_keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(regex::escape)
            .collect();
        if keywords.is_empty() {
            return Err(ExtractError::EmptyKeywordList);
        }

        let question_pattern = format!(r"(?i)^(?:{})\s+\d+[:.]", keywords.join("|"));
        let question_start =
            Regex::new(&question_pattern).map_err(|source| ExtractError::InvalidPattern {
                pattern: question_pattern.clone(),
                source,
            })?;

        let passage_cues = config
            .passage_cues
            .iter()
            .map(|cue| {
                Regex::new(&format!("(?i){cue}")).map_err(|source| ExtractError::InvalidPattern {
                    pattern: cue.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            passage_cues,
            question_start,
        })
    }

    /// Label `text` with its role. First matching rule wins.
    pub fn classify<'a>(&self, text: &'a str) -> Role<'a> {
        let text = text.trim();

        if self.passage_cues.iter().any(|cue| cue.is_match(text)) {
            return Role::PassageTrigger;
        }

        if self.question_start.is_match(text) {
            return Role::QuestionStart;
        }

        if let Some((letter, body)) = split_marker(&UPPER_OPTION, text) {
            return Role::UpperOption { letter, text: body };
        }

        if let Some((letter, body)) = split_marker(&LOWER_STATEMENT, text) {
            return Role::LowerStatement { letter, text: body };
        }

        Role::Continuation
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default()).expect("default classifier patterns compile")
    }
}

fn split_marker<'a>(pattern: &Regex, text: &'a str) -> Option<(char, &'a str)> {
    let caps = pattern.captures(text)?;
    let letter = caps.get(1)?.as_str().chars().next()?;
    let body = caps.get(2).map_or("", |m| m.as_str().trim_end());
    Some((letter, body))
}
