//! Emphasis-based answer extraction.
//!
//! Source authors underline the letter of the correct option ("<u>B</u>.")
//! or of each true statement ("<u>a</u>)"). Only the rich-text pipeline keeps
//! that formatting; the plain-text pipeline always answers `Unknown`.

use crate::model::{Pipeline, RawBlock, Verdict};

/// What the formatting of one option or statement line says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMark {
    /// The leading letter is emphasized.
    Marked,
    /// Formatting survived and the letter is not emphasized.
    Unmarked,
    /// Formatting did not survive extraction.
    Unknown,
}

impl AnswerMark {
    /// Statement verdict implied by this mark.
    pub fn verdict(self) -> Verdict {
        match self {
            AnswerMark::Marked => Verdict::Correct,
            AnswerMark::Unmarked => Verdict::Incorrect,
            AnswerMark::Unknown => Verdict::Undetermined,
        }
    }
}

impl Pipeline {
    /// Inspect the leading `letter` of an option or statement block.
    pub fn answer_mark(self, block: &RawBlock, letter: char) -> AnswerMark {
        if !self.detects_answers() {
            return AnswerMark::Unknown;
        }
        if is_letter_emphasized(block, letter) {
            AnswerMark::Marked
        } else {
            AnswerMark::Unmarked
        }
    }

    /// Answer mark of an `A`–`D` option line.
    pub fn mark_option(self, block: &RawBlock, letter: char) -> AnswerMark {
        self.answer_mark(block, letter)
    }

    /// Verdict of an `a`–`d` statement line.
    pub fn mark_statement(self, block: &RawBlock, letter: char) -> Verdict {
        self.answer_mark(block, letter).verdict()
    }
}

/// Whether `letter` appears among the block's emphasized tokens.
///
/// Surrounding punctuation and whitespace are ignored, case is not.
pub fn is_letter_emphasized(block: &RawBlock, letter: char) -> bool {
    block
        .emphasized_tokens
        .iter()
        .any(|token| token_letter(token) == Some(letter))
}

/// The single letter a token stands for, if it is one.
pub fn token_letter(token: &str) -> Option<char> {
    let core = token.trim_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation());
    let mut chars = core.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => Some(c),
        _ => None,
    }
}
