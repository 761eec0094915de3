//! quizforge-core: Exam document to quiz question extraction.
//!
//! This crate holds the parsing engine: the block classifier, the question
//! assembler state machine, emphasis-based answer extraction and the
//! finalization pass. It has no file-format awareness; adapters turn source
//! documents into [`model::RawBlock`] sequences.

pub mod assembler;
pub mod classify;
pub mod emphasis;
pub mod error;
pub mod finalize;
pub mod model;
pub mod parser;
pub mod report;

pub use parser::{parse, Extraction, QuestionExtractor};
