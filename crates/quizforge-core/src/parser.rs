//! Document-to-question extraction.
//!
//! Folds a block sequence through the classifier and the assembler, then
//! assigns identifiers. Also validates the resulting questions.

use std::collections::HashSet;

use crate::assembler::{Assembler, AssemblerOptions, Diagnostic, OPTION_COUNT};
use crate::classify::{Classifier, ClassifierConfig};
use crate::error::ExtractError;
use crate::finalize::{assign_ids, IdScheme};
use crate::model::{Pipeline, Question, QuestionBody, RawBlock, Verdict};

/// Questions plus the diagnostics collected while assembling them.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub questions: Vec<Question>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Configured extraction engine. Holds no per-document state.
#[derive(Debug, Clone, Default)]
pub struct QuestionExtractor {
    classifier: Classifier,
    assembler: AssemblerOptions,
    ids: IdScheme,
}

impl QuestionExtractor {
    pub fn new(config: &ClassifierConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            classifier: Classifier::new(config)?,
            ..Self::default()
        })
    }

    pub fn with_assembler_options(mut self, options: AssemblerOptions) -> Self {
        self.assembler = options;
        self
    }

    pub fn with_id_scheme(mut self, ids: IdScheme) -> Self {
        self.ids = ids;
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Parse `blocks` into questions, keeping diagnostics.
    pub fn extract(&self, pipeline: Pipeline, blocks: &[RawBlock]) -> Extraction {
        let assembled = blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| !block.text.trim().is_empty())
            .fold(
                Assembler::new(pipeline, self.assembler),
                |mut assembler, (i, block)| {
                    assembler.feed(i, block, self.classifier.classify(&block.text));
                    assembler
                },
            )
            .finish();

        let questions = assign_ids(
            assembled.questions,
            &self.ids,
            pipeline.default_id_prefix(),
        );

        tracing::info!(
            %pipeline,
            blocks = blocks.len(),
            questions = questions.len(),
            diagnostics = assembled.diagnostics.len(),
            "extraction complete"
        );

        Extraction {
            questions,
            diagnostics: assembled.diagnostics,
        }
    }

    /// Parse `blocks` into questions.
    pub fn parse(&self, pipeline: Pipeline, blocks: &[RawBlock]) -> Vec<Question> {
        self.extract(pipeline, blocks).questions
    }
}

/// Parse with the default classifier and sequential identifiers.
pub fn parse(pipeline: Pipeline, blocks: &[RawBlock]) -> Vec<Question> {
    QuestionExtractor::default().parse(pipeline, blocks)
}

/// A warning from question validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The question ID.
    pub question_id: String,
    /// Warning message.
    pub message: String,
}

/// Check extracted questions for things an editor should look at.
pub fn validate_questions(questions: &[Question]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut warn = |id: &str, message: String| {
        warnings.push(ValidationWarning {
            question_id: id.to_string(),
            message,
        })
    };

    let mut seen_ids = HashSet::new();
    for q in questions {
        if !seen_ids.insert(q.id.as_str()) {
            warn(&q.id, format!("duplicate question ID: {}", q.id));
        }
    }

    for q in questions {
        if strip_marker(&q.text).is_empty() {
            warn(&q.id, "question stem is empty".into());
        }

        match &q.body {
            QuestionBody::MultipleChoice { options, answer } => {
                let filled = options.iter().filter(|o| !o.trim().is_empty()).count();
                if filled < OPTION_COUNT {
                    warn(
                        &q.id,
                        format!("only {filled} of {OPTION_COUNT} options recognised"),
                    );
                }

                let mut seen = HashSet::new();
                if options
                    .iter()
                    .filter(|o| !o.trim().is_empty())
                    .any(|o| !seen.insert(o.trim()))
                {
                    warn(&q.id, "duplicate option text".into());
                }

                if !answer.is_determined() {
                    warn(&q.id, "answer key undetermined; defaulting to option A".into());
                }
            }
            QuestionBody::TrueFalseGroup { statements } => {
                if statements.len() != OPTION_COUNT {
                    warn(
                        &q.id,
                        format!(
                            "true/false group has {} statements, expected {OPTION_COUNT}",
                            statements.len()
                        ),
                    );
                }
                if statements.iter().any(|s| s.verdict == Verdict::Undetermined) {
                    warn(&q.id, "statement verdicts undetermined".into());
                }
            }
        }
    }

    warnings
}

/// Stem without its "Question N:" marker.
fn strip_marker(text: &str) -> &str {
    let text = text.trim();
    match text.find([':', '.']) {
        Some(pos) if text[..pos].chars().any(|c| c.is_ascii_digit()) => text[pos + 1..].trim(),
        _ => text,
    }
}
