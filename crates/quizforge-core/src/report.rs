//! Extraction report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assembler::{Diagnostic, DiagnosticKind};
use crate::model::{index_letter, AnswerKey, Pipeline, Question, QuestionBody, Verdict};
use crate::parser::Extraction;

/// A complete extraction report for one source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Where the blocks came from (usually a file path).
    pub source: String,
    /// Pipeline the document went through.
    pub pipeline: Pipeline,
    /// Extracted questions in source order.
    pub questions: Vec<Question>,
    /// Blocks the assembler could not place.
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
    /// Counts derived from `questions`.
    pub summary: ExtractionSummary,
}

/// Counts over an extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub total: usize,
    pub multiple_choice: usize,
    pub true_false_groups: usize,
    pub with_passage: usize,
    /// Multiple-choice questions whose answer key was detected.
    pub answers_detected: usize,
    /// Questions that still need a human to set (part of) the answer key.
    pub answers_undetermined: usize,
    pub dropped_blocks: usize,
}

impl ExtractionSummary {
    pub fn compute(questions: &[Question], diagnostics: &[Diagnostic]) -> Self {
        let mut summary = Self {
            total: questions.len(),
            ..Self::default()
        };

        for q in questions {
            if q.passage_content.is_some() {
                summary.with_passage += 1;
            }
            match &q.body {
                QuestionBody::MultipleChoice { answer, .. } => {
                    summary.multiple_choice += 1;
                    match answer {
                        AnswerKey::Detected { .. } => summary.answers_detected += 1,
                        AnswerKey::Undetermined => summary.answers_undetermined += 1,
                    }
                }
                QuestionBody::TrueFalseGroup { statements } => {
                    summary.true_false_groups += 1;
                    if statements.iter().any(|s| s.verdict == Verdict::Undetermined) {
                        summary.answers_undetermined += 1;
                    }
                }
            }
        }

        summary.dropped_blocks = diagnostics
            .iter()
            .filter(|d| {
                matches!(
                    d.kind,
                    DiagnosticKind::DroppedContinuation
                        | DiagnosticKind::OrphanOption
                        | DiagnosticKind::OrphanStatement
                )
            })
            .count();

        summary
    }
}

impl ExtractionReport {
    /// Build a report from an extraction run.
    pub fn new(source: impl Into<String>, pipeline: Pipeline, extraction: Extraction) -> Self {
        let summary = ExtractionSummary::compute(&extraction.questions, &extraction.diagnostics);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            source: source.into(),
            pipeline,
            questions: extraction.questions,
            diagnostics: extraction.diagnostics,
            summary,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ExtractionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown for review.
    pub fn to_markdown(&self) -> String {
        let s = &self.summary;
        let mut md = String::new();

        md.push_str(&format!("# Extracted questions: {}\n\n", self.source));
        md.push_str(&format!(
            "**Summary:** {} questions ({} multiple choice, {} true/false), {} with passage, {} need answer review\n\n",
            s.total, s.multiple_choice, s.true_false_groups, s.with_passage, s.answers_undetermined
        ));

        for q in &self.questions {
            md.push_str(&format!("## {}\n\n", q.id));
            if let Some(passage) = &q.passage_content {
                for line in passage.lines() {
                    md.push_str(&format!("> {line}\n"));
                }
                md.push('\n');
            }
            md.push_str(&format!("{}\n\n", q.text));

            match &q.body {
                QuestionBody::MultipleChoice { options, answer } => {
                    for (i, option) in options.iter().enumerate() {
                        let letter = index_letter('A', i);
                        let tick = match answer {
                            AnswerKey::Detected { index } if *index == i => "x",
                            _ => " ",
                        };
                        md.push_str(&format!("- [{tick}] {letter}. {option}\n"));
                    }
                    if !answer.is_determined() {
                        md.push_str("\n_Answer key undetermined._\n");
                    }
                }
                QuestionBody::TrueFalseGroup { statements } => {
                    md.push_str("| | Statement | Verdict |\n");
                    md.push_str("|---|-----------|---------|\n");
                    for (i, statement) in statements.iter().enumerate() {
                        let letter = index_letter('a', i);
                        let verdict = match statement.verdict {
                            Verdict::Correct => "true",
                            Verdict::Incorrect => "false",
                            Verdict::Undetermined => "?",
                        };
                        md.push_str(&format!("| {letter} | {} | {verdict} |\n", statement.text));
                    }
                }
            }
            md.push('\n');
        }

        if !self.diagnostics.is_empty() {
            md.push_str("### Diagnostics\n\n");
            for d in &self.diagnostics {
                md.push_str(&format!("- block {} ({}): {}\n", d.block_index, d.kind, d.text));
            }
        }

        md
    }
}
