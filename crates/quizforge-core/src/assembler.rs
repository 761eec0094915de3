//! Question assembler.
//!
//! A finite-state accumulator fed one classified block at a time. It owns all
//! parser state for a single document and is consumed by [`Assembler::finish`];
//! a fresh assembler is built for every parse run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::Role;
use crate::emphasis::AnswerMark;
use crate::model::{index_letter, AnswerKey, Pipeline, QuestionType, RawBlock, Verdict};

/// Number of options a multiple-choice question always carries.
pub const OPTION_COUNT: usize = 4;

/// Behaviour switches for the assembler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblerOptions {
    /// Attach a passage to every question up to the next cue instead of only
    /// the first one.
    #[serde(default)]
    pub share_passage: bool,
}

/// Coarse assembler state, mostly useful for tracing and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblerState {
    Idle,
    CollectingPassage,
    OpenQuestion(QuestionType),
}

/// A block the assembler could not place, or had to trim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Position of the offending block in the input sequence.
    pub block_index: usize,
    pub kind: DiagnosticKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Plain text after options/statements, or outside any question.
    DroppedContinuation,
    /// Option line with no open question.
    OrphanOption,
    /// Statement line with no open question.
    OrphanStatement,
    /// Passage that never reached a question.
    UnattachedPassage,
    /// Fifth or later option of a multiple-choice question.
    SurplusOption,
    /// Options buffered on a question that turned into a true/false group.
    IgnoredOptions,
    /// More than one option letter was underlined; the last one wins.
    MultipleMarkedOptions,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::DroppedContinuation => "dropped_continuation",
            DiagnosticKind::OrphanOption => "orphan_option",
            DiagnosticKind::OrphanStatement => "orphan_statement",
            DiagnosticKind::UnattachedPassage => "unattached_passage",
            DiagnosticKind::SurplusOption => "surplus_option",
            DiagnosticKind::IgnoredOptions => "ignored_options",
            DiagnosticKind::MultipleMarkedOptions => "multiple_marked_options",
        };
        f.write_str(name)
    }
}

/// A finished question before identifiers are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftQuestion {
    pub text: String,
    pub body: DraftBody,
    pub passage_content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftBody {
    MultipleChoice {
        options: Vec<String>,
        answer: AnswerKey,
    },
    TrueFalseGroup {
        statements: Vec<(String, Verdict)>,
    },
}

/// Output of one assembler run.
#[derive(Debug, Default)]
pub struct Assembled {
    pub questions: Vec<DraftQuestion>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug)]
struct BufferedOption {
    block_index: usize,
    text: String,
    mark: AnswerMark,
}

#[derive(Debug)]
struct OpenQuestion {
    block_index: usize,
    text: String,
    kind: QuestionType,
    options: Vec<BufferedOption>,
    statements: Vec<(String, Verdict)>,
}

impl OpenQuestion {
    fn buffers_empty(&self) -> bool {
        self.options.is_empty() && self.statements.is_empty()
    }
}

#[derive(Debug)]
struct Passage {
    block_index: usize,
    text: String,
    attached: bool,
}

/// Explicit parser state for one document.
#[derive(Debug)]
pub struct Assembler {
    pipeline: Pipeline,
    options: AssemblerOptions,
    open: Option<OpenQuestion>,
    passage: Option<Passage>,
    collecting_passage: bool,
    out: Assembled,
}

impl Assembler {
    pub fn new(pipeline: Pipeline, options: AssemblerOptions) -> Self {
        Self {
            pipeline,
            options,
            open: None,
            passage: None,
            collecting_passage: false,
            out: Assembled::default(),
        }
    }

    pub fn state(&self) -> AssemblerState {
        match (&self.open, self.collecting_passage) {
            (Some(q), _) => AssemblerState::OpenQuestion(q.kind),
            (None, true) => AssemblerState::CollectingPassage,
            (None, false) => AssemblerState::Idle,
        }
    }

    /// Consume one block that has already been classified as `role`.
    pub fn feed(&mut self, block_index: usize, block: &RawBlock, role: Role<'_>) {
        tracing::trace!(block_index, role = %role, state = ?self.state(), "feed");

        match role {
            Role::PassageTrigger => self.start_passage(block_index, &block.text),
            Role::QuestionStart => {
                self.finalize();
                self.collecting_passage = false;
                self.open = Some(OpenQuestion {
                    block_index,
                    text: block.text.clone(),
                    kind: QuestionType::MultipleChoice,
                    options: Vec::new(),
                    statements: Vec::new(),
                });
            }
            _ if self.collecting_passage => self.append_passage(&block.text),
            Role::UpperOption { letter, text } => {
                let mark = self.pipeline.mark_option(block, letter);
                if let Some(q) = self.open.as_mut() {
                    q.options.push(BufferedOption {
                        block_index,
                        text: text.to_string(),
                        mark,
                    });
                } else {
                    self.diagnose(block_index, DiagnosticKind::OrphanOption, &block.text);
                }
            }
            Role::LowerStatement { letter, text } => {
                let verdict = self.pipeline.mark_statement(block, letter);
                if let Some(q) = self.open.as_mut() {
                    q.kind = QuestionType::TrueFalseGroup;
                    q.statements.push((text.to_string(), verdict));
                } else {
                    self.diagnose(block_index, DiagnosticKind::OrphanStatement, &block.text);
                }
            }
            Role::Continuation => {
                let separator = self.pipeline.stem_separator();
                match self.open.as_mut().filter(|q| q.buffers_empty()) {
                    Some(q) => {
                        q.text.push_str(separator);
                        q.text.push_str(&block.text);
                    }
                    None => self.diagnose(
                        block_index,
                        DiagnosticKind::DroppedContinuation,
                        &block.text,
                    ),
                }
            }
        }
    }

    /// Flush the open question and hand back everything assembled.
    pub fn finish(mut self) -> Assembled {
        self.finalize();
        self.release_passage();
        self.out
    }

    fn start_passage(&mut self, block_index: usize, text: &str) {
        self.finalize();
        self.release_passage();
        self.collecting_passage = true;
        self.passage = Some(Passage {
            block_index,
            text: text.to_string(),
            attached: false,
        });
    }

    fn append_passage(&mut self, text: &str) {
        if let Some(passage) = self.passage.as_mut() {
            passage.text.push('\n');
            passage.text.push_str(text);
        }
    }

    /// Drop the current passage, reporting it if no question ever took it.
    fn release_passage(&mut self) {
        if let Some(passage) = self.passage.take() {
            if !passage.attached {
                self.diagnose(
                    passage.block_index,
                    DiagnosticKind::UnattachedPassage,
                    &passage.text,
                );
            }
        }
    }

    fn finalize(&mut self) {
        let Some(q) = self.open.take() else {
            return;
        };

        let body = match q.kind {
            QuestionType::MultipleChoice => self.materialize_options(q.block_index, q.options),
            QuestionType::TrueFalseGroup => {
                if !q.options.is_empty() {
                    let ignored: Vec<&str> = q.options.iter().map(|o| o.text.as_str()).collect();
                    self.diagnose(
                        q.block_index,
                        DiagnosticKind::IgnoredOptions,
                        &ignored.join(" | "),
                    );
                }
                DraftBody::TrueFalseGroup {
                    statements: settle_verdicts(q.statements),
                }
            }
        };

        let passage_content = self.take_passage_for_question();

        tracing::trace!(
            block_index = q.block_index,
            kind = %q.kind,
            has_passage = passage_content.is_some(),
            "finalized question"
        );

        self.out.questions.push(DraftQuestion {
            text: q.text,
            body,
            passage_content,
        });
    }

    fn take_passage_for_question(&mut self) -> Option<String> {
        if self.options.share_passage {
            let passage = self.passage.as_mut()?;
            passage.attached = true;
            return Some(passage.text.clone()).filter(|t| !t.is_empty());
        }
        self.passage
            .take()
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
    }

    fn materialize_options(
        &mut self,
        question_index: usize,
        buffered: Vec<BufferedOption>,
    ) -> DraftBody {
        let mut options = Vec::with_capacity(OPTION_COUNT);
        let mut marked = Vec::new();

        for (position, option) in buffered.into_iter().enumerate() {
            if position >= OPTION_COUNT {
                self.diagnose(option.block_index, DiagnosticKind::SurplusOption, &option.text);
                continue;
            }
            if option.mark == AnswerMark::Marked {
                marked.push(position);
            }
            options.push(option.text);
        }
        options.resize(OPTION_COUNT, String::new());

        if marked.len() > 1 {
            let letters: Vec<String> = marked
                .iter()
                .map(|&i| index_letter('A', i).to_string())
                .collect();
            self.diagnose(
                question_index,
                DiagnosticKind::MultipleMarkedOptions,
                &letters.join(", "),
            );
        }

        let answer = match marked.last() {
            Some(&index) => AnswerKey::Detected { index },
            None => AnswerKey::Undetermined,
        };

        DraftBody::MultipleChoice { options, answer }
    }

    fn diagnose(&mut self, block_index: usize, kind: DiagnosticKind, text: &str) {
        tracing::debug!(block_index, ?kind, text, "extraction diagnostic");
        self.out.diagnostics.push(Diagnostic {
            block_index,
            kind,
            text: text.to_string(),
        });
    }
}

/// A group with no underlined statement carries no answer key at all.
fn settle_verdicts(mut statements: Vec<(String, Verdict)>) -> Vec<(String, Verdict)> {
    if !statements.iter().any(|(_, v)| *v == Verdict::Correct) {
        for (_, verdict) in &mut statements {
            *verdict = Verdict::Undetermined;
        }
    }
    statements
}
