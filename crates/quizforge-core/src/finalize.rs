//! Finalization: identifier assignment for assembled questions.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::assembler::{DraftBody, DraftQuestion};
use crate::model::{Question, QuestionBody, Statement};

/// How question and statement identifiers are generated.
///
/// Identifiers are only guaranteed unique within one parse run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "lowercase")]
pub enum IdScheme {
    /// `{prefix}_{n}`, deterministic across runs.
    Sequential {
        #[serde(default)]
        prefix: Option<String>,
    },
    /// `{prefix}_{millis}_{n}` with one timestamp per run.
    Timestamped {
        #[serde(default)]
        prefix: Option<String>,
    },
}

impl Default for IdScheme {
    fn default() -> Self {
        IdScheme::Sequential { prefix: None }
    }
}

impl IdScheme {
    fn prefix(&self) -> Option<&str> {
        match self {
            IdScheme::Sequential { prefix } | IdScheme::Timestamped { prefix } => {
                prefix.as_deref()
            }
        }
    }

    /// Same scheme with an explicit prefix.
    pub fn with_prefix(self, prefix: impl Into<String>) -> Self {
        let prefix = Some(prefix.into());
        match self {
            IdScheme::Sequential { .. } => IdScheme::Sequential { prefix },
            IdScheme::Timestamped { .. } => IdScheme::Timestamped { prefix },
        }
    }
}

/// Assign identifiers to drafts in encounter order.
///
/// `default_prefix` is used when the scheme does not carry one.
pub fn assign_ids(drafts: Vec<DraftQuestion>, scheme: &IdScheme, default_prefix: &str) -> Vec<Question> {
    let prefix = scheme.prefix().unwrap_or(default_prefix);
    let stem = match scheme {
        IdScheme::Sequential { .. } => prefix.to_string(),
        IdScheme::Timestamped { .. } => format!("{prefix}_{}", Utc::now().timestamp_millis()),
    };

    drafts
        .into_iter()
        .enumerate()
        .map(|(i, draft)| {
            let id = format!("{stem}_{}", i + 1);
            let body = match draft.body {
                DraftBody::MultipleChoice { options, answer } => {
                    QuestionBody::MultipleChoice { options, answer }
                }
                DraftBody::TrueFalseGroup { statements } => QuestionBody::TrueFalseGroup {
                    statements: statements
                        .into_iter()
                        .enumerate()
                        .map(|(j, (text, verdict))| Statement {
                            id: format!("{id}_s{}", j + 1),
                            text,
                            verdict,
                        })
                        .collect(),
                },
            };
            Question {
                id,
                text: draft.text,
                body,
                passage_content: draft.passage_content,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::model::{AnswerKey, Verdict};

    fn drafts() -> Vec<DraftQuestion> {
        vec![
            DraftQuestion {
                text: "Question 1: x".into(),
                body: DraftBody::MultipleChoice {
                    options: vec!["a".into(), "b".into(), String::new(), String::new()],
                    answer: AnswerKey::Undetermined,
                },
                passage_content: None,
            },
            DraftQuestion {
                text: "Question 2: y".into(),
                body: DraftBody::TrueFalseGroup {
                    statements: vec![
                        ("s1".into(), Verdict::Correct),
                        ("s2".into(), Verdict::Incorrect),
                    ],
                },
                passage_content: Some("passage".into()),
            },
        ]
    }

    #[test]
    fn sequential_ids_are_deterministic() {
        let questions = assign_ids(drafts(), &IdScheme::default(), "qi");
        assert_eq!(questions[0].id, "qi_1");
        assert_eq!(questions[1].id, "qi_2");
        let statements = questions[1].statements().unwrap();
        assert_eq!(statements[0].id, "qi_2_s1");
        assert_eq!(statements[1].id, "qi_2_s2");
        assert_eq!(questions, assign_ids(drafts(), &IdScheme::default(), "qi"));
    }

    #[test]
    fn explicit_prefix_overrides_default() {
        let scheme = IdScheme::default().with_prefix("exam7");
        let questions = assign_ids(drafts(), &scheme, "qi");
        assert_eq!(questions[0].id, "exam7_1");
    }

    #[test]
    fn timestamped_ids_are_unique() {
        let scheme = IdScheme::Timestamped { prefix: None };
        let questions = assign_ids(drafts(), &scheme, "pdf");
        let mut ids: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        for s in questions[1].statements().unwrap() {
            assert!(ids.insert(&s.id));
        }
        assert_eq!(ids.len(), 4);
        assert!(questions[0].id.starts_with("pdf_"));
        assert!(questions[0].id.ends_with("_1"));
    }

    #[test]
    fn scheme_from_toml_like_serde() {
        let scheme: IdScheme = serde_json::from_str(r#"{"scheme":"timestamped"}"#).unwrap();
        assert_eq!(scheme, IdScheme::Timestamped { prefix: None });
    }
}
