//! The `quizforge extract` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizforge_core::model::{index_letter, AnswerKey, Question, QuestionBody, Verdict};
use quizforge_core::report::ExtractionReport;

pub async fn execute(
    input: PathBuf,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (document, extraction) = super::extract_document(&input, config_path.as_deref()).await?;

    if extraction.questions.is_empty() {
        eprintln!("No questions found in {}", document.source);
    }
    if !extraction.diagnostics.is_empty() {
        eprintln!(
            "{} block(s) could not be placed; run `quizforge validate` for details",
            extraction.diagnostics.len()
        );
    }

    let report = ExtractionReport::new(document.source, document.pipeline, extraction);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report.questions)?);
        }
        "table" => {
            println!("{}", question_table(&report.questions));
        }
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        other => anyhow::bail!("unknown format: '{other}' (expected json, table or markdown)"),
    }

    if let Some(path) = output {
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn question_table(questions: &[Question]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Type", "Question", "Answer", "Passage"]);

    for q in questions {
        table.add_row(vec![
            Cell::new(&q.id),
            Cell::new(q.question_type()),
            Cell::new(first_line(&q.text)),
            Cell::new(answer_summary(&q.body)),
            Cell::new(if q.passage_content.is_some() { "yes" } else { "" }),
        ]);
    }

    table
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

fn answer_summary(body: &QuestionBody) -> String {
    match body {
        QuestionBody::MultipleChoice { answer, .. } => match answer {
            AnswerKey::Detected { index } => index_letter('A', *index).to_string(),
            AnswerKey::Undetermined => "?".to_string(),
        },
        QuestionBody::TrueFalseGroup { statements } => statements
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let mark = match s.verdict {
                    Verdict::Correct => "T",
                    Verdict::Incorrect => "F",
                    Verdict::Undetermined => "?",
                };
                format!("{}:{mark}", index_letter('a', i))
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_core::model::Statement;

    #[test]
    fn multiple_choice_answer_letters() {
        let detected = QuestionBody::MultipleChoice {
            options: vec![],
            answer: AnswerKey::Detected { index: 2 },
        };
        assert_eq!(answer_summary(&detected), "C");

        let unknown = QuestionBody::MultipleChoice {
            options: vec![],
            answer: AnswerKey::Undetermined,
        };
        assert_eq!(answer_summary(&unknown), "?");
    }

    #[test]
    fn true_false_verdicts() {
        let statement = |verdict| Statement {
            id: "s".into(),
            text: "t".into(),
            verdict,
        };
        let body = QuestionBody::TrueFalseGroup {
            statements: vec![
                statement(Verdict::Correct),
                statement(Verdict::Incorrect),
                statement(Verdict::Undetermined),
            ],
        };
        assert_eq!(answer_summary(&body), "a:T b:F c:?");
    }
}
