//! The `quizforge validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::parser::validate_questions;

pub async fn execute(input: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let (document, extraction) = super::extract_document(&input, config_path.as_deref()).await?;

    println!(
        "Document: {} ({} questions, {} pipeline)",
        document.source,
        extraction.questions.len(),
        document.pipeline
    );

    let warnings = validate_questions(&extraction.questions);
    for w in &warnings {
        println!("  [{}] WARNING: {}", w.question_id, w.message);
    }
    for d in &extraction.diagnostics {
        println!("  block {} ({}): {}", d.block_index, d.kind, d.text);
    }

    let total = warnings.len() + extraction.diagnostics.len();
    if extraction.questions.is_empty() {
        println!("No questions found.");
    } else if total == 0 {
        println!("All questions valid.");
    } else {
        println!("\n{total} warning(s) found.");
    }

    Ok(())
}
