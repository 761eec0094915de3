//! Source document loading.
//!
//! Picks a pipeline from the file extension and produces the block sequence
//! the extraction engine consumes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quizforge_core::model::{Pipeline, RawBlock};

use crate::error::AdapterError;
use crate::markup::blocks_from_markup;
use crate::pages::{collect_blocks, TextFilePages};

/// A source document turned into blocks.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub source: String,
    pub pipeline: Pipeline,
    pub blocks: Vec<RawBlock>,
}

/// Choose the pipeline for `path` by extension.
pub fn detect_pipeline(path: &Path) -> Result<Pipeline, AdapterError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("html" | "htm") => Ok(Pipeline::RichText),
        Some("txt") => Ok(Pipeline::PlainText),
        _ => Err(AdapterError::UnsupportedFileType {
            path: PathBuf::from(path),
        }),
    }
}

/// Load `path` and convert it into blocks for its pipeline.
pub async fn load_document(path: &Path) -> Result<LoadedDocument> {
    let pipeline = detect_pipeline(path)?;

    let blocks = match pipeline {
        Pipeline::RichText => {
            let markup = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read document: {}", path.display()))?;
            blocks_from_markup(&markup)
        }
        Pipeline::PlainText => {
            let pages = TextFilePages::open(path).await?;
            collect_blocks(&pages).await?
        }
    };

    tracing::info!(
        path = %path.display(),
        %pipeline,
        blocks = blocks.len(),
        "loaded document"
    );

    Ok(LoadedDocument {
        source: path.display().to_string(),
        pipeline,
        blocks,
    })
}
