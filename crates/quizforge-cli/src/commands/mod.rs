pub mod classify;
pub mod extract;
pub mod init;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use quizforge_adapters::{load_config_from, load_document, LoadedDocument};
use quizforge_core::Extraction;

/// Load config and document, then run the extraction engine.
pub(crate) async fn extract_document(
    input: &Path,
    config_path: Option<&Path>,
) -> Result<(LoadedDocument, Extraction)> {
    let config = load_config_from(config_path)?;
    tracing::debug!(?config, "loaded config");
    let extractor = config.extractor()?;
    let document = load_document(input).await?;
    let extraction = extractor.extract(document.pipeline, &document.blocks);
    Ok((document, extraction))
}
