//! Paged plain-text adapter.
//!
//! Fixed-layout documents are extracted page by page. Pages are awaited
//! strictly in order and concatenated before the text is split into lines.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use quizforge_core::model::RawBlock;

use crate::error::AdapterError;

/// Page separator used by text extraction tools (`pdftotext` emits form feeds).
pub const PAGE_BREAK: char = '\u{0C}';

/// A document whose text is available one page at a time.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Human-readable source name (usually a path).
    fn name(&self) -> &str;

    /// Number of pages in the document.
    async fn page_count(&self) -> Result<usize, AdapterError>;

    /// Text of page `page`, 1-based.
    async fn page_text(&self, page: usize) -> Result<String, AdapterError>;
}

/// Trimmed, non-empty lines of `text`, one block each.
pub fn blocks_from_page_text(text: &str) -> Vec<RawBlock> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(RawBlock::plain)
        .collect()
}

/// Read every page of `source` in order and split the text into blocks.
pub async fn collect_blocks(source: &dyn PageSource) -> Result<Vec<RawBlock>, AdapterError> {
    let count = source.page_count().await?;
    let mut text = String::new();

    for page in 1..=count {
        let page_text = source.page_text(page).await?;
        tracing::trace!(source = source.name(), page, bytes = page_text.len(), "read page");
        text.push_str(&page_text);
        text.push('\n');
    }

    let blocks = blocks_from_page_text(&text);
    tracing::debug!(
        source = source.name(),
        pages = count,
        blocks = blocks.len(),
        "collected page text"
    );
    Ok(blocks)
}

/// A text file with pages separated by form feeds.
#[derive(Debug, Clone)]
pub struct TextFilePages {
    name: String,
    pages: Vec<String>,
}

impl TextFilePages {
    /// Read `path` and split it into pages.
    pub async fn open(path: &Path) -> Result<Self, AdapterError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| AdapterError::Io {
                path: PathBuf::from(path),
                source,
            })?;
        Ok(Self::from_text(path.display().to_string(), &content))
    }

    pub fn from_text(name: impl Into<String>, content: &str) -> Self {
        Self {
            name: name.into(),
            pages: content.split(PAGE_BREAK).map(String::from).collect(),
        }
    }
}

#[async_trait]
impl PageSource for TextFilePages {
    fn name(&self) -> &str {
        &self.name
    }

    async fn page_count(&self) -> Result<usize, AdapterError> {
        Ok(self.pages.len())
    }

    async fn page_text(&self, page: usize) -> Result<String, AdapterError> {
        page.checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .cloned()
            .ok_or(AdapterError::PageOutOfRange {
                page,
                count: self.pages.len(),
            })
    }
}
