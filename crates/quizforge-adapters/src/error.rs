//! Adapter error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a source document into blocks.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The file extension maps to no pipeline.
    #[error("unsupported file type: {} (expected .html, .htm or .txt)", path.display())]
    UnsupportedFileType { path: PathBuf },

    /// A page number outside `1..=count` was requested.
    #[error("page {page} out of range (document has {count} pages)")]
    PageOutOfRange { page: usize, count: usize },

    /// The source could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
