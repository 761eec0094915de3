//! quizforge-adapters: Source documents and configuration.
//!
//! Turns word-processor markup and paged plain text into the block
//! sequences `quizforge-core` consumes, and loads extraction settings
//! from `quizforge.toml`.

pub mod config;
pub mod document;
pub mod error;
pub mod markup;
pub mod memory;
pub mod pages;

pub use config::{load_config, load_config_from, QuizforgeConfig};
pub use document::{detect_pipeline, load_document, LoadedDocument};
pub use error::AdapterError;
pub use pages::PageSource;
