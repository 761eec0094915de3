//! The `quizforge classify` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_adapters::{load_config_from, load_document};

pub async fn execute(input: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let extractor = config.extractor()?;
    let document = load_document(&input).await?;
    let classifier = extractor.classifier();

    for (index, block) in document.blocks.iter().enumerate() {
        let role = classifier.classify(&block.text);
        let marks = if block.emphasized_tokens.is_empty() {
            String::new()
        } else {
            let tokens: Vec<&str> = block.emphasized_tokens.iter().map(String::as_str).collect();
            format!("  [underlined: {}]", tokens.join(", "))
        };
        println!("{index:>4}  {:<9} {}{marks}", role.label(), block.text);
    }

    Ok(())
}
