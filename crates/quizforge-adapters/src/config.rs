//! Extraction configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizforge_core::assembler::AssemblerOptions;
use quizforge_core::classify::ClassifierConfig;
use quizforge_core::error::ExtractError;
use quizforge_core::finalize::IdScheme;
use quizforge_core::QuestionExtractor;

/// Identifier scheme names accepted in config files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdSchemeKind {
    #[default]
    Sequential,
    Timestamped,
}

impl fmt::Display for IdSchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdSchemeKind::Sequential => write!(f, "sequential"),
            IdSchemeKind::Timestamped => write!(f, "timestamped"),
        }
    }
}

impl FromStr for IdSchemeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" | "seq" => Ok(IdSchemeKind::Sequential),
            "timestamped" | "timestamp" | "time" => Ok(IdSchemeKind::Timestamped),
            other => Err(format!("unknown id scheme: {other}")),
        }
    }
}

/// Top-level quizforge configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizforgeConfig {
    /// Question keywords and passage cues.
    #[serde(flatten)]
    pub classifier: ClassifierConfig,
    /// How question ids are generated.
    #[serde(default)]
    pub id_scheme: IdSchemeKind,
    /// Id prefix; defaults to one per pipeline.
    #[serde(default)]
    pub id_prefix: Option<String>,
    /// Attach a passage to every question up to the next cue.
    #[serde(default)]
    pub share_passage: bool,
}

impl QuizforgeConfig {
    pub fn id_scheme(&self) -> IdScheme {
        let scheme = match self.id_scheme {
            IdSchemeKind::Sequential => IdScheme::Sequential { prefix: None },
            IdSchemeKind::Timestamped => IdScheme::Timestamped { prefix: None },
        };
        match &self.id_prefix {
            Some(prefix) => scheme.with_prefix(prefix.clone()),
            None => scheme,
        }
    }

    /// Build the extraction engine this configuration describes.
    pub fn extractor(&self) -> Result<QuestionExtractor, ExtractError> {
        Ok(QuestionExtractor::new(&self.classifier)?
            .with_assembler_options(AssemblerOptions {
                share_passage: self.share_passage,
            })
            .with_id_scheme(self.id_scheme()))
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_all(values: &[String]) -> Vec<String> {
    values.iter().map(|v| resolve_env_vars(v)).collect()
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
///
/// Environment variable override: `QUIZFORGE_ID_SCHEME`.
pub fn load_config() -> Result<QuizforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizforge.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizforgeConfig::default(),
    };

    if let Ok(scheme) = std::env::var("QUIZFORGE_ID_SCHEME") {
        config.id_scheme = scheme
            .parse()
            .map_err(|e: String| anyhow::anyhow!("QUIZFORGE_ID_SCHEME: {e}"))?;
    }

    Ok(config)
}

/// Parse a TOML string into a config, resolving `${VAR}` references.
pub fn parse_config_str(content: &str) -> Result<QuizforgeConfig> {
    let mut config: QuizforgeConfig = toml::from_str(content)?;
    config.classifier.question_keywords = resolve_all(&config.classifier.question_keywords);
    config.classifier.passage_cues = resolve_all(&config.classifier.passage_cues);
    config.id_prefix = config.id_prefix.as_deref().map(resolve_env_vars);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_core::model::{Pipeline, RawBlock};

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZFORGE_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZFORGE_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZFORGE_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        assert_eq!(resolve_env_vars("open ${ end"), "open ${ end");
        std::env::remove_var("_QUIZFORGE_TEST_VAR");
    }

    #[test]
    fn resolved_values_are_not_rescanned() {
        std::env::set_var("_QUIZFORGE_NESTED_VAR", "${_QUIZFORGE_NESTED_VAR}x");
        assert_eq!(
            resolve_env_vars("a${_QUIZFORGE_NESTED_VAR}b"),
            "a${_QUIZFORGE_NESTED_VAR}xb"
        );
        let config = parse_config_str("id_prefix = \"${_QUIZFORGE_NESTED_VAR}\"\n").unwrap();
        assert_eq!(config.id_prefix.as_deref(), Some("${_QUIZFORGE_NESTED_VAR}x"));
        std::env::remove_var("_QUIZFORGE_NESTED_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuizforgeConfig::default();
        assert_eq!(config.id_scheme, IdSchemeKind::Sequential);
        assert!(!config.share_passage);
        assert!(config
            .classifier
            .question_keywords
            .contains(&"Câu".to_string()));
        assert_eq!(config.id_scheme(), IdScheme::Sequential { prefix: None });
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
question_keywords = ["Frage", "Question"]
passage_cues = ['lies\b.*\bbeantworte']
id_scheme = "timestamped"
id_prefix = "exam"
share_passage = true
"#;
        let config = parse_config_str(toml_str).unwrap();
        assert_eq!(config.classifier.question_keywords, vec!["Frage", "Question"]);
        assert_eq!(config.id_scheme, IdSchemeKind::Timestamped);
        assert_eq!(
            config.id_scheme(),
            IdScheme::Timestamped {
                prefix: Some("exam".into())
            }
        );
        assert!(config.share_passage);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = parse_config_str("share_passage = true\n").unwrap();
        assert_eq!(config.classifier, ClassifierConfig::default());
        assert_eq!(config.id_scheme, IdSchemeKind::Sequential);
    }

    #[test]
    fn configured_extractor_uses_keywords_and_prefix() {
        let config = parse_config_str(
            r#"
question_keywords = ["Frage"]
id_prefix = "de"
"#,
        )
        .unwrap();
        let extractor = config.extractor().unwrap();
        let questions = extractor.parse(
            Pipeline::PlainText,
            &[RawBlock::plain("Frage 1: Was?"), RawBlock::plain("A. Ja")],
        );
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "de_1");
    }

    #[test]
    fn invalid_cue_surfaces_from_extractor() {
        let config = parse_config_str("passage_cues = ['(']\n").unwrap();
        assert!(config.extractor().is_err());
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/quizforge.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "id_prefix = \"x\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.id_prefix.as_deref(), Some("x"));
    }

    #[test]
    fn id_scheme_names() {
        assert_eq!(
            "Timestamp".parse::<IdSchemeKind>().unwrap(),
            IdSchemeKind::Timestamped
        );
        assert_eq!(IdSchemeKind::Sequential.to_string(), "sequential");
        assert!("random".parse::<IdSchemeKind>().is_err());
    }
}
