//! Versioned artifact manifest (`artifact.toml`).

use crate::defaults::{ARTIFACT_FORMAT, ARTIFACT_VERSION};
use crate::rules::RuleSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Accuracy figures measured offline when the artifact was built.
///
/// Display only; the engine never reads them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Evaluation {
    pub conservative_accuracy: Option<f64>,
    pub aggressive_accuracy: Option<f64>,
}

/// Top-level manifest document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub format: String,
    pub version: u32,
    pub lexicon: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bigrams: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentences: Option<PathBuf>,
    #[serde(default)]
    pub evaluation: Evaluation,
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleSpec>,
}

impl Manifest {
    /// Check the format tag and version.
    pub fn check_version(&self) -> Result<(), String> {
        if self.format != ARTIFACT_FORMAT {
            return Err(format!(
                "unknown format '{}' (expected '{}')",
                self.format, ARTIFACT_FORMAT
            ));
        }
        if self.version != ARTIFACT_VERSION {
            return Err(format!(
                "unsupported version {} (this build reads version {})",
                self.version, ARTIFACT_VERSION
            ));
        }
        Ok(())
    }

    /// Resolve a table path relative to the manifest's directory.
    pub fn resolve(manifest_path: &Path, table: &Path) -> PathBuf {
        if table.is_absolute() {
            return table.to_path_buf();
        }
        manifest_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Scope;

    const MINIMAL: &str = r#"
        format = "shuddho-artifact"
        version = 1
        lexicon = "lexicon.tsv"
    "#;

    #[test]
    fn parses_minimal_manifest() {
        let manifest: Manifest = toml::from_str(MINIMAL).unwrap();
        assert_eq!(manifest.lexicon, PathBuf::from("lexicon.tsv"));
        assert!(manifest.bigrams.is_none());
        assert!(manifest.sentences.is_none());
        assert!(manifest.rules.is_empty());
        assert_eq!(manifest.evaluation, Evaluation::default());
        assert!(manifest.check_version().is_ok());
    }

    #[test]
    fn parses_rules_and_evaluation() {
        let manifest: Manifest = toml::from_str(
            r#"
            format = "shuddho-artifact"
            version = 1
            lexicon = "lexicon.tsv"
            bigrams = "bigrams.tsv"

            [evaluation]
            conservative_accuracy = 0.78

            [[rule]]
            name = "chandrabindu-order"
            pattern = "ঁা"
            replacement = "াঁ"
            priority = 10
            confidence = 0.95

            [[rule]]
            pattern = "ষন$"
            replacement = "ষণ"
            scope = "suffix"
            kind = "regex"
            confidence = 0.6
            "#,
        )
        .unwrap();
        assert_eq!(manifest.rules.len(), 2);
        assert_eq!(manifest.rules[0].name.as_deref(), Some("chandrabindu-order"));
        assert_eq!(manifest.rules[1].scope, Scope::Suffix);
        assert_eq!(manifest.evaluation.conservative_accuracy, Some(0.78));
        assert_eq!(manifest.evaluation.aggressive_accuracy, None);
    }

    #[test]
    fn rejects_wrong_format_or_version() {
        let mut manifest: Manifest = toml::from_str(MINIMAL).unwrap();
        manifest.version = 2;
        assert!(manifest.check_version().unwrap_err().contains("unsupported version 2"));

        manifest.version = 1;
        manifest.format = "pickle".into();
        assert!(manifest.check_version().unwrap_err().contains("unknown format"));
    }

    #[test]
    fn missing_lexicon_is_a_parse_error() {
        let result = toml::from_str::<Manifest>("format = \"shuddho-artifact\"\nversion = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn resolves_relative_paths_against_manifest_dir() {
        let manifest = Path::new("/data/shuddho/artifact.toml");
        assert_eq!(
            Manifest::resolve(manifest, Path::new("lexicon.tsv")),
            PathBuf::from("/data/shuddho/lexicon.tsv")
        );
        assert_eq!(
            Manifest::resolve(manifest, Path::new("/abs/lexicon.tsv")),
            PathBuf::from("/abs/lexicon.tsv")
        );
    }
}
