//! On-disk correction artifact: manifest, lexicon, rules and context tables.
//!
//! The artifact is read completely at startup. Every file handle is closed
//! before [`Artifact::load`] returns, and any problem is an
//! [`ShuddhoError::ArtifactLoad`] so the caller can refuse to serve.

pub mod manifest;
pub mod tsv;

use crate::error::{Result, ShuddhoError};
use crate::lexicon::{BigramTable, Lexicon, SentenceMemory};
use crate::rules::RuleSet;
pub use manifest::{Evaluation, Manifest};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Everything the correction engine needs, fully parsed.
#[derive(Debug, Clone, Default)]
pub struct Artifact {
    pub lexicon: Lexicon,
    pub rules: RuleSet,
    pub bigrams: BigramTable,
    pub sentences: SentenceMemory,
    pub evaluation: Evaluation,
    /// Manifest the artifact was loaded from, if any.
    pub source: Option<PathBuf>,
}

impl Artifact {
    /// Assemble an artifact from in-memory parts.
    pub fn new(lexicon: Lexicon, rules: RuleSet) -> Self {
        Self {
            lexicon,
            rules,
            ..Self::default()
        }
    }

    pub fn with_bigrams(mut self, bigrams: BigramTable) -> Self {
        self.bigrams = bigrams;
        self
    }

    pub fn with_sentences(mut self, sentences: SentenceMemory) -> Self {
        self.sentences = sentences;
        self
    }

    /// Load a manifest and every table it references.
    pub fn load(manifest_path: &Path) -> Result<Self> {
        let started = Instant::now();

        let contents = std::fs::read_to_string(manifest_path)
            .map_err(|e| ShuddhoError::artifact(manifest_path, e.to_string()))?;
        let manifest: Manifest = toml::from_str(&contents)
            .map_err(|e| ShuddhoError::artifact(manifest_path, e.to_string()))?;
        manifest
            .check_version()
            .map_err(|msg| ShuddhoError::artifact(manifest_path, msg))?;

        let rules = RuleSet::new(manifest.rules.clone())
            .map_err(|e| ShuddhoError::artifact(manifest_path, e.to_string()))?;

        let lexicon = tsv::read_lexicon(&Manifest::resolve(manifest_path, &manifest.lexicon))?;

        let bigrams = match &manifest.bigrams {
            Some(path) => tsv::read_bigrams(&Manifest::resolve(manifest_path, path))?,
            None => BigramTable::new(),
        };
        let sentences = match &manifest.sentences {
            Some(path) => tsv::read_sentences(&Manifest::resolve(manifest_path, path))?,
            None => SentenceMemory::new(),
        };

        tracing::info!(
            manifest = %manifest_path.display(),
            entries = lexicon.len(),
            vocabulary = lexicon.vocabulary_len(),
            rules = rules.len(),
            bigrams = bigrams.len(),
            sentences = sentences.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "artifact loaded"
        );

        Ok(Self {
            lexicon,
            rules,
            bigrams,
            sentences,
            evaluation: manifest.evaluation,
            source: Some(manifest_path.to_path_buf()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_artifact(dir: &TempDir, manifest: &str) -> PathBuf {
        fs::write(
            dir.path().join("lexicon.tsv"),
            "বীজ্ঞানী\tবিজ্ঞানী\t5\nতিনি\tতিনি\t9\n",
        )
        .unwrap();
        let path = dir.path().join("artifact.toml");
        fs::write(&path, manifest).unwrap();
        path
    }

    #[test]
    fn loads_complete_artifact() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bigrams.tsv"), "সে\tযাবে\tযাবেন\n").unwrap();
        fs::write(dir.path().join("sentences.tsv"), "ক খ\tগ ঘ\n").unwrap();
        let path = write_artifact(
            &dir,
            r#"
            format = "shuddho-artifact"
            version = 1
            lexicon = "lexicon.tsv"
            bigrams = "bigrams.tsv"
            sentences = "sentences.tsv"

            [evaluation]
            aggressive_accuracy = 0.8

            [[rule]]
            pattern = "ঈ"
            replacement = "ই"
            confidence = 0.95
            "#,
        );

        let artifact = Artifact::load(&path).unwrap();
        assert_eq!(artifact.lexicon.len(), 2);
        assert_eq!(artifact.rules.len(), 1);
        assert_eq!(artifact.bigrams.len(), 1);
        assert_eq!(artifact.sentences.len(), 1);
        assert_eq!(artifact.evaluation.aggressive_accuracy, Some(0.8));
        assert_eq!(artifact.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn optional_tables_default_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_artifact(
            &dir,
            "format = \"shuddho-artifact\"\nversion = 1\nlexicon = \"lexicon.tsv\"\n",
        );
        let artifact = Artifact::load(&path).unwrap();
        assert!(artifact.rules.is_empty());
        assert!(artifact.bigrams.is_empty());
        assert!(artifact.sentences.is_empty());
    }

    #[test]
    fn missing_manifest_is_artifact_error() {
        let err = Artifact::load(Path::new("/nonexistent/shuddho/artifact.toml")).unwrap_err();
        assert!(matches!(err, ShuddhoError::ArtifactLoad { .. }));
    }

    #[test]
    fn missing_referenced_table_is_artifact_error() {
        let dir = TempDir::new().unwrap();
        let path = write_artifact(
            &dir,
            "format = \"shuddho-artifact\"\nversion = 1\nlexicon = \"lexicon.tsv\"\nbigrams = \"absent.tsv\"\n",
        );
        let err = Artifact::load(&path).unwrap_err();
        assert!(err.to_string().contains("absent.tsv"), "{err}");
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_artifact(
            &dir,
            "format = \"shuddho-artifact\"\nversion = 9\nlexicon = \"lexicon.tsv\"\n",
        );
        let err = Artifact::load(&path).unwrap_err().to_string();
        assert!(err.contains("unsupported version 9"), "{err}");
    }

    #[test]
    fn invalid_rule_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_artifact(
            &dir,
            r#"
            format = "shuddho-artifact"
            version = 1
            lexicon = "lexicon.tsv"

            [[rule]]
            pattern = "("
            replacement = "x"
            kind = "regex"
            confidence = 0.5
            "#,
        );
        let err = Artifact::load(&path).unwrap_err();
        assert!(matches!(err, ShuddhoError::ArtifactLoad { .. }));
        assert!(err.to_string().contains("invalid regex"), "{err}");
    }

    #[test]
    fn malformed_manifest_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_artifact(&dir, "format = \"shuddho-artifact\"\nversion = \n");
        assert!(matches!(
            Artifact::load(&path),
            Err(ShuddhoError::ArtifactLoad { .. })
        ));
    }
}
