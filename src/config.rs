use crate::correction::{CorrectorOptions, Mode, Thresholds};
use crate::defaults;
use crate::error::{Result, ShuddhoError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub artifact: ArtifactConfig,
    pub correction: CorrectionConfig,
    pub output: OutputConfig,
}

/// Where the correction artifact lives
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Manifest path. `None` means [`Config::default_artifact_path`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
}

/// Correction engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CorrectionConfig {
    pub mode: Mode,
    pub conservative_max_distance: usize,
    pub aggressive_max_distance: usize,
    pub conservative_rule_confidence: f32,
    pub sentence_memory: bool,
    pub bigrams: bool,
}

/// Output rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
    /// Batch worker threads; 0 uses every available core.
    pub workers: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            conservative_max_distance: defaults::CONSERVATIVE_MAX_DISTANCE,
            aggressive_max_distance: defaults::AGGRESSIVE_MAX_DISTANCE,
            conservative_rule_confidence: defaults::CONSERVATIVE_RULE_CONFIDENCE,
            sentence_memory: true,
            bigrams: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
            workers: 0,
        }
    }
}

/// Value type of a settable key.
#[derive(Debug, Clone, Copy, PartialEq)]
enum KeyKind {
    Path,
    Mode,
    Format,
    Count,
    Fraction,
    Flag,
}

/// Every key `config get`/`config set` understands.
const KEYS: &[(&str, KeyKind)] = &[
    ("artifact.manifest", KeyKind::Path),
    ("correction.mode", KeyKind::Mode),
    ("correction.conservative_max_distance", KeyKind::Count),
    ("correction.aggressive_max_distance", KeyKind::Count),
    ("correction.conservative_rule_confidence", KeyKind::Fraction),
    ("correction.sentence_memory", KeyKind::Flag),
    ("correction.bigrams", KeyKind::Flag),
    ("output.format", KeyKind::Format),
    ("output.color", KeyKind::Flag),
    ("output.workers", KeyKind::Count),
];

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Missing fields use default values; the result is validated.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ShuddhoError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ShuddhoError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, or defaults if the file doesn't exist
    ///
    /// Invalid TOML and invalid values are still errors.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(ShuddhoError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - SHUDDHO_MODE → correction.mode
    /// - SHUDDHO_ARTIFACT → artifact.manifest
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(mode) = std::env::var("SHUDDHO_MODE")
            && !mode.is_empty()
        {
            self.correction.mode = mode.parse()?;
        }

        if let Ok(manifest) = std::env::var("SHUDDHO_ARTIFACT")
            && !manifest.is_empty()
        {
            self.artifact.manifest = Some(PathBuf::from(manifest));
        }

        Ok(self)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        let c = &self.correction;
        if c.aggressive_max_distance < c.conservative_max_distance {
            return Err(ShuddhoError::ConfigInvalidValue {
                key: "correction.aggressive_max_distance".to_string(),
                message: format!(
                    "must be at least conservative_max_distance ({})",
                    c.conservative_max_distance
                ),
            });
        }
        if !(0.0..=1.0).contains(&c.conservative_rule_confidence) {
            return Err(ShuddhoError::ConfigInvalidValue {
                key: "correction.conservative_rule_confidence".to_string(),
                message: format!(
                    "must be within [0, 1], got {}",
                    c.conservative_rule_confidence
                ),
            });
        }
        Ok(())
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/shuddho/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shuddho")
            .join("config.toml")
    }

    /// Default artifact manifest: ~/.local/share/shuddho/artifact.toml on Linux
    pub fn default_artifact_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shuddho")
            .join(defaults::ARTIFACT_MANIFEST)
    }

    /// Manifest path to load, falling back to the default location.
    pub fn artifact_path(&self) -> PathBuf {
        self.artifact
            .manifest
            .clone()
            .unwrap_or_else(Self::default_artifact_path)
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            conservative_max_distance: self.correction.conservative_max_distance,
            aggressive_max_distance: self.correction.aggressive_max_distance,
            conservative_rule_confidence: self.correction.conservative_rule_confidence,
        }
    }

    pub fn corrector_options(&self) -> CorrectorOptions {
        CorrectorOptions {
            thresholds: self.thresholds(),
            sentence_memory: self.correction.sentence_memory,
            bigrams: self.correction.bigrams,
        }
    }

    /// Known dotted keys, in display order.
    pub fn keys() -> impl Iterator<Item = &'static str> {
        KEYS.iter().map(|(key, _)| *key)
    }

    /// Read a value by dotted key, formatted for display.
    pub fn get_value_by_path(&self, key: &str) -> Result<String> {
        let c = &self.correction;
        let o = &self.output;
        let value = match key {
            "artifact.manifest" => self.artifact_path().display().to_string(),
            "correction.mode" => c.mode.to_string(),
            "correction.conservative_max_distance" => c.conservative_max_distance.to_string(),
            "correction.aggressive_max_distance" => c.aggressive_max_distance.to_string(),
            "correction.conservative_rule_confidence" => {
                c.conservative_rule_confidence.to_string()
            }
            "correction.sentence_memory" => c.sentence_memory.to_string(),
            "correction.bigrams" => c.bigrams.to_string(),
            "output.format" => match o.format {
                OutputFormat::Text => "text".to_string(),
                OutputFormat::Json => "json".to_string(),
            },
            "output.color" => o.color.to_string(),
            "output.workers" => o.workers.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Write one dotted key into the config file at `path`.
    ///
    /// Other keys and sections in the file are kept. The file is created if it
    /// doesn't exist, and nothing is written if the result would be invalid.
    pub fn set_value_by_path(path: &Path, key: &str, value: &str) -> Result<()> {
        let kind = KEYS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| unknown_key(key))?;
        let parsed = parse_value(key, kind, value)?;

        let mut table = match fs::read_to_string(path) {
            Ok(contents) => toml::from_str::<toml::Table>(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => toml::Table::new(),
            Err(e) => return Err(e.into()),
        };

        let (section, field) = key.split_once('.').ok_or_else(|| unknown_key(key))?;
        let entry = table
            .entry(section)
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        let toml::Value::Table(section_table) = entry else {
            return Err(ShuddhoError::ConfigParse {
                message: format!("'{}' is not a table", section),
            });
        };
        section_table.insert(field.to_string(), parsed);

        let serialized = toml::to_string_pretty(&table).map_err(|e| ShuddhoError::ConfigParse {
            message: e.to_string(),
        })?;
        let config: Config = toml::from_str(&serialized)?;
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serialized)?;
        Ok(())
    }

    /// Render the whole configuration as TOML.
    pub fn to_display_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        shown.artifact.manifest = Some(self.artifact_path());
        toml::to_string_pretty(&shown).map_err(|e| ShuddhoError::ConfigParse {
            message: e.to_string(),
        })
    }
}

fn unknown_key(key: &str) -> ShuddhoError {
    ShuddhoError::ConfigInvalidValue {
        key: key.to_string(),
        message: format!(
            "unknown key (known keys: {})",
            Config::keys().collect::<Vec<_>>().join(", ")
        ),
    }
}

fn parse_value(key: &str, kind: KeyKind, raw: &str) -> Result<toml::Value> {
    let invalid = |message: String| ShuddhoError::ConfigInvalidValue {
        key: key.to_string(),
        message,
    };
    let raw = raw.trim();
    let value = match kind {
        KeyKind::Path => {
            if raw.is_empty() {
                return Err(invalid("path must not be empty".to_string()));
            }
            toml::Value::String(raw.to_string())
        }
        KeyKind::Mode => toml::Value::String(raw.parse::<Mode>()?.as_str().to_string()),
        KeyKind::Format => match raw.to_lowercase().as_str() {
            f @ ("text" | "json") => toml::Value::String(f.to_string()),
            _ => return Err(invalid(format!("expected 'text' or 'json', got '{}'", raw))),
        },
        KeyKind::Count => {
            let n: u32 = raw
                .parse()
                .map_err(|_| invalid(format!("expected a non-negative integer, got '{}'", raw)))?;
            toml::Value::Integer(i64::from(n))
        }
        KeyKind::Fraction => {
            let f: f64 = raw
                .parse()
                .map_err(|_| invalid(format!("expected a number, got '{}'", raw)))?;
            toml::Value::Float(f)
        }
        KeyKind::Flag => {
            let b: bool = raw
                .parse()
                .map_err(|_| invalid(format!("expected true or false, got '{}'", raw)))?;
            toml::Value::Boolean(b)
        }
    };
    Ok(value)
}
