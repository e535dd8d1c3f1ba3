//! Correction strictness modes.

use crate::error::ShuddhoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How eagerly the engine rewrites tokens.
///
/// `Conservative` uses a tight fuzzy bound and only high-confidence rules;
/// `Aggressive` loosens the bound and applies every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Conservative,
    Aggressive,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Conservative, Mode::Aggressive];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Conservative => "conservative",
            Mode::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ShuddhoError;

    /// Parse a mode name. No fallback: anything unrecognised is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(Mode::Conservative),
            "aggressive" => Ok(Mode::Aggressive),
            _ => Err(ShuddhoError::InvalidMode {
                value: s.to_string(),
            }),
        }
    }
}

/// Per-mode thresholds resolved from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub conservative_max_distance: usize,
    pub aggressive_max_distance: usize,
    /// Rules below this confidence are skipped in conservative mode.
    pub conservative_rule_confidence: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            conservative_max_distance: crate::defaults::CONSERVATIVE_MAX_DISTANCE,
            aggressive_max_distance: crate::defaults::AGGRESSIVE_MAX_DISTANCE,
            conservative_rule_confidence: crate::defaults::CONSERVATIVE_RULE_CONFIDENCE,
        }
    }
}

impl Thresholds {
    /// Maximum fuzzy-match distance for `mode`.
    pub fn max_distance(&self, mode: Mode) -> usize {
        match mode {
            Mode::Conservative => self.conservative_max_distance,
            Mode::Aggressive => self.aggressive_max_distance,
        }
    }

    /// Minimum rule confidence for `mode`.
    pub fn rule_confidence(&self, mode: Mode) -> f32 {
        match mode {
            Mode::Conservative => self.conservative_rule_confidence,
            Mode::Aggressive => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_modes() {
        assert_eq!("conservative".parse::<Mode>().unwrap(), Mode::Conservative);
        assert_eq!("aggressive".parse::<Mode>().unwrap(), Mode::Aggressive);
        assert_eq!(" Aggressive ".parse::<Mode>().unwrap(), Mode::Aggressive);
    }

    #[test]
    fn unknown_mode_is_an_error() {
        for bad in ["", "safe", "aggr", "both"] {
            let err = bad.parse::<Mode>().unwrap_err();
            assert!(
                matches!(err, ShuddhoError::InvalidMode { ref value } if value == bad),
                "unexpected error for {bad:?}: {err}"
            );
        }
    }

    #[test]
    fn display_round_trips() {
        for mode in Mode::ALL {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Mode::Aggressive).unwrap();
        assert_eq!(json, "\"aggressive\"");
        let back: Mode = serde_json::from_str("\"conservative\"").unwrap();
        assert_eq!(back, Mode::Conservative);
    }

    #[test]
    fn default_thresholds_are_ordered() {
        let t = Thresholds::default();
        assert_eq!(t.max_distance(Mode::Conservative), 1);
        assert_eq!(t.max_distance(Mode::Aggressive), 2);
        assert!(t.rule_confidence(Mode::Aggressive) <= t.rule_confidence(Mode::Conservative));
    }
}
