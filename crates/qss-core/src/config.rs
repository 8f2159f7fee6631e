//! Solver configuration.
//!
//! Loaded from YAML (`.yaml`/`.yml`) or JSON (`.json`) files; every field has
//! a default, so an empty document is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::decoder::{DecodeMode, Decoder};
use crate::error::{CoreError, CoreResult};

/// Complete solver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Shots submitted to the backend
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Amplification rounds; `floor(sqrt(2^n))` when unset
    #[serde(default)]
    pub grover_iterations: Option<usize>,

    /// Reject targets the sum register cannot hold
    #[serde(default = "default_true")]
    pub check_register_range: bool,

    /// Result decoding settings
    #[serde(default)]
    pub decode: DecodeConfig,
}

/// Result decoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// `greedy` or `exhaustive`
    #[serde(default)]
    pub mode: DecodeMode,

    /// Candidates below this probability are dropped
    #[serde(default = "default_min_probability")]
    pub min_probability: f64,
}

fn default_shots() -> u32 {
    1024
}

fn default_true() -> bool {
    true
}

fn default_min_probability() -> f64 {
    0.0
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            shots: default_shots(),
            grover_iterations: None,
            check_register_range: default_true(),
            decode: DecodeConfig::default(),
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        DecodeConfig {
            mode: DecodeMode::default(),
            min_probability: default_min_probability(),
        }
    }
}

impl DecodeConfig {
    /// The decoder these settings describe.
    pub fn decoder(&self) -> Decoder {
        Decoder::new()
            .with_mode(self.mode)
            .with_min_probability(self.min_probability)
    }
}

impl SolverConfig {
    /// Load and validate a configuration file, choosing the format by extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&contents),
            Some("json") => Self::from_json_str(&contents),
            _ => Err(CoreError::InvalidConfig(format!(
                "unsupported configuration format: {}",
                path.display()
            ))),
        }
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(contents: &str) -> CoreResult<Self> {
        let config: SolverConfig = serde_yaml_ng::from_str(contents)
            .map_err(|e| CoreError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(contents: &str) -> CoreResult<Self> {
        let config: SolverConfig =
            serde_json::from_str(contents).map_err(|e| CoreError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> CoreResult<()> {
        if self.shots == 0 {
            return Err(CoreError::InvalidConfig("shots must be > 0".into()));
        }

        let p = self.decode.min_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(CoreError::InvalidConfig(format!(
                "decode.min_probability must be within [0, 1], got {p}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.shots, 1024);
        assert_eq!(config.grover_iterations, None);
        assert!(config.check_register_range);
        assert_eq!(config.decode.mode, DecodeMode::Greedy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = SolverConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, SolverConfig::default());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "shots: 4096\ndecode:\n  mode: exhaustive\n";
        let config = SolverConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.shots, 4096);
        assert_eq!(config.decode.mode, DecodeMode::Exhaustive);
        assert_eq!(config.decode.min_probability, 0.0);
        assert!(config.check_register_range);
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            SolverConfig::from_json_str(r#"{"shots": 0}"#),
            Err(CoreError::InvalidConfig(_))
        ));
        assert!(matches!(
            SolverConfig::from_json_str(r#"{"decode": {"min_probability": 1.5}}"#),
            Err(CoreError::InvalidConfig(_))
        ));
        assert!(matches!(
            SolverConfig::from_yaml_str("decode:\n  mode: random\n"),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("solver.json");
        std::fs::File::create(&json)
            .unwrap()
            .write_all(br#"{"grover_iterations": 3}"#)
            .unwrap();
        assert_eq!(SolverConfig::from_file(&json).unwrap().grover_iterations, Some(3));

        let toml = dir.path().join("solver.toml");
        std::fs::write(&toml, "shots = 1").unwrap();
        assert!(matches!(
            SolverConfig::from_file(&toml),
            Err(CoreError::InvalidConfig(_))
        ));

        assert!(matches!(
            SolverConfig::from_file(dir.path().join("missing.yaml")),
            Err(CoreError::Io(_))
        ));
    }
}
