//! # Editor Configuration
//!
//! This module defines the editor's configuration and its YAML form.
//!
//! Every field is optional in the YAML; missing fields take the built-in
//! defaults, which reproduce the stock editor: 120 bpm, the demo phrase as
//! the default notation, the `tab_input_v1` storage slot, and click-to-edit
//! off. Unknown keys are ignored.
//!
//! ## Example
//! ```rust
//! use tabkit::EditorConfig;
//!
//! let config = EditorConfig::from_yaml(
//!     "tempo-bpm: 96\ndirect-edit: true\n",
//! )
//! .unwrap();
//! assert_eq!(config.tempo_bpm, 96.0);
//! assert!(config.direct_edit);
//! assert_eq!(config.storage_key, "tab_input_v1");
//! ```

use serde::Deserialize;

use crate::error::TabError;
use crate::tab::Tempo;

/// Resolved editor configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub tempo_bpm: f64,           // playback tempo, quarter-note bpm
    pub default_notation: String, // used when the store has no saved text
    pub storage_key: String,      // the store slot this editor reads/writes
    pub direct_edit: bool,        // staff clicks edit the phrase when true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tempo_bpm: 120.0,
            default_notation: "4:5,4:7,3:7,2:5".to_string(),
            storage_key: "tab_input_v1".to_string(),
            direct_edit: false,
        }
    }
}

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
    tempo_bpm: Option<f64>,
    default_notation: Option<String>,
    storage_key: Option<String>,
    direct_edit: Option<bool>,
}

impl EditorConfig {
    /// Parse a YAML configuration document.
    ///
    /// Empty (or whitespace-only) content is the default configuration.
    pub fn from_yaml(content: &str) -> Result<Self, TabError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| TabError::Config(e.to_string()))?;

        let defaults = Self::default();

        let tempo_bpm = raw.tempo_bpm.unwrap_or(defaults.tempo_bpm);
        if tempo_bpm <= 0.0 {
            return Err(TabError::Config(format!(
                "tempo-bpm must be positive, got {}",
                tempo_bpm
            )));
        }

        Ok(Self {
            tempo_bpm,
            default_notation: raw.default_notation.unwrap_or(defaults.default_notation),
            storage_key: raw.storage_key.unwrap_or(defaults.storage_key),
            direct_edit: raw.direct_edit.unwrap_or(defaults.direct_edit),
        })
    }

    /// The configured tempo as a playback [`Tempo`]
    pub fn tempo(&self) -> Tempo {
        Tempo::new(self.tempo_bpm)
    }
}
