use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the Redraft application.
///
/// Loaded from `~/.redraft/config.toml` by default. Each section corresponds
/// to one concern of the revision workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedraftConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub suggestions: SuggestionsConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

impl RedraftConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RedraftConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Completion boundary settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Model identifier sent with every request. Fixed configuration,
    /// never user-controlled.
    pub model: String,
    /// Endpoint the client posts completion requests to (normally the
    /// local relay, which injects the provider credential).
    pub endpoint: String,
    /// Upstream provider URL the relay forwards to.
    pub upstream_url: String,
    /// Port the relay listens on.
    pub relay_port: u16,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            endpoint: "http://127.0.0.1:8787/api/completion".to_string(),
            upstream_url: "https://api.openai.com/v1/chat/completions".to_string(),
            relay_port: 8787,
        }
    }
}

/// Rewrite suggestion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionsConfig {
    /// Number of alternative rewrites requested per submission (1-3 in the UI).
    pub count: usize,
    /// How long a suggestion's "copied" indicator stays set, in milliseconds.
    pub copied_reset_ms: u64,
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            count: 1,
            copied_reset_ms: 2000,
        }
    }
}

/// Voice input/output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// BCP-47 locale tag used for both dictation and speech.
    pub locale: String,
    /// Synthesis speaking rate (1.0 = platform default).
    pub rate: f32,
    /// Synthesis pitch (1.0 = platform default).
    pub pitch: f32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let config = RedraftConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.completion.model, "gpt-3.5-turbo");
        assert_eq!(config.suggestions.count, 1);
        assert_eq!(config.suggestions.copied_reset_ms, 2000);
        assert_eq!(config.voice.locale, "en-US");
        assert_eq!(config.voice.rate, 1.0);
        assert_eq!(config.voice.pitch, 1.0);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = RedraftConfig::default();
        config.suggestions.count = 3;
        config.voice.locale = "de-DE".to_string();
        config.save(&path).unwrap();

        let loaded = RedraftConfig::load(&path).unwrap();
        assert_eq!(loaded.suggestions.count, 3);
        assert_eq!(loaded.voice.locale, "de-DE");
        assert_eq!(loaded.completion.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_load_missing_file_errors() {
        let path = PathBuf::from("/nonexistent/redraft/config.toml");
        assert!(RedraftConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let path = PathBuf::from("/nonexistent/redraft/config.toml");
        let config = RedraftConfig::load_or_default(&path);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_load_or_default_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not [valid toml").unwrap();

        let config = RedraftConfig::load_or_default(&path);
        assert_eq!(config.completion.relay_port, 8787);
    }

    #[test]
    fn test_partial_config_uses_section_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[suggestions]\ncount = 2\n").unwrap();

        let config = RedraftConfig::load(&path).unwrap();
        assert_eq!(config.suggestions.count, 2);
        // Untouched fields fall back to defaults.
        assert_eq!(config.suggestions.copied_reset_ms, 2000);
        assert_eq!(config.voice.locale, "en-US");
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.toml");
        RedraftConfig::default().save(&path).unwrap();
        assert!(path.exists());
    }
}
