use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the settings file.
pub const CONFIG_PATH_VAR: &str = "TRANSLATOR_CONFIG";
/// Settings file used when `TRANSLATOR_CONFIG` is not set. May be absent.
pub const DEFAULT_CONFIG_FILE: &str = "translator.yaml";
/// Prefix for nested overrides, e.g. `TRANSLATOR__LLM__TIMEOUT_SECS=5`.
pub const ENV_PREFIX: &str = "TRANSLATOR";
/// Plain port override honoured by most hosting platforms.
pub const PORT_VAR: &str = "PORT";
/// Bearer token for the model API. Unset in the open deployment.
pub const API_KEY_VAR: &str = "MENTORPIECE_API_KEY";

pub const DEFAULT_ENDPOINT: &str = "https://api.mentorpiece.org/v1/process-ai-request";
pub const DEFAULT_TRANSLATION_MODEL: &str = "Qwen/Qwen3-VL-30B-A3B-Instruct";
pub const DEFAULT_JUDGE_MODEL: &str = "claude-sonnet-4-5-20250929";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting `{key}`: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub llm: LlmSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Everything the model client needs at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_translation_model")]
    pub translation_model: String,

    #[serde(default = "default_judge_model")]
    pub judge_model: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_translation_model() -> String {
    DEFAULT_TRANSLATION_MODEL.to_string()
}

fn default_judge_model() -> String {
    DEFAULT_JUDGE_MODEL.to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
            translation_model: default_translation_model(),
            judge_model: default_judge_model(),
        }
    }
}

impl LlmSettings {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `TRANSLATOR_CONFIG` | Settings file (yaml, json, toml...) |
    /// | `TRANSLATOR__<SECTION>__<KEY>` | Override any single field |
    /// | `PORT` | Listen port |
    /// | `MENTORPIECE_API_KEY` | Bearer token for the model API |
    pub fn load() -> Result<Self, SettingsError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        let path = vars
            .get(CONFIG_PATH_VAR)
            .cloned()
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(Path::new(&path), vars)
    }

    /// Layer defaults, the optional file at `path` and `vars`, later sources winning.
    pub fn load_from(path: &Path, vars: HashMap<String, String>) -> Result<Self, SettingsError> {
        let port = vars.get(PORT_VAR).cloned();
        let api_key = vars.get(API_KEY_VAR).filter(|key| !key.is_empty()).cloned();

        let settings: Settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .set_override_option("server.port", port)?
            .set_override_option("llm.api_key", api_key)?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.llm.endpoint.trim().is_empty() {
            return Err(invalid("llm.endpoint", "must not be empty"));
        }
        if self.llm.timeout_secs == 0 {
            return Err(invalid("llm.timeout_secs", "must be greater than zero"));
        }
        if self.llm.translation_model.trim().is_empty() {
            return Err(invalid("llm.translation_model", "must not be empty"));
        }
        if self.llm.judge_model.trim().is_empty() {
            return Err(invalid("llm.judge_model", "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(key: &'static str, message: &str) -> SettingsError {
    SettingsError::Invalid {
        key,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn missing_file() -> &'static Path {
        Path::new("does-not-exist/translator.yaml")
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        let settings = Settings::load_from(missing_file(), HashMap::new()).unwrap();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.llm.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.llm.timeout_secs, 20);
        assert_eq!(settings.llm.api_key, None);
        assert_eq!(settings.llm.translation_model, DEFAULT_TRANSLATION_MODEL);
        assert_eq!(settings.llm.judge_model, DEFAULT_JUDGE_MODEL);
    }

    #[test]
    fn port_and_api_key_come_from_well_known_vars() {
        let settings = Settings::load_from(
            missing_file(),
            vars(&[("PORT", "8080"), ("MENTORPIECE_API_KEY", "secret")]),
        )
        .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.llm.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn empty_api_key_is_treated_as_unset() {
        let settings =
            Settings::load_from(missing_file(), vars(&[("MENTORPIECE_API_KEY", "")])).unwrap();
        assert_eq!(settings.llm.api_key, None);
    }

    #[test]
    fn prefixed_vars_override_nested_fields() {
        let settings = Settings::load_from(
            missing_file(),
            vars(&[
                ("TRANSLATOR__LLM__JUDGE_MODEL", "judge-x"),
                ("TRANSLATOR__LLM__TIMEOUT_SECS", "5"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.llm.judge_model, "judge-x");
        assert_eq!(settings.llm.timeout_secs, 5);
        assert_eq!(settings.llm.translation_model, DEFAULT_TRANSLATION_MODEL);
    }

    #[test]
    fn file_values_are_layered_under_env() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "server:\n  port: 7000\nllm:\n  endpoint: http://localhost:9000/ai\n  translation_model: file-model"
        )
        .unwrap();

        let settings = Settings::load_from(
            file.path(),
            vars(&[("TRANSLATOR__LLM__TRANSLATION_MODEL", "env-model")]),
        )
        .unwrap();

        assert_eq!(settings.server.port, 7000);
        assert_eq!(settings.llm.endpoint, "http://localhost:9000/ai");
        assert_eq!(settings.llm.translation_model, "env-model");
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let err = Settings::load_from(missing_file(), vars(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, SettingsError::Load(_)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Settings::load_from(
            missing_file(),
            vars(&[("TRANSLATOR__LLM__TIMEOUT_SECS", "0")]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                key: "llm.timeout_secs",
                ..
            }
        ));
    }
}
