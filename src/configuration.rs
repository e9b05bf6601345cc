use std::time::Duration;

use serde_derive::Deserialize;

use crate::enumeration::Bounds;
use crate::log::Level;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SamplerConfig {
    #[serde(default)]
    pub source: SourceOptions,

    #[serde(default)]
    pub bounds: Bounds,

    #[serde(default)]
    pub enumeration: EnumerationOptions,

    #[serde(default)]
    pub log: LogOptions,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SourceOptions {
    pub directory: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            directory: "grammars".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EnumerationOptions {
    /// humantime syntax, e.g. `"500ms"` or `"2s"`
    #[serde(default)]
    pub time_limit: Option<String>,
}

impl EnumerationOptions {
    pub fn time_limit(&self) -> Result<Option<Duration>, humantime::DurationError> {
        self.time_limit
            .as_deref()
            .map(humantime::parse_duration)
            .transpose()
    }
}

#[derive(Copy, Clone, Debug, Default, Deserialize)]
pub struct LogOptions {
    #[serde(default)]
    pub level: Level,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigReadError {
    #[error("failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("invalid enumeration.time_limit `{0}`: {1}")]
    InvalidDuration(String, humantime::DurationError),
}

pub fn parse_config(content: &str) -> Result<SamplerConfig, ConfigReadError> {
    let config = toml::from_str::<SamplerConfig>(content)?;

    if let Err(e) = config.enumeration.time_limit() {
        let raw = config.enumeration.time_limit.clone().unwrap_or_default();
        return Err(ConfigReadError::InvalidDuration(raw, e));
    }

    Ok(config)
}

pub fn load_config<P: AsRef<std::path::Path>>(path: P) -> Result<SamplerConfig, ConfigReadError> {
    let config = std::fs::read_to_string(path)?;

    parse_config(&config)
}
