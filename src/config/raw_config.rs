use serde::Deserialize;

use super::{
    ConversionMode, LanguagePair,
    constants::{DEFAULT_BUFFER_TIMEOUT_SECS, DEFAULT_INJECT_DELAY_MS},
};

/// Config as written on disk, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfig {
    #[serde(default = "default_buffer_timeout")]
    pub buffer_timeout: f64,

    #[serde(default = "default_inject_delay_ms")]
    pub inject_delay_ms: u32,

    #[serde(default)]
    pub switch_layout: bool,

    #[serde(default)]
    pub language_pairs: Vec<RawLanguagePair>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLanguagePair {
    pub name: String,
    pub mapping_file: String,
    pub hotkey: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub buffer_timeout: Option<f64>,

    #[serde(default)]
    pub direction: ConversionMode,
}

fn default_buffer_timeout() -> f64 {
    DEFAULT_BUFFER_TIMEOUT_SECS
}

fn default_inject_delay_ms() -> u32 {
    DEFAULT_INJECT_DELAY_MS
}

fn default_enabled() -> bool {
    true
}

impl From<RawLanguagePair> for LanguagePair {
    fn from(raw: RawLanguagePair) -> Self {
        Self {
            name: raw.name.trim().to_string(),
            mapping_file: raw.mapping_file,
            hotkey: raw.hotkey,
            enabled: raw.enabled,
            buffer_timeout: raw.buffer_timeout,
            direction: raw.direction,
        }
    }
}
