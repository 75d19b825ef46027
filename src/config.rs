mod config_validator;
pub mod constants;
pub mod raw_config;

use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

pub use config_validator::find_duplicate_hotkeys;
use constants::{
    APP_DIR, CONFIG_FILE, DEFAULT_BUFFER_TIMEOUT_SECS, DEFAULT_INJECT_DELAY_MS,
    DEFAULT_PAIR_HOTKEY, DEFAULT_PAIR_MAPPING, DEFAULT_PAIR_NAME, HOME_OVERRIDE_ENV,
};
use language_fixer_core::{DirectionPolicy, Hotkey, HotkeyParseError};
pub use raw_config::RawConfig;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("buffer_timeout for {owner} must be a positive number of seconds, got {value}")]
    InvalidTimeout { owner: String, value: f64 },

    #[error("language pair #{0} has an empty name")]
    EmptyName(usize),

    #[error("invalid hotkey '{hotkey}' for {pair}: {source}")]
    InvalidHotkey {
        pair: String,
        hotkey: String,
        #[source]
        source: HotkeyParseError,
    },

    #[error("hotkey '{hotkey}' for {pair} needs cmd or ctrl, otherwise the key press types a character")]
    UnchordedHotkey { pair: String, hotkey: String },

    #[error("{0}")]
    DuplicateHotkeys(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to read or write config: {0}")]
    Store(#[from] confy::ConfyError),
}

/// How a pair picks the direction of a fresh conversion.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConversionMode {
    /// Always source layout to target layout.
    #[default]
    Forward,
    /// Whichever layout dominates the buffered text is converted to the other.
    Auto,
}

impl From<ConversionMode> for DirectionPolicy {
    fn from(mode: ConversionMode) -> Self {
        match mode {
            ConversionMode::Forward => Self::Forward,
            ConversionMode::Auto => Self::Auto,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguagePair {
    pub name: String,
    pub mapping_file: String,
    pub hotkey: String,
    pub enabled: bool,

    /// Overrides the global `buffer_timeout` for this pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_timeout: Option<f64>,

    #[serde(default)]
    pub direction: ConversionMode,
}

impl LanguagePair {
    pub fn parsed_hotkey(&self) -> Result<Hotkey, ConfigError> {
        self.hotkey
            .parse()
            .map_err(|source| ConfigError::InvalidHotkey {
                pair: self.name.clone(),
                hotkey: self.hotkey.clone(),
                source,
            })
    }

    /// Effective timeout given the global default, in seconds.
    pub fn timeout_secs(&self, default: f64) -> f64 {
        self.buffer_timeout.unwrap_or(default)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Config {
    /// Seconds since the last keystroke during which buffered text can
    /// still be converted.
    pub buffer_timeout: f64,

    /// Pause before replaying, so the hotkey's modifiers are released.
    pub inject_delay_ms: u32,

    switch_layout: bool,

    pub language_pairs: Vec<LanguagePair>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_timeout: DEFAULT_BUFFER_TIMEOUT_SECS,
            inject_delay_ms: DEFAULT_INJECT_DELAY_MS,
            switch_layout: false,
            language_pairs: vec![LanguagePair {
                name: DEFAULT_PAIR_NAME.to_string(),
                mapping_file: DEFAULT_PAIR_MAPPING.to_string(),
                hotkey: DEFAULT_PAIR_HOTKEY.to_string(),
                enabled: true,
                buffer_timeout: None,
                direction: ConversionMode::Forward,
            }],
        }
    }
}

impl Config {
    pub fn switch_layout(&self) -> bool {
        self.switch_layout
    }

    pub fn set_switch_layout(&mut self, value: bool) {
        self.switch_layout = value;
    }

    pub fn enabled_pairs(&self) -> impl Iterator<Item = &LanguagePair> {
        self.language_pairs.iter().filter(|p| p.enabled)
    }

    pub fn inject_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.inject_delay_ms))
    }

    /// Timeout for `pair` as a `Duration`. Assumes the config was validated.
    pub fn timeout_for(&self, pair: &LanguagePair) -> Duration {
        Duration::from_secs_f64(pair.timeout_secs(self.buffer_timeout))
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let cfg = Self {
            buffer_timeout: raw.buffer_timeout,
            inject_delay_ms: raw.inject_delay_ms,
            switch_layout: raw.switch_layout,
            language_pairs: raw.language_pairs.into_iter().map(Into::into).collect(),
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawConfig::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// `$LANGUAGE_FIXER_HOME`, or `~/.config/language-fixer`.
pub fn config_dir() -> io::Result<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_OVERRIDE_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let home = std::env::var_os("HOME")
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "HOME is not set"))?;

    Ok(PathBuf::from(home).join(".config").join(APP_DIR))
}

pub fn config_path() -> io::Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    std::fs::create_dir_all(dir)
}

/// Loads the config, writing the default one first if the file is missing.
pub fn load() -> Result<Config, ConfigError> {
    load_path(&config_path()?)
}

pub fn load_path(path: &Path) -> Result<Config, ConfigError> {
    ensure_parent_dir(path)?;
    Ok(confy::load_path(path)?)
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    cfg.validate()?;
    let path = config_path()?;
    ensure_parent_dir(&path)?;
    confy::store_path(path, cfg)?;
    Ok(())
}
