pub const APP_DIR: &str = "language-fixer";
pub const CONFIG_FILE: &str = "config.yaml";

/// Overrides the configuration directory (`~/.config/language-fixer`).
pub const HOME_OVERRIDE_ENV: &str = "LANGUAGE_FIXER_HOME";

pub const DEFAULT_BUFFER_TIMEOUT_SECS: f64 = 10.0;
pub const DEFAULT_INJECT_DELAY_MS: u32 = 150;

pub const DEFAULT_PAIR_NAME: &str = "Hebrew-English";
pub const DEFAULT_PAIR_MAPPING: &str = "mappings/hebrew-english.json";
pub const DEFAULT_PAIR_HOTKEY: &str = "cmd+alt+h";
