use std::{fmt::Write as _, time::Duration};

use language_fixer_core::Hotkey;

use crate::config::{Config, ConfigError, LanguagePair};

/// Positive and small enough to fit in a `Duration`.
fn valid_timeout(secs: f64) -> bool {
    secs > 0.0 && Duration::try_from_secs_f64(secs).is_ok()
}

/// Lists enabled pairs that share a hotkey, or `None` when all are unique.
///
/// Pairs whose hotkey does not parse are skipped; they are reported
/// separately.
pub fn find_duplicate_hotkeys(pairs: &[LanguagePair]) -> Option<String> {
    let parsed: Vec<_> = pairs
        .iter()
        .filter(|p| p.enabled)
        .filter_map(|p| p.hotkey.parse::<Hotkey>().ok().map(|hk| (p.name.as_str(), hk)))
        .collect();

    let duplicates: Vec<_> = parsed
        .iter()
        .enumerate()
        .flat_map(|(i, (name1, hk1))| {
            parsed
                .iter()
                .skip(i + 1)
                .filter(move |(_, hk2)| hk1 == hk2)
                .map(move |(name2, _)| (*name1, *name2, *hk1))
        })
        .collect();

    if duplicates.is_empty() {
        return None;
    }

    let mut error = String::from("Duplicate hotkeys found:\n\n");
    for (name1, name2, hk) in &duplicates {
        // `String` implements `fmt::Write` infallibly.
        let _ = writeln!(error, "- '{name1}' and '{name2}' both use {hk}");
    }
    error.push_str("\nEach language pair must have a unique hotkey.");
    Some(error)
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !valid_timeout(self.buffer_timeout) {
            return Err(ConfigError::InvalidTimeout {
                owner: "the global setting".to_string(),
                value: self.buffer_timeout,
            });
        }

        for (i, pair) in self.language_pairs.iter().enumerate() {
            if pair.name.trim().is_empty() {
                return Err(ConfigError::EmptyName(i + 1));
            }

            if let Some(secs) = pair.buffer_timeout.filter(|s| !valid_timeout(*s)) {
                return Err(ConfigError::InvalidTimeout {
                    owner: pair.name.clone(),
                    value: secs,
                });
            }

            if !pair.enabled {
                continue;
            }

            let hotkey = pair.parsed_hotkey()?;
            if !hotkey.is_chorded() {
                return Err(ConfigError::UnchordedHotkey {
                    pair: pair.name.clone(),
                    hotkey: pair.hotkey.clone(),
                });
            }
        }

        match find_duplicate_hotkeys(&self.language_pairs) {
            Some(report) => Err(ConfigError::DuplicateHotkeys(report)),
            None => Ok(()),
        }
    }
}
