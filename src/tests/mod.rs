mod mapping_file_tests;

use std::{
    path::PathBuf,
    sync::{Mutex, MutexGuard, OnceLock},
    time::{SystemTime, UNIX_EPOCH},
};

use crate::config::{ConversionMode, LanguagePair};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Serializes tests that touch process environment variables.
fn lock_env() -> MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("language-fixer-tests-{prefix}-{ts}"))
}

fn pair(name: &str, mapping_file: &str, hotkey: &str) -> LanguagePair {
    LanguagePair {
        name: name.to_string(),
        mapping_file: mapping_file.to_string(),
        hotkey: hotkey.to_string(),
        enabled: true,
        buffer_timeout: None,
        direction: ConversionMode::Forward,
    }
}
