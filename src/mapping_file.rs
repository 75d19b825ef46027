//! Loads layout tables from JSON mapping files.
//!
//! File shape:
//!
//! ```json
//! { "name": "Hebrew-English", "description": "...", "mapping": { "a": "ש" } }
//! ```

use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};

use language_fixer_core::{MappingTable, text::layouts};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum MappingFileError {
    #[error("mapping file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read mapping file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid mapping file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("mapping file {} has no usable entries", .0.display())]
    Empty(PathBuf),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingFile {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    pub mapping: BTreeMap<String, String>,
}

impl MappingFile {
    /// Converts to a table, skipping entries that are not one character on
    /// each side.
    pub fn into_table(self, fallback_name: &str) -> MappingTable {
        let name = self.name.unwrap_or_else(|| fallback_name.to_string());

        let pairs = self.mapping.iter().filter_map(|(src, dst)| {
            let pair = single_char(src).zip(single_char(dst));
            if pair.is_none() {
                tracing::warn!(table = %name, src = %src, dst = %dst, "skipping multi-character mapping entry");
            }
            pair
        });
        let table = MappingTable::from_pairs(name.clone(), pairs.collect::<Vec<_>>());

        if !table.is_bijective() {
            tracing::warn!(
                table = %name,
                conflicts = table.conflicts().len(),
                "mapping is not one-to-one, reverse lookups keep the lowercase source"
            );
        }
        table
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

/// Expands `~/` to `$HOME` and resolves relative paths against `base`.
pub fn resolve_path(raw: &str, base: &Path) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(rest);
    }

    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn parse(path: &Path, text: &str) -> Result<MappingTable, MappingFileError> {
    let file: MappingFile = serde_json::from_str(text).map_err(|source| MappingFileError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let table = file.into_table(&file_stem(path));
    if table.is_empty() {
        return Err(MappingFileError::Empty(path.to_path_buf()));
    }
    Ok(table)
}

/// Reads a mapping file.
///
/// A missing file whose stem names a bundled layout (`hebrew-english`,
/// `russian-english`) falls back to the table compiled into the binary.
pub fn load(path: &Path) -> Result<MappingTable, MappingFileError> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse(path, &text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let table = layouts::bundled(&file_stem(path))
                .ok_or_else(|| MappingFileError::NotFound(path.to_path_buf()))?;
            tracing::info!(
                path = %path.display(),
                table = table.name(),
                "mapping file missing, using bundled table"
            );
            Ok(table)
        }
        Err(source) => Err(MappingFileError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
