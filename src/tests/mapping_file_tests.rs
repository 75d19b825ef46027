use std::{fs, path::Path};

use tracing_test::traced_test;

use super::unique_temp_dir;
use crate::mapping_file::{self, MappingFileError};

#[test]
fn shipped_hebrew_mapping_matches_bundled_table() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("mappings/hebrew-english.json");
    let table = mapping_file::load(&path).unwrap();
    let bundled = language_fixer_core::text::layouts::hebrew_english();

    assert_eq!(table.name(), "Hebrew-English");
    assert_eq!(table.len(), bundled.len());
    assert!(table.is_bijective());
    for (src, dst) in bundled.pairs() {
        assert_eq!(table.forward(src), Some(dst), "key {src:?}");
    }
}

#[test]
fn name_falls_back_to_file_stem() {
    let table = mapping_file::parse(
        Path::new("/tmp/greek-english.json"),
        r#"{ "mapping": { "a": "α", "b": "β" } }"#,
    )
    .unwrap();

    assert_eq!(table.name(), "greek-english");
    assert_eq!(table.forward('b'), Some('β'));
    assert_eq!(table.reverse('α'), Some('a'));
}

#[traced_test]
#[test]
fn multi_character_entries_are_skipped() {
    let table = mapping_file::parse(
        Path::new("x.json"),
        r#"{ "name": "X", "mapping": { "a": "b", "sh": "ш", "c": "" } }"#,
    )
    .unwrap();

    assert_eq!(table.len(), 1);
    assert!(logs_contain("skipping multi-character mapping entry"));
}

#[traced_test]
#[test]
fn non_bijective_mapping_loads_with_warning() {
    let table = mapping_file::parse(
        Path::new("x.json"),
        r#"{ "mapping": { "a": "ש", "A": "ש" } }"#,
    )
    .unwrap();

    assert!(!table.is_bijective());
    assert_eq!(table.reverse('ש'), Some('a'));
    assert!(logs_contain("mapping is not one-to-one"));
}

#[test]
fn malformed_and_empty_files_are_errors() {
    let err = mapping_file::parse(Path::new("bad.json"), "{ mapping: ").unwrap_err();
    assert!(matches!(err, MappingFileError::Parse { .. }));

    let err = mapping_file::parse(Path::new("empty.json"), r#"{ "mapping": {} }"#).unwrap_err();
    assert!(matches!(err, MappingFileError::Empty(_)));
}

#[test]
fn missing_file_uses_bundled_table_by_stem() {
    let dir = unique_temp_dir("bundled");
    let table = mapping_file::load(&dir.join("russian-english.json")).unwrap();
    assert_eq!(table.forward('q'), Some('й'));

    let err = mapping_file::load(&dir.join("klingon-english.json")).unwrap_err();
    assert!(matches!(err, MappingFileError::NotFound(_)));
}

#[test]
fn file_on_disk_wins_over_bundled_table() {
    let dir = unique_temp_dir("override");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("hebrew-english.json");
    fs::write(&path, r#"{ "name": "Custom", "mapping": { "q": "ק" } }"#).unwrap();

    let table = mapping_file::load(&path).unwrap();
    assert_eq!(table.name(), "Custom");
    assert_eq!(table.forward('q'), Some('ק'));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn relative_paths_resolve_against_base() {
    let base = Path::new("/etc/language-fixer");

    assert_eq!(
        mapping_file::resolve_path("mappings/he.json", base),
        base.join("mappings/he.json")
    );
    assert_eq!(
        mapping_file::resolve_path("/opt/he.json", base),
        Path::new("/opt/he.json")
    );
}
