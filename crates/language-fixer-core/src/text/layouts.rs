//! Layout tables shipped with the binary.
//!
//! Both tables are keyed by the US QWERTY character of each physical key.

use super::mapping::MappingTable;

/// Bundled table names, matching the stem of the corresponding mapping file.
pub const HEBREW_ENGLISH: &str = "hebrew-english";
pub const RUSSIAN_ENGLISH: &str = "russian-english";

// Israeli SI-1452 layout. Shifted keys produce Latin capitals on that layout,
// so only the unshifted row is remapped.
const EN_HE: &str = "qwertyuiop[]asdfghjkl;'zxcvbnm,./";
const HE: &str = "/׳קראטוןםפ][שדגכעיחלךף,זסבהנמצתץ.";

// Russian ЙЦУКЕН, unshifted and shifted rows plus the digit row symbols that
// differ between the layouts.
const EN_RU_UNSHIFT: &str = "`qwertyuiop[]asdfghjkl;'zxcvbnm,./";
const RU_UNSHIFT: &str = "ёйцукенгшщзхъфывапролджэячсмитьбю.";
const EN_RU_SHIFT: &str = "~QWERTYUIOP{}ASDFGHJKL:\"ZXCVBNM<>?";
const RU_SHIFT: &str = "ЁЙЦУКЕНГШЩЗХЪФЫВАПРОЛДЖЭЯЧСМИТЬБЮ,";
const EN_RU_DIGIT_SHIFT: &str = "@#$^&";
const RU_DIGIT_SHIFT: &str = "\"№;:?";

fn zip_rows<'a>(rows: &'a [(&'a str, &'a str)]) -> impl Iterator<Item = (char, char)> + 'a {
    rows.iter().flat_map(|(from, to)| from.chars().zip(to.chars()))
}

pub fn hebrew_english() -> MappingTable {
    MappingTable::from_pairs("Hebrew-English", zip_rows(&[(EN_HE, HE)]))
}

pub fn russian_english() -> MappingTable {
    MappingTable::from_pairs(
        "Russian-English",
        zip_rows(&[
            (EN_RU_UNSHIFT, RU_UNSHIFT),
            (EN_RU_SHIFT, RU_SHIFT),
            (EN_RU_DIGIT_SHIFT, RU_DIGIT_SHIFT),
        ]),
    )
}

/// Looks up a bundled table by name (case-insensitive, `_` and `-` agnostic).
pub fn bundled(name: &str) -> Option<MappingTable> {
    let key = name.to_ascii_lowercase().replace('_', "-");
    match key.as_str() {
        HEBREW_ENGLISH => Some(hebrew_english()),
        RUSSIAN_ENGLISH => Some(russian_english()),
        _ => None,
    }
}
