use super::mapping::MappingTable;

/// Direction of a conversion through a [`MappingTable`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Source layout characters to target layout characters.
    Forward,
    /// Target layout characters back to source layout characters.
    Reverse,
}

/// How a language pair picks the direction for a fresh conversion.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum DirectionPolicy {
    #[default]
    Forward,
    /// Pick per snapshot with [`detect_direction`].
    Auto,
}

impl DirectionPolicy {
    pub fn resolve(self, text: &str, mapping: &MappingTable) -> Direction {
        match self {
            Self::Forward => Direction::Forward,
            Self::Auto => detect_direction(text, mapping),
        }
    }
}

/// Guesses which layout `text` was typed in.
///
/// Counts characters that only make sense as target layout output against
/// alphabetic source layout characters. Ties, including empty input, go
/// forward since typing on the source layout by mistake is the common case.
#[must_use]
pub fn detect_direction(text: &str, mapping: &MappingTable) -> Direction {
    let (target_hits, source_hits) = text.chars().fold((0usize, 0usize), |(t, s), ch| {
        if mapping.contains_target(ch) && !mapping.contains_source(ch) {
            (t + 1, s)
        } else if mapping.contains_source(ch) && ch.is_alphabetic() {
            (t, s + 1)
        } else {
            (t, s)
        }
    });

    if target_hits > source_hits {
        Direction::Reverse
    } else {
        Direction::Forward
    }
}

/// Maps every character of `text` through `mapping`.
///
/// Characters the table does not know pass through unchanged, and logical
/// order is kept even for right-to-left output.
#[must_use]
pub fn convert(text: &str, mapping: &MappingTable, direction: Direction) -> String {
    // Hebrew and Cyrillic are two bytes per char in UTF-8 while the source
    // side is mostly ASCII.
    let mut out = String::with_capacity(text.len().saturating_mul(2));
    let lookup: fn(&MappingTable, char) -> Option<char> = match direction {
        Direction::Forward => MappingTable::forward,
        Direction::Reverse => MappingTable::reverse,
    };
    out.extend(text.chars().map(|ch| lookup(mapping, ch).unwrap_or(ch)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::layouts::{hebrew_english, russian_english};

    fn toy() -> MappingTable {
        MappingTable::from_pairs("toy", [('a', 'ש'), ('b', 'ל'), ('c', 'ו'), ('d', 'ם')])
    }

    #[test]
    fn forward_and_reverse_on_toy_table() {
        assert_eq!(convert("abcd", &toy(), Direction::Forward), "שלום");
        assert_eq!(convert("שלום", &toy(), Direction::Reverse), "abcd");
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(convert("", &toy(), Direction::Forward), "");
        assert_eq!(convert("", &toy(), Direction::Reverse), "");
    }

    #[test]
    fn unmapped_characters_pass_through() {
        let t = toy();
        for ch in ['1', ' ', '!', 'z', 'ש'] {
            let s = ch.to_string();
            assert_eq!(convert(&s, &t, Direction::Forward), s);
        }
    }

    #[test]
    fn hebrew_words() {
        let t = hebrew_english();
        assert_eq!(convert("hello", &t, Direction::Forward), "יקךךם");
        assert_eq!(convert("שלום", &t, Direction::Reverse), "akuo");
        assert_eq!(convert("hello world", &t, Direction::Forward), "יקךךם ׳םרךג");
        assert_eq!(convert("ים׳", &t, Direction::Reverse), "how");
        assert_eq!(convert("q", &t, Direction::Forward), "/");
        assert_eq!(convert("/", &t, Direction::Forward), ".");
    }

    #[test]
    fn digits_survive_hebrew_conversion() {
        let out = convert("hello123", &hebrew_english(), Direction::Forward);
        assert!(out.ends_with("123"));
    }

    #[test]
    fn round_trip_over_mapped_characters() {
        for table in [hebrew_english(), russian_english(), toy()] {
            let sources: String = table.pairs().map(|(s, _)| s).collect();
            let there = convert(&sources, &table, Direction::Forward);
            assert_eq!(convert(&there, &table, Direction::Reverse), sources);
        }
    }

    #[test]
    fn russian_words() {
        let t = russian_english();
        assert_eq!(convert("ghbdtn", &t, Direction::Forward), "привет");
        assert_eq!(convert("Дштгч", &t, Direction::Reverse), "Linux");
    }

    #[test]
    fn detects_target_layout_text() {
        let t = hebrew_english();
        assert_eq!(detect_direction("שלום", &t), Direction::Reverse);
        assert_eq!(detect_direction("hello", &t), Direction::Forward);
        assert_eq!(detect_direction("שלום123abc", &t), Direction::Reverse);
        assert_eq!(detect_direction("hello123ש", &t), Direction::Forward);
        assert_eq!(detect_direction("", &t), Direction::Forward);
    }

    #[test]
    fn policy_forward_ignores_content() {
        let t = hebrew_english();
        assert_eq!(DirectionPolicy::Forward.resolve("שלום", &t), Direction::Forward);
        assert_eq!(DirectionPolicy::Auto.resolve("שלום", &t), Direction::Reverse);
    }
}
