// File: src/text/mapping.rs

use std::collections::HashMap;

/// Bidirectional character table for one language pair.
///
/// The source side is the character the US QWERTY layout produces for a
/// physical key, so the source character doubles as the key identity. The
/// target side is what the other layout produces for the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    name: String,
    forward: HashMap<char, char>,
    reverse: HashMap<char, char>,
    conflicts: Vec<(char, char)>,
}

impl MappingTable {
    /// Builds a table from `(source, target)` pairs.
    ///
    /// A repeated source keeps its first target. When two sources share a
    /// target, the reverse entry goes to the non-uppercase source first, then
    /// to the lowest code point; the losing pair is reported by
    /// [`MappingTable::conflicts`].
    pub fn from_pairs<I>(name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (char, char)>,
    {
        let mut forward = HashMap::new();
        let mut ordered = Vec::new();
        for (src, dst) in pairs {
            if forward.contains_key(&src) {
                continue;
            }
            forward.insert(src, dst);
            ordered.push((src, dst));
        }

        ordered.sort_by_key(|&(src, _)| (src.is_uppercase(), src));

        let mut reverse = HashMap::with_capacity(ordered.len());
        let mut conflicts = Vec::new();
        for (src, dst) in ordered {
            if reverse.contains_key(&dst) {
                conflicts.push((src, dst));
            } else {
                reverse.insert(dst, src);
            }
        }

        Self {
            name: name.into(),
            forward,
            reverse,
            conflicts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of physical keys covered by the table.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    #[must_use]
    pub fn forward(&self, ch: char) -> Option<char> {
        self.forward.get(&ch).copied()
    }

    #[must_use]
    pub fn reverse(&self, ch: char) -> Option<char> {
        self.reverse.get(&ch).copied()
    }

    /// True when every source has exactly one target and vice versa.
    pub fn is_bijective(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Source/target pairs that lost the reverse slot to another source.
    pub fn conflicts(&self) -> &[(char, char)] {
        &self.conflicts
    }

    pub fn contains_source(&self, ch: char) -> bool {
        self.forward.contains_key(&ch)
    }

    pub fn contains_target(&self, ch: char) -> bool {
        self.reverse.contains_key(&ch)
    }

    /// Iterates `(source, target)` pairs in no particular order.
    pub fn pairs(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.forward.iter().map(|(&s, &t)| (s, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_go_both_ways() {
        let t = MappingTable::from_pairs("toy", [('a', 'ש'), ('b', 'ל')]);
        assert_eq!(t.forward('a'), Some('ש'));
        assert_eq!(t.reverse('ל'), Some('b'));
        assert_eq!(t.forward('ש'), None);
        assert_eq!(t.len(), 2);
        assert!(t.is_bijective());
    }

    #[test]
    fn shared_target_prefers_lowercase_source() {
        let t = MappingTable::from_pairs("dup", [('A', 'ש'), ('a', 'ש'), ('s', 'ד')]);
        assert_eq!(t.reverse('ש'), Some('a'));
        assert!(!t.is_bijective());
        assert_eq!(t.conflicts(), &[('A', 'ש')]);
    }

    #[test]
    fn repeated_source_keeps_first_target() {
        let t = MappingTable::from_pairs("rep", [('a', 'x'), ('a', 'y')]);
        assert_eq!(t.forward('a'), Some('x'));
        assert_eq!(t.reverse('y'), None);
        assert!(t.is_bijective());
    }
}
