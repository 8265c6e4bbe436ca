use std::ops::RangeInclusive;

// Character-set constants
pub(crate) const WILDCARD: char = '*';
/// Accepted in place of `*`; older constraint files use regex-style dots.
pub(crate) const WILDCARD_ALIAS: char = '.';
pub(crate) const LINK_TAG_CHARS: RangeInclusive<char> = '0'..='9';
#[cfg(test)]
pub(crate) const UPPERCASE_ALPHABET: RangeInclusive<char> = 'A'..='Z';
#[cfg(test)]
pub(crate) const LOWERCASE_ALPHABET: RangeInclusive<char> = 'a'..='z';

pub(crate) const NUM_LINK_TAGS: usize = 10;

pub(crate) trait ConstraintChar {
    fn is_wildcard(&self) -> bool;
    fn is_link_tag(&self) -> bool;
    fn is_literal(&self) -> bool;
}

impl ConstraintChar for char {
    fn is_wildcard(&self) -> bool {
        *self == WILDCARD || *self == WILDCARD_ALIAS
    }
    fn is_link_tag(&self) -> bool {
        LINK_TAG_CHARS.contains(self)
    }
    fn is_literal(&self) -> bool {
        self.is_ascii_alphabetic()
    }
}

/// True iff `word` is non-empty and made of ASCII letters only.
pub(crate) fn is_letters_only(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_literal())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_wildcard() {
        assert!('*'.is_wildcard());
        assert!('.'.is_wildcard());
        assert!(!'a'.is_wildcard());
        assert!(!'3'.is_wildcard());
        assert!(!'?'.is_wildcard());
    }

    #[test]
    fn test_is_link_tag() {
        for c in LINK_TAG_CHARS {
            assert!(c.is_link_tag());
        }
        assert!(!'a'.is_link_tag());
        assert!(!'*'.is_link_tag());
    }

    #[test]
    fn test_is_literal() {
        for c in UPPERCASE_ALPHABET.chain(LOWERCASE_ALPHABET) {
            assert!(c.is_literal());
            assert!(!c.is_wildcard());
            assert!(!c.is_link_tag());
        }
        assert!(!'é'.is_literal());
        assert!(!'-'.is_literal());
    }

    #[test]
    fn test_is_letters_only() {
        assert!(is_letters_only("Tidal"));
        assert!(!is_letters_only("o'clock"));
        assert!(!is_letters_only("café"));
        assert!(!is_letters_only(""));
    }

    #[test]
    fn test_constants() {
        assert_eq!(LINK_TAG_CHARS.count(), NUM_LINK_TAGS);
        assert!(WILDCARD.is_wildcard());
        assert!(WILDCARD_ALIAS.is_wildcard());
    }
}
