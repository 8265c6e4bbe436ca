//! Load the raw dictionary that candidate filtering runs against.
//!
//! Two line formats are accepted, and may be mixed:
//! - a bare word per line (`/usr/share/dict/words` style), always kept;
//! - `word;score` (scored crossword lists), kept only when `score` parses as an integer
//!   that is at least `min_score`.
//!
//! Unlike a typical entry-list loader, this module does **not** sort, deduplicate or re-case
//! anything: solution order is defined by word-list order, and cleaning (letters only, one
//! case) is the candidate filter's job.

/// A raw word list, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    /// Entries exactly as they appear in the source (trimmed, score removed).
    pub entries: Vec<String>,
}

impl WordList {
    /// Parse a word list from an in-memory string.
    ///
    /// # Behavior:
    /// 1. Splits the input into lines and trims each one.
    /// 2. Skips empty lines.
    /// 3. For `word;score` lines, parses the score and drops the line if it is malformed or
    ///    below `min_score`.
    /// 4. Keeps everything else, in order.
    #[must_use]
    pub fn parse_from_str(contents: &str, min_score: i32) -> WordList {
        let entries = contents
            .lines()
            .filter_map(|raw_line| {
                let line = raw_line.trim();

                if line.is_empty() {
                    None
                // Split on the first ';' only
                } else if let Some((entry_raw, score_raw)) = line.split_once(';') {
                    let score: i32 = score_raw.trim().parse().ok()?;
                    (score >= min_score).then(|| entry_raw.trim().to_string())
                } else {
                    Some(line.to_string())
                }
            })
            .collect();

        WordList { entries }
    }

    /// Read a word list from disk and parse it.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if unable to read a file at `path`.
    pub fn load_from_path<P: AsRef<std::path::Path>>(
        path: P,
        min_score: i32,
    ) -> std::io::Result<WordList> {
        let path_ref = path.as_ref();

        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read word list from '{}': {}", path_ref.display(), e)
            )
        })?;

        Ok(Self::parse_from_str(&data, min_score))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_plain_words_in_order() {
        let word_list = WordList::parse_from_str("wave\ntidal\nTOTAL\nwhen", 0);
        assert_eq!(word_list.entries, vec!["wave", "tidal", "TOTAL", "when"]);
    }

    #[test]
    fn test_parse_keeps_duplicates_and_punctuation() {
        // cleaning happens later, in the candidate filter
        let word_list = WordList::parse_from_str("cat\no'clock\ncat", 0);
        assert_eq!(word_list.entries, vec!["cat", "o'clock", "cat"]);
    }

    #[test]
    fn test_parse_filters_low_scores() {
        let word_list = WordList::parse_from_str("apple;100\nbanana;20\ncherry;80", 50);
        assert_eq!(word_list.entries, vec!["apple", "cherry"]);
    }

    #[test]
    fn test_parse_mixed_formats() {
        let word_list = WordList::parse_from_str("tidal;60\nwave\nwhen;10", 50);
        assert_eq!(word_list.entries, vec!["tidal", "wave"]);
    }

    #[test]
    fn test_parse_skips_malformed_scores_and_blank_lines() {
        let word_list = WordList::parse_from_str("cat;50\n\n  \napple;bad_score\n dog ; 60 ", 45);
        assert_eq!(word_list.entries, vec!["cat", "dog"]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(WordList::parse_from_str("", 0).is_empty());
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tidal\nwave;70").unwrap();
        let word_list = WordList::load_from_path(file.path(), 50).unwrap();
        assert_eq!(word_list.entries, vec!["tidal", "wave"]);
        assert_eq!(word_list.len(), 2);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = WordList::load_from_path("/nonexistent/words.txt", 0).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/words.txt"));
    }
}
