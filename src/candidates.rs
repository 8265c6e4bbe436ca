//! Per-slot candidate filtering.
//!
//! The raw dictionary is cleaned once (letters only, upper case), then every slot's
//! [`Matcher`] is run over the cleaned list independently. No cross-slot pruning happens
//! here; the link constraints are left entirely to the search.

use crate::constraint_char::is_letters_only;
use crate::matcher::Matcher;
use log::debug;
use rayon::prelude::*;

/// The words accepted by one slot, upper-cased, in word-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    words: Vec<String>,
}

impl CandidateSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.words.iter()
    }
}

/// Dictionary-cleaning pass: drop every entry that is not made of ASCII letters only and
/// upper-case the rest. Order (and duplicates) are preserved.
#[must_use]
pub fn clean_words<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    words
        .iter()
        .map(AsRef::as_ref)
        .filter(|w| is_letters_only(w))
        .map(str::to_ascii_uppercase)
        .collect()
}

/// Keep the words `matcher` accepts, upper-cased, in input order.
///
/// Entries containing anything but ASCII letters are never accepted, so this is safe to
/// call on an uncleaned list. Filtering a `CandidateSet`'s own words again with the same
/// matcher returns the same set.
#[must_use]
pub fn filter<S: AsRef<str>>(words: &[S], matcher: &Matcher) -> CandidateSet {
    let words = words
        .iter()
        .map(AsRef::as_ref)
        .filter(|w| matcher.matches(w))
        .map(str::to_ascii_uppercase)
        .collect();

    CandidateSet { words }
}

/// Clean `words` once, then filter it against every matcher (in parallel).
///
/// The result has one `CandidateSet` per matcher, in matcher (slot) order.
#[must_use]
pub fn filter_all<S: AsRef<str>>(words: &[S], matchers: &[Matcher]) -> Vec<CandidateSet> {
    let cleaned = clean_words(words);
    debug!("{} of {} words survive cleaning", cleaned.len(), words.len());

    let candidate_sets: Vec<CandidateSet> = matchers
        .par_iter()
        .map(|matcher| filter(cleaned.as_slice(), matcher))
        .collect();

    for (slot, (matcher, candidates)) in matchers.iter().zip(&candidate_sets).enumerate() {
        debug!("slot {slot} ({matcher}): {} candidates", candidates.len());
    }

    candidate_sets
}
