use crate::candidates::{filter_all, CandidateSet};
use crate::errors::ConfigurationError;
use crate::links::{build_links, LinkConstraint, LinkOccurrences};
use crate::matcher::{compile, CompiledSlot, Matcher};
use std::fmt;
use std::str::FromStr;

/// The character that separates constraints when a cluster is written on one line
pub const CONSTRAINT_SEPARATOR: char = ';';

/// A compiled, validated set of slot constraints: one [`Matcher`] per slot plus the link
/// constraints between them.
///
/// Building a `Cluster` only looks at constraint text. Every [`ConfigurationError`] is
/// raised here, before any word list is read.
///
/// Example:
/// - Input: `"T**3*;W3**"`
/// - Slots: `T**3*` (slot 0) and `W3**` (slot 1)
/// - Links: tag 3 joins (slot 0, position 3) and (slot 1, position 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    slots: Vec<CompiledSlot>,
    links: Vec<LinkConstraint>,
}

impl Cluster {
    /// Compile one constraint per slot and index their link tags.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::NoConstraints`] if `constraints` is empty.
    /// - Any compile error from [`compile`] (first offending slot).
    /// - [`ConfigurationError::UnpairedLinkTags`] from [`build_links`].
    pub fn from_constraints<S: AsRef<str>>(constraints: &[S]) -> Result<Self, ConfigurationError> {
        if constraints.is_empty() {
            return Err(ConfigurationError::NoConstraints);
        }

        let slots = constraints
            .iter()
            .enumerate()
            .map(|(slot, constraint)| compile(slot, constraint.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        // Slots are visited in order, so each tag's occurrences come out sorted
        let mut occurrences = LinkOccurrences::new();
        for (tag, occurrence) in slots.iter().flat_map(CompiledSlot::link_occurrences) {
            occurrences.entry(tag).or_default().push(occurrence);
        }

        let links = build_links(&occurrences)?;

        Ok(Cluster { slots, links })
    }

    /// Read one constraint per line from a file; blank lines are skipped.
    ///
    /// # Errors
    ///
    /// An `io::Error` if the file cannot be read, or `InvalidInput` wrapping the
    /// [`ConfigurationError`] if its contents are not a valid cluster.
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<Cluster> {
        let path_ref = path.as_ref();

        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read constraints from '{}': {}", path_ref.display(), e)
            )
        })?;

        data.parse::<Cluster>()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
    }

    /// Number of slots
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false for a successfully built cluster
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn matchers(&self) -> impl Iterator<Item = &Matcher> {
        self.slots.iter().map(|s| &s.matcher)
    }

    #[must_use]
    pub fn links(&self) -> &[LinkConstraint] {
        &self.links
    }

    /// The normalized constraint text of every slot (upper case, `*` wildcards)
    #[must_use]
    pub fn constraints(&self) -> Vec<String> {
        self.matchers().map(ToString::to_string).collect()
    }

    /// Run the candidate filter for every slot against a raw word list.
    #[must_use]
    pub fn candidate_sets<S: AsRef<str>>(&self, words: &[S]) -> Vec<CandidateSet> {
        let matchers: Vec<Matcher> = self.matchers().cloned().collect();
        filter_all(words, &matchers)
    }
}

impl FromStr for Cluster {
    type Err = ConfigurationError;

    /// Parse constraints separated by `;` and/or newlines. Surrounding whitespace and blank
    /// fragments are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let constraints: Vec<&str> = s
            .split(|c: char| c == CONSTRAINT_SEPARATOR || c == '\n')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect();

        Cluster::from_constraints(constraints.as_slice())
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.slots {
            writeln!(f, "slot {}: {}", s.slot, s.matcher)?;
        }
        for link in &self.links {
            writeln!(f, "{link}")?;
        }
        Ok(())
    }
}
