//! Link tags and the cross-slot equality constraints they induce.
//!
//! A link tag is a digit that marks one crossing square: it must occur in exactly two
//! positions across the whole constraint set, and those two positions must hold the same
//! letter in any solution.

use crate::constraint_char::NUM_LINK_TAGS;
use crate::errors::ConfigurationError;
use log::debug;
use std::collections::BTreeMap;
use std::fmt;

/// Number of occurrences every link tag must have
pub(crate) const OCCURRENCES_PER_TAG: usize = 2;

/// A link tag, `0` through `9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkTag(u8);

impl LinkTag {
    /// Returns `None` unless `digit` is 0-9.
    #[must_use]
    pub fn new(digit: u8) -> Option<Self> {
        (usize::from(digit) < NUM_LINK_TAGS).then_some(Self(digit))
    }

    pub(crate) fn from_char(c: char) -> Option<Self> {
        c.to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .and_then(Self::new)
    }

    #[must_use]
    pub fn digit(self) -> u8 {
        self.0
    }
}

impl fmt::Display for LinkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a tag appears: (slot index, position within the slot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkOccurrence {
    pub slot: usize,
    pub position: usize,
}

impl fmt::Display for LinkOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.slot, self.position)
    }
}

/// `solution[a.slot][a.position] == solution[b.slot][b.position]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkConstraint {
    pub tag: LinkTag,
    pub a: LinkOccurrence,
    pub b: LinkOccurrence,
}

impl LinkConstraint {
    /// Check the constraint against one word per slot.
    ///
    /// Words are ASCII (the candidate filter guarantees it) and already normalized to one
    /// case, so a byte comparison is enough.
    #[inline]
    #[must_use]
    pub fn is_satisfied_by<S: AsRef<str>>(&self, assignment: &[S]) -> bool {
        let a = assignment[self.a.slot].as_ref().as_bytes()[self.a.position];
        let b = assignment[self.b.slot].as_ref().as_bytes()[self.b.position];
        a == b
    }

    /// The later of the two slots; once every slot up to here is chosen the constraint is
    /// decided.
    #[must_use]
    pub fn last_slot(&self) -> usize {
        self.a.slot.max(self.b.slot)
    }
}

impl fmt::Display for LinkConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link {}: {} = {}", self.tag, self.a, self.b)
    }
}

/// A tag with the wrong number of occurrences, reported in [`ConfigurationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagCount {
    pub tag: LinkTag,
    pub count: usize,
}

impl fmt::Display for TagCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (found {})", self.tag, self.count)
    }
}

/// Tag occurrences across every slot of a cluster, ordered by tag.
pub type LinkOccurrences = BTreeMap<LinkTag, Vec<LinkOccurrence>>;

/// Turn every tag's pair of occurrences into a [`LinkConstraint`].
///
/// Tags are processed in ascending order, so both the constraint list and any error are
/// reproducible. Each constraint's `a` is the earlier occurrence (by slot, then position).
///
/// # Errors
///
/// [`ConfigurationError::UnpairedLinkTags`] naming *every* tag whose occurrence count is
/// not exactly two.
pub fn build_links(occurrences: &LinkOccurrences) -> Result<Vec<LinkConstraint>, ConfigurationError> {
    let unpaired: Vec<TagCount> = occurrences
        .iter()
        .filter(|(_, occ)| occ.len() != OCCURRENCES_PER_TAG)
        .map(|(&tag, occ)| TagCount { tag, count: occ.len() })
        .collect();

    if !unpaired.is_empty() {
        return Err(ConfigurationError::UnpairedLinkTags { tags: unpaired });
    }

    let links: Vec<LinkConstraint> = occurrences
        .iter()
        .map(|(&tag, occ)| {
            let (a, b) = if occ[0] <= occ[1] { (occ[0], occ[1]) } else { (occ[1], occ[0]) };
            LinkConstraint { tag, a, b }
        })
        .collect();

    for link in &links {
        debug!("{link}");
    }

    Ok(links)
}
