//! Compiles one constraint string into a position-by-position [`Matcher`].
//!
//! A constraint has one symbol per square of its slot:
//!
//! | symbol      | rule                    | accepts                         |
//! |-------------|-------------------------|---------------------------------|
//! | `a-z`/`A-Z` | [`Rule::Literal`]       | that letter, any case           |
//! | `*` or `.`  | [`Rule::Wildcard`]      | any letter                      |
//! | `0-9`       | [`Rule::Linked`]        | any letter; the position is indexed under its tag |
//!
//! Compilation happens once per constraint. Matching a word is then a single pass over its
//! bytes with no text substitution.

use crate::constraint_char::{ConstraintChar, WILDCARD};
use crate::errors::ConfigurationError;
use crate::links::{LinkOccurrence, LinkTag};
use nom::{
    branch::alt,
    character::complete::satisfy,
    combinator::{map, map_opt},
    IResult,
    Parser,
};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Parser result type over constraint text
type PResult<'a, O> = IResult<&'a str, O>;

/// The rule for one square of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Literal(char),   // upper-case letter
    Wildcard,        // '*' or '.'
    Linked(LinkTag), // '0'..='9'
}

impl Rule {
    /// Does this rule accept `letter` (an ASCII byte from a candidate word)?
    #[inline]
    pub(crate) fn accepts(self, letter: u8) -> bool {
        match self {
            Rule::Literal(c) => letter.eq_ignore_ascii_case(&(c as u8)),
            Rule::Wildcard | Rule::Linked(_) => letter.is_ascii_alphabetic(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Literal(c) => write!(f, "{c}"),
            Rule::Wildcard => write!(f, "{WILDCARD}"),
            Rule::Linked(tag) => write!(f, "{tag}"),
        }
    }
}

/// Compiled form of a constraint: one [`Rule`] per square, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    rules: Vec<Rule>,
}

impl Matcher {
    /// Number of squares in the slot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// True iff `word` has exactly one ASCII letter per square and every literal square
    /// holds its letter (case-insensitively).
    #[must_use]
    pub fn matches(&self, word: &str) -> bool {
        let bytes = word.as_bytes();
        bytes.len() == self.rules.len()
            && self.rules.iter().zip(bytes).all(|(rule, &b)| rule.accepts(b))
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}

/// A compiled slot: its matcher plus the positions of every link tag it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSlot {
    pub slot: usize,
    pub matcher: Matcher,
    /// tag -> positions within this slot, ascending
    pub occurrences: BTreeMap<LinkTag, Vec<usize>>,
}

impl CompiledSlot {
    /// Every tag occurrence of this slot as a `(tag, (slot, position))` pair.
    pub fn link_occurrences(&self) -> impl Iterator<Item = (LinkTag, LinkOccurrence)> + '_ {
        self.occurrences.iter().flat_map(move |(&tag, positions)| {
            positions
                .iter()
                .map(move |&position| (tag, LinkOccurrence { slot: self.slot, position }))
        })
    }
}

// === Token parsers ===

fn literal(input: &str) -> PResult<'_, Rule> {
    map(satisfy(|c: char| c.is_literal()), |c| {
        Rule::Literal(c.to_ascii_uppercase())
    })
    .parse(input)
}

fn wildcard(input: &str) -> PResult<'_, Rule> {
    map(satisfy(|c: char| c.is_wildcard()), |_| Rule::Wildcard).parse(input)
}

fn link_tag(input: &str) -> PResult<'_, Rule> {
    map_opt(satisfy(|c: char| c.is_link_tag()), |c| {
        LinkTag::from_char(c).map(Rule::Linked)
    })
    .parse(input)
}

/// Parse exactly one constraint symbol
fn constraint_symbol(input: &str) -> PResult<'_, Rule> {
    alt((literal, wildcard, link_tag)).parse(input)
}

/// Compile the constraint for slot `slot`.
///
/// # Errors
///
/// - [`ConfigurationError::EmptyConstraint`] if `constraint` is empty.
/// - [`ConfigurationError::InvalidCharacter`] for the first character outside the
///   constraint alphabet (letters, `*`, `.`, `0-9`).
pub fn compile(slot: usize, constraint: &str) -> Result<CompiledSlot, ConfigurationError> {
    if constraint.is_empty() {
        return Err(ConfigurationError::EmptyConstraint { slot });
    }

    let mut rest = constraint;
    let mut rules = Vec::with_capacity(constraint.len());
    let mut occurrences: BTreeMap<LinkTag, Vec<usize>> = BTreeMap::new();

    while !rest.is_empty() {
        // every symbol is one character, so the rule count is the position
        let position = rules.len();
        match constraint_symbol(rest) {
            Ok((next, rule)) => {
                if let Rule::Linked(tag) = rule {
                    occurrences.entry(tag).or_default().push(position);
                }
                rules.push(rule);
                rest = next;
            }
            Err(_) => {
                return Err(ConfigurationError::InvalidCharacter {
                    slot,
                    position,
                    invalid_char: rest.chars().next().unwrap_or('?'),
                });
            }
        }
    }

    Ok(CompiledSlot { slot, matcher: Matcher { rules }, occurrences })
}

impl FromStr for Matcher {
    type Err = ConfigurationError;

    /// Compile a standalone constraint (reported as slot 0 on error).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        compile(0, s).map(|compiled| compiled.matcher)
    }
}
