//! The joint-solution search.
//!
//! Given one [`CandidateSet`] per slot and the cluster's [`LinkConstraint`]s, the search
//! enumerates the Cartesian product of the candidate sets in slot order (slot 0 outermost,
//! last slot innermost) and yields the tuples that satisfy every link.
//!
//! # Examples
//!
//! ## One-shot
//!
//! ```
//! use crossing::solver;
//!
//! let words = vec!["tidal", "wave", "total", "when"];
//! let result = solver::solve(&["T**3*", "W3**"], &words, 10)?;
//!
//! assert_eq!(result.solutions, vec![vec!["TIDAL", "WAVE"]]);
//! # Ok::<(), crossing::errors::ConfigurationError>(())
//! ```
//!
//! ## Lazily, stopping whenever the caller likes
//!
//! ```
//! use crossing::cluster::Cluster;
//! use crossing::solver;
//!
//! let cluster: Cluster = "T**3*;W3**".parse()?;
//! let candidates = cluster.candidate_sets(&["tidal", "wave", "total", "when"]);
//!
//! for (k, solution) in solver::search(&candidates, cluster.links()).take(5).enumerate() {
//!     println!("Solution #{}: {}", k + 1, solver::solution_to_string(&solution));
//! }
//! # Ok::<(), crossing::errors::ConfigurationError>(())
//! ```

use crate::candidates::CandidateSet;
use crate::cluster::Cluster;
use crate::errors::ConfigurationError;
use crate::links::{LinkConstraint, LinkOccurrence};
use log::{debug, info};
use rayon::prelude::*;
use std::iter::FusedIterator;

/// Separator used when displaying a solution
const SOLUTION_SEPARATOR: &str = " • ";

/// One word per slot, in slot order, borrowed from the candidate sets.
pub type Solution<'a> = Vec<&'a str>;

/// Status of a [`solve`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// The whole product was examined without reaching the requested number.
    ProductExhausted,

    /// Stopped early because the requested number of solutions was found.
    FoundEnough,
}

/// Outcome of a [`solve`] run.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Solutions in emission order, one word per slot.
    pub solutions: Vec<Vec<String>>,
    pub status: SolveStatus,
    /// Size of each slot's candidate set
    pub candidate_counts: Vec<usize>,
}

impl SolveResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}

impl IntoIterator for SolveResult {
    type Item = Vec<String>;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.into_iter()
    }
}

/// Lazy iterator over the solutions of a cluster.
///
/// Internally an odometer: `indices[i]` picks the current word of slot `i`, and the last
/// slot turns fastest. Links are grouped by the later of their two slots, so when a tuple
/// breaks a link decided at slot `d` every tuple sharing slots `0..=d` is skipped at once
/// by advancing the odometer at `d`. The emitted sequence is exactly what testing every
/// tuple of the product in order would give.
///
/// Nothing is computed ahead of the consumer: dropping the iterator (or `take(n)`) is the
/// only cancellation mechanism, and it costs nothing.
#[derive(Debug, Clone)]
pub struct Solutions<'a> {
    columns: Vec<&'a [String]>,
    /// links whose later slot is `d`, in link-list order
    checks_by_depth: Vec<Vec<&'a LinkConstraint>>,
    indices: Vec<usize>,
    exhausted: bool,
}

impl<'a> Solutions<'a> {
    fn over(columns: Vec<&'a [String]>, links: &'a [LinkConstraint]) -> Self {
        let mut checks_by_depth = vec![Vec::new(); columns.len()];
        for link in links {
            checks_by_depth[link.last_slot()].push(link);
        }

        Solutions {
            exhausted: columns.iter().any(|column| column.is_empty()),
            indices: vec![0; columns.len()],
            columns,
            checks_by_depth,
        }
    }

    #[inline]
    fn letter(&self, occurrence: LinkOccurrence) -> u8 {
        self.columns[occurrence.slot][self.indices[occurrence.slot]].as_bytes()[occurrence.position]
    }

    /// The shallowest slot at which the current tuple breaks a link, if any
    fn first_failing_depth(&self) -> Option<usize> {
        self.checks_by_depth.iter().enumerate().find_map(|(depth, checks)| {
            checks
                .iter()
                .any(|link| self.letter(link.a) != self.letter(link.b))
                .then_some(depth)
        })
    }

    /// Move to the next tuple whose prefix `0..=depth` differs from the current one.
    /// Returns false when the product is used up.
    fn advance(&mut self, depth: usize) -> bool {
        self.indices[depth + 1..].fill(0);
        for slot in (0..=depth).rev() {
            self.indices[slot] += 1;
            if self.indices[slot] < self.columns[slot].len() {
                return true;
            }
            self.indices[slot] = 0;
        }
        false
    }

    fn current(&self) -> Solution<'a> {
        self.columns
            .iter()
            .zip(&self.indices)
            .map(|(&column, &i)| column[i].as_str())
            .collect()
    }
}

impl<'a> Iterator for Solutions<'a> {
    type Item = Solution<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted {
            match self.first_failing_depth() {
                Some(depth) => self.exhausted = !self.advance(depth),
                None => {
                    let solution = self.current();
                    self.exhausted = match self.indices.len().checked_sub(1) {
                        Some(last) => !self.advance(last),
                        // the product of no sets is one empty tuple
                        None => true,
                    };
                    return Some(solution);
                }
            }
        }
        None
    }
}

impl FusedIterator for Solutions<'_> {}

/// Lazily enumerate the solutions of `candidate_sets` under `links`.
///
/// Re-invoking with the same inputs yields the same sequence; no state is carried between
/// calls.
///
/// # Panics
///
/// If a link refers to a slot or position that the candidate sets do not have. A
/// [`Cluster`] and the candidate sets built from it never do.
#[must_use]
pub fn search<'a>(candidate_sets: &'a [CandidateSet], links: &'a [LinkConstraint]) -> Solutions<'a> {
    Solutions::over(candidate_sets.iter().map(CandidateSet::words).collect(), links)
}

/// Eager parallel search.
///
/// Slot 0's candidates are split into one contiguous range per worker thread; each worker
/// runs its own [`Solutions`] over its sub-product. Ranges are concatenated in order, so
/// the result equals `search(..).collect()`.
#[must_use]
pub fn par_search<'a>(candidate_sets: &'a [CandidateSet], links: &'a [LinkConstraint]) -> Vec<Solution<'a>> {
    let Some((first, rest)) = candidate_sets.split_first() else {
        return search(candidate_sets, links).collect();
    };

    let chunk_size = first.len().div_ceil(rayon::current_num_threads()).max(1);
    debug!("par_search: {} workers over ranges of {chunk_size}", rayon::current_num_threads());

    first
        .words()
        .par_chunks(chunk_size)
        .map(|chunk| {
            let columns = std::iter::once(chunk)
                .chain(rest.iter().map(CandidateSet::words))
                .collect();
            Solutions::over(columns, links).collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// Number of tuples in the product of `candidate_sets`, or `None` on overflow.
#[must_use]
pub fn product_size(candidate_sets: &[CandidateSet]) -> Option<usize> {
    candidate_sets
        .iter()
        .try_fold(1usize, |acc, set| acc.checked_mul(set.len()))
}

/// Display a solution as upper-case words separated with a bullet
#[must_use]
pub fn solution_to_string<S: AsRef<str>>(solution: &[S]) -> String {
    solution
        .iter()
        .map(|w| w.as_ref().to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join(SOLUTION_SEPARATOR)
}

/// Compile `constraints`, filter `words`, and collect up to `num_results_requested`
/// solutions.
///
/// The constraint set is fully validated before `words` is touched. Use `usize::MAX` to
/// search exhaustively.
///
/// # Errors
///
/// Any [`ConfigurationError`] from building the [`Cluster`].
pub fn solve<S: AsRef<str>, W: AsRef<str>>(
    constraints: &[S],
    words: &[W],
    num_results_requested: usize,
) -> Result<SolveResult, ConfigurationError> {
    let cluster = Cluster::from_constraints(constraints)?;
    Ok(solve_cluster(&cluster, words, num_results_requested))
}

/// [`solve`] for an already-built [`Cluster`].
#[must_use]
pub fn solve_cluster<W: AsRef<str>>(
    cluster: &Cluster,
    words: &[W],
    num_results_requested: usize,
) -> SolveResult {
    debug!("{cluster}");

    let candidate_sets = cluster.candidate_sets(words);
    let candidate_counts: Vec<usize> = candidate_sets.iter().map(CandidateSet::len).collect();
    match product_size(&candidate_sets) {
        Some(n) => info!("Searching {n} candidate tuples ({candidate_counts:?} per slot)"),
        None => info!("Searching more than {} candidate tuples ({candidate_counts:?} per slot)", usize::MAX),
    }

    let solutions: Vec<Vec<String>> = search(&candidate_sets, cluster.links())
        .take(num_results_requested)
        .map(|solution| solution.into_iter().map(str::to_string).collect())
        .collect();

    debug_assert!(
        solutions.iter().all(|s| cluster.links().iter().all(|link| link.is_satisfied_by(s))),
        "every solution must satisfy every link"
    );

    let status = if solutions.len() >= num_results_requested {
        SolveStatus::FoundEnough
    } else {
        SolveStatus::ProductExhausted
    };

    SolveResult { solutions, status, candidate_counts }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(constraints: &str, words: &[&str]) -> (Cluster, Vec<CandidateSet>) {
        let cluster: Cluster = constraints.parse().unwrap();
        let candidate_sets = cluster.candidate_sets(words);
        (cluster, candidate_sets)
    }

    /// Plain generate-and-test over the whole product, for comparison
    fn brute_force<'a>(candidate_sets: &'a [CandidateSet], links: &[LinkConstraint]) -> Vec<Solution<'a>> {
        let mut tuples: Vec<Solution<'a>> = vec![Vec::new()];
        for set in candidate_sets {
            tuples = tuples
                .into_iter()
                .flat_map(|prefix| {
                    set.iter().map(move |w| {
                        let mut t = prefix.clone();
                        t.push(w.as_str());
                        t
                    })
                })
                .collect();
        }
        tuples
            .into_iter()
            .filter(|t| links.iter().all(|link| link.is_satisfied_by(t)))
            .collect()
    }

    #[test]
    fn test_tidal_wave() {
        let (cluster, sets) = setup("T**3*;W3**", &["TIDAL", "WAVE", "TOTAL", "WHEN"]);
        let solutions: Vec<_> = search(&sets, cluster.links()).collect();
        assert_eq!(solutions, vec![vec!["TIDAL", "WAVE"]]);
    }

    #[test]
    fn test_no_solution() {
        let (cluster, sets) = setup("T**3*;W3**", &["TOTAL", "WHEN"]);
        assert_eq!(search(&sets, cluster.links()).count(), 0);
    }

    #[test]
    fn test_unlinked_slots_give_full_product_in_odometer_order() {
        let (cluster, sets) = setup("A*;B*", &["ax", "ay", "bx", "by", "bz"]);
        let solutions: Vec<_> = search(&sets, cluster.links()).collect();
        assert_eq!(
            solutions,
            vec![
                vec!["AX", "BX"], vec!["AX", "BY"], vec!["AX", "BZ"],
                vec!["AY", "BX"], vec!["AY", "BY"], vec!["AY", "BZ"],
            ]
        );
        assert_eq!(Some(solutions.len()), product_size(&sets));
    }

    #[test]
    fn test_pruning_matches_generate_and_test() {
        let words = [
            "lukewarm", "lunatics", "lifeworm", "neutrino", "nitrogen", "nautilio",
            "dungaree", "drainage", "dialogue", "fracking", "flocking", "fiancing",
        ];
        let (cluster, sets) = setup("L1....2M;N3....4O;D1....3E;F2.C..4G", &words);
        let expected = brute_force(&sets, cluster.links());
        let actual: Vec<_> = search(&sets, cluster.links()).collect();
        assert_eq!(actual, expected);
        assert!(actual.contains(&vec!["LUKEWARM", "NEUTRINO", "DUNGAREE", "FRACKING"]));
    }

    #[test]
    fn test_links_across_non_adjacent_slots() {
        let words = ["abc", "abd", "xyz", "bca", "dca"];
        let (cluster, sets) = setup("1**;***;*1*", &words);
        let expected = brute_force(&sets, cluster.links());
        let actual: Vec<_> = search(&sets, cluster.links()).collect();
        assert_eq!(actual, expected);
        assert!(actual.iter().all(|s| s[0].as_bytes()[0] == s[2].as_bytes()[1]));
    }

    #[test]
    fn test_search_is_restartable() {
        let (cluster, sets) = setup("A1*;1**", &["abc", "acd", "bad", "cat", "cub"]);
        let first: Vec<_> = search(&sets, cluster.links()).collect();
        let second: Vec<_> = search(&sets, cluster.links()).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![vec!["ABC", "BAD"], vec!["ACD", "CAT"], vec!["ACD", "CUB"]]);
    }

    #[test]
    fn test_early_abandonment() {
        let (cluster, sets) = setup("***;***", &["abc", "def", "ghi"]);
        let mut solutions = search(&sets, cluster.links());
        assert_eq!(solutions.next(), Some(vec!["ABC", "ABC"]));
        assert_eq!(solutions.next(), Some(vec!["ABC", "DEF"]));
        drop(solutions);
        assert_eq!(search(&sets, cluster.links()).take(4).count(), 4);
    }

    #[test]
    fn test_fused_after_exhaustion() {
        let (cluster, sets) = setup("T**3*;W3**", &["TIDAL", "WAVE"]);
        let mut solutions = search(&sets, cluster.links());
        assert!(solutions.next().is_some());
        assert!(solutions.next().is_none());
        assert!(solutions.next().is_none());
    }

    #[test]
    fn test_empty_candidate_set_yields_nothing() {
        let (cluster, sets) = setup("T**3*;W3**;Q*", &["TIDAL", "WAVE"]);
        assert!(sets[2].is_empty());
        assert_eq!(search(&sets, cluster.links()).count(), 0);
        assert!(par_search(&sets, cluster.links()).is_empty());
    }

    #[test]
    fn test_zero_slots_yield_one_empty_solution() {
        let solutions: Vec<_> = search(&[], &[]).collect();
        assert_eq!(solutions, vec![Vec::<&str>::new()]);
        assert_eq!(product_size(&[]), Some(1));
    }

    #[test]
    fn test_tag_within_one_slot() {
        let (cluster, sets) = setup("1**1", &["that", "this", "tent", "noon", "abcd"]);
        let solutions: Vec<_> = search(&sets, cluster.links()).collect();
        assert_eq!(solutions, vec![vec!["THAT"], vec!["TENT"], vec!["NOON"]]);
    }

    #[test]
    fn test_par_search_preserves_order() {
        let words: Vec<String> = (b'a'..=b'z')
            .flat_map(|x| (b'a'..=b'e').map(move |y| format!("{}{}", x as char, y as char)))
            .collect();
        let (cluster, sets) = setup("*1;1*;**", &words.iter().map(String::as_str).collect::<Vec<_>>());
        let sequential: Vec<_> = search(&sets, cluster.links()).collect();
        let parallel = par_search(&sets, cluster.links());
        assert!(!sequential.is_empty());
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_solve_status() {
        let words = ["abc", "abd", "abe"];
        let result = solve(&["AB*"], &words, 2).unwrap();
        assert_eq!(result.status, SolveStatus::FoundEnough);
        assert_eq!(result.len(), 2);

        let result = solve(&["AB*"], &words, 10).unwrap();
        assert_eq!(result.status, SolveStatus::ProductExhausted);
        assert_eq!(result.candidate_counts, vec![3]);
        assert_eq!(
            result.into_iter().collect::<Vec<_>>(),
            vec![vec!["ABC"], vec!["ABD"], vec!["ABE"]]
        );
    }

    #[test]
    fn test_solve_reports_configuration_errors() {
        let words = ["abc"];
        assert!(matches!(
            solve(&["A1B", "C2D"], &words, 10),
            Err(ConfigurationError::UnpairedLinkTags { .. })
        ));
        let none: [&str; 0] = [];
        assert_eq!(solve(&none, &words, 10).unwrap_err(), ConfigurationError::NoConstraints);
    }

    #[test]
    fn test_solution_to_string() {
        assert_eq!(solution_to_string(&["tidal", "WAVE"]), "TIDAL • WAVE");
        assert_eq!(solution_to_string::<&str>(&[]), "");
    }
}
