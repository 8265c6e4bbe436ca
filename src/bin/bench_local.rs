//! `bench_local.rs`: quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Ad-hoc timing for a handful of constraint sets on *your* machine.
//! - Loads the word list once, then runs each constraint set several times and reports the
//!   median.
//! - Searches exhaustively unless `-n` is given.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 5`
//! - Parallel search:                `cargo run --bin bench_local --release -- --parallel`
//! - Print a few solutions:          `cargo run --bin bench_local --release -- -p 5`
//!
//! NOTES
//! -----
//! - Filtering and search are timed separately; word-list I/O is not timed per case.
//! - One warm-up run per case is done (not included in timing).
//! - We report the *median* over repeats (more robust than mean for small _N_).

use clap::Parser;
use std::hint::black_box;
use std::time::Instant;
use crossing::cluster::Cluster;
use crossing::solver;
use crossing::word_list::WordList;

#[derive(Parser, Debug)]
#[command(author, version, about = "Time a fixed list of constraint sets against a word list", long_about = None)]
struct Cli {
    /// Path to the word list file
    #[arg(short, long, default_value = "/usr/share/dict/words")]
    words: String,

    /// Minimum score filter for scored lines
    #[arg(short = 'm', long, default_value_t = 0)]
    min_score: i32,

    /// Number of repeats per case (median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 1)]
    num_repeats: usize,

    /// Stop each search after this many solutions
    #[arg(short = 'n', long)]
    num_results: Option<usize>,

    /// Use the parallel search
    #[arg(long)]
    parallel: bool,

    /// Print up to this many solutions per case (0 = print none)
    #[arg(short = 'p', long = "print", default_value_t = 0)]
    print_limit: usize,
}

/// Edit/add new constraint sets here. The summary shows the text as the case name.
fn get_cases() -> Vec<&'static str> {
    vec![
        "T**3*;W3**",
        "1***;2***;1***;2***",
        "C1**;**1T",
        "*1*2*;*3*4*;1*3**;2*4**",
        "L1....2M;N3....4O;D1....3E;F2.C..4G",
    ]
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

const MAX_CASE_LEN: usize = 40;

fn main() -> std::io::Result<()> {
    /// (case, median filter seconds, median search seconds, solutions in last run)
    type SummaryRow = (String, f64, f64, usize);

    crossing::log::init_logger(crossing::log::debug_requested());
    let cli = Cli::parse();

    eprintln!("Loading word list from: {}", cli.words);
    let t_load = Instant::now();
    let word_list = WordList::load_from_path(&cli.words, cli.min_score)?;
    eprintln!("Loaded {} words in {:.3}s", word_list.len(), t_load.elapsed().as_secs_f64());

    let limit = cli.num_results.unwrap_or(usize::MAX);
    let cases = get_cases();
    let mut summary: Vec<SummaryRow> = Vec::with_capacity(cases.len());

    for (idx, case) in cases.iter().enumerate() {
        eprintln!("\n[{:02}] {}", idx + 1, case);

        let cluster = match case.parse::<Cluster>() {
            Ok(cluster) => cluster,
            Err(e) => {
                eprintln!("  ✗ {}", e.display_detailed());
                continue;
            }
        };

        // Warm-up, untimed
        let _warmup = solver::solve_cluster(&cluster, &word_list.entries, limit.min(1));

        let mut filter_times = Vec::with_capacity(cli.num_repeats);
        let mut search_times = Vec::with_capacity(cli.num_repeats);
        let mut last_solutions: Vec<String> = Vec::new();

        for rep in 0..cli.num_repeats {
            let t_filter = Instant::now();
            let candidate_sets = cluster.candidate_sets(black_box(&word_list.entries));
            let filter_secs = t_filter.elapsed().as_secs_f64();

            let t_search = Instant::now();
            let solutions: Vec<_> = if cli.parallel {
                solver::par_search(&candidate_sets, cluster.links()).into_iter().take(limit).collect()
            } else {
                solver::search(&candidate_sets, cluster.links()).take(limit).collect()
            };
            let search_secs = t_search.elapsed().as_secs_f64();

            let _keep = black_box(solutions.len());
            filter_times.push(filter_secs);
            search_times.push(search_secs);

            eprintln!(
                "  run {:>2}/{:>2}: filter {:.3}s, search {:.3}s ({} {})",
                rep + 1,
                cli.num_repeats,
                filter_secs,
                search_secs,
                solutions.len(),
                pluralizer(solutions.len(), "solution".into(), None)
            );

            last_solutions = solutions.iter().map(|s| solver::solution_to_string(s)).collect();
        }

        for line in last_solutions.iter().take(cli.print_limit) {
            println!("{line}");
        }

        summary.push((case.to_string(), median(filter_times), median(search_times), last_solutions.len()));
    }

    eprintln!("\n==== Summary ====");
    eprintln!(
        "{:<MAX_CASE_LEN$} | {:>10} | {:>10} | {:>11}",
        "constraints", "filter (s)", "search (s)", "# solutions"
    );
    eprintln!("{:-<MAX_CASE_LEN$}-+-{:-<10}-+-{:-<10}-+-{:-<11}", "", "", "", "");
    for (case, filter_med, search_med, num_solutions) in &summary {
        let display = if case.len() > MAX_CASE_LEN {
            format!("{}…", case.chars().take(MAX_CASE_LEN - 1).collect::<String>())
        } else {
            case.clone()
        };
        eprintln!("{display:<MAX_CASE_LEN$} | {filter_med:>10.3} | {search_med:>10.3} | {num_solutions:>11}");
    }

    Ok(())
}

fn pluralizer(count: usize, singular: String, plural: Option<String>) -> String {
    if count == 1 {
        singular
    } else {
        plural.unwrap_or_else(|| singular + "s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralizer() {
        assert_eq!(pluralizer(0, "solution".into(), None), "solutions");
        assert_eq!(pluralizer(1, "solution".into(), None), "solution");
        assert_eq!(pluralizer(2, "radius".into(), Some("radii".into())), "radii");
        assert_eq!(pluralizer(1, "radius".into(), Some("radii".into())), "radius");
    }

    #[test]
    fn test_median() {
        assert!(median(vec![]).abs() < f64::EPSILON);
        assert!((median(vec![3.0, 1.0, 2.0]) - 2.0).abs() < f64::EPSILON);
        assert!((median(vec![4.0, 1.0, 2.0, 3.0]) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cases_are_valid_clusters() {
        for case in get_cases() {
            assert!(case.parse::<Cluster>().is_ok(), "{case}");
        }
    }
}
