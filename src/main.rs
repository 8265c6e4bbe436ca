use std::process::ExitCode;
use clap::Parser;
use std::time::Instant;

use crossing::cluster::Cluster;
use crossing::errors::ConfigurationError;
use crossing::solver;
use crossing::word_list::WordList;

/// Find every way to fill a cluster of crossing slots from a word list
#[derive(Parser, Debug)]
#[command(
    author,
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about,
    long_about = None
)]
struct Cli {
    /// File with one slot constraint per line (e.g. "L1....2M")
    #[arg(short, long, default_value = "./constraints.puz")]
    constraints: String,

    /// Constraints given inline instead, separated by ';' (e.g. "T**3*;W3**")
    #[arg(short, long)]
    inline: Option<String>,

    /// Path to the word list (one word per line, or word;score)
    #[arg(short, long, default_value = "/usr/share/dict/words")]
    words: String,

    /// Minimum score for scored word-list lines
    #[arg(short = 'm', long, default_value_t = 0)]
    min_score: i32,

    /// Stop after this many solutions
    #[arg(short = 'n', long)]
    num_results: Option<usize>,

    /// Search slot 0's candidates on all cores (same output order). Every solution is
    /// found before printing, so -n only limits the output, not the work
    #[arg(long)]
    parallel: bool,
}

/// Entry point of the `crossing` CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    crossing::log::init_logger(crossing::log::debug_requested());

    log::info!("Starting crossing solver");

    if let Err(e) = try_main() {
        match configuration_error(&*e) {
            Some(config_err) => eprintln!("Error: {}", config_err.display_detailed()),
            None => eprintln!("Error: {e}"),
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Find a `ConfigurationError` either directly or inside the `io::Error` a file loader
/// wrapped it in
fn configuration_error<'a>(e: &'a (dyn std::error::Error + 'static)) -> Option<&'a ConfigurationError> {
    e.downcast_ref::<ConfigurationError>().or_else(|| {
        e.downcast_ref::<std::io::Error>()
            .and_then(std::io::Error::get_ref)
            .and_then(|inner| inner.downcast_ref::<ConfigurationError>())
    })
}

/// Core application logic.
///
/// Steps:
/// 1. Build the cluster (inline or from file); configuration errors surface here, before
///    the word list is read.
/// 2. Load the word list.
/// 3. Filter and search, printing each solution on stdout.
/// 4. Print counts and timings on stderr.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let cluster = match &cli.inline {
        Some(inline) => inline.parse::<Cluster>()?,
        None => Cluster::load_from_path(&cli.constraints)?,
    };
    log::debug!("{cluster}");

    let t_load = Instant::now();
    let word_list = WordList::load_from_path(&cli.words, cli.min_score)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    let t_filter = Instant::now();
    let candidate_sets = cluster.candidate_sets(&word_list.entries);
    let filter_secs = t_filter.elapsed().as_secs_f64();

    let limit = cli.num_results.unwrap_or(usize::MAX);
    let t_solve = Instant::now();
    let mut num_found = 0;

    if cli.parallel {
        for (k, solution) in solver::par_search(&candidate_sets, cluster.links())
            .iter()
            .take(limit)
            .enumerate()
        {
            println!("Solution #{:2}: {}", k + 1, solver::solution_to_string(solution));
            num_found += 1;
        }
    } else {
        for (k, solution) in solver::search(&candidate_sets, cluster.links()).take(limit).enumerate() {
            println!("Solution #{:2}: {}", k + 1, solver::solution_to_string(&solution));
            num_found += 1;
        }
    }
    let solve_secs = t_solve.elapsed().as_secs_f64();

    let counts: Vec<String> = candidate_sets.iter().map(|c| c.len().to_string()).collect();
    eprintln!(
        "Loaded {} words in {:.3}s; candidates per slot [{}] in {:.3}s; searched in {:.3}s ({} solutions).",
        word_list.len(),
        load_secs,
        counts.join(", "),
        filter_secs,
        solve_secs,
        num_found
    );

    if num_found == limit {
        eprintln!("✓ Stopped after finding {num_found}/{limit} requested solutions");
    }

    Ok(())
}
