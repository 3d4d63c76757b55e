//! Application related stuff

use clap::Parser;

lazy_static! {
    /// The global application options.
    pub static ref OPTIONS: Options = Options::parse();
}

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// Number of worker threads used for photon walks.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 1,
        help = "Use specified number of threads for photon transport."
    )]
    n_threads: usize,

    /// Overrides the seed in the field description.
    #[arg(
        long,
        value_name = "SEED",
        help = "Seed for the per-worker random number streams."
    )]
    pub seed: Option<u64>,

    /// Overrides the photon budget in the field description.
    #[arg(long, value_name = "NUM", help = "Number of photon walks per field.")]
    pub hops: Option<u64>,

    /// Accumulate into one shared grid with atomic adds.
    #[arg(
        long,
        help = "Accumulate into a single shared grid instead of one grid per thread."
    )]
    pub atomic: bool,

    /// Output directory for field files.
    #[arg(
        long = "outdir",
        short = 'o',
        value_name = "DIR",
        help = "Write computed fields to the given directory."
    )]
    pub out_dir: Option<String>,

    /// Suppress all text output other than error messages.
    #[arg(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,

    /// Field description file paths.
    #[arg(required = true, help = "Field description files")]
    pub paths: Vec<String>,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        clamp_threads(self.n_threads)
    }
}

/// Clamps a requested thread count to [1, logical CPUs].
///
/// * `n_threads` - Requested number of threads.
pub fn clamp_threads(n_threads: usize) -> usize {
    let max_threads = num_cpus::get();
    match n_threads {
        0 => {
            warn!("Invalid nthreads");
            1
        }
        n if n > max_threads => {
            warn!("Num threads > max logical CPUs {}", max_threads);
            max_threads
        }
        n => n,
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
