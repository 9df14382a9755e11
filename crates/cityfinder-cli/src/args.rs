use clap::{ArgAction, Parser, Subcommand};

/// CLI arguments for cityfinder
#[derive(Debug, Parser)]
#[command(
    name = "cityfinder",
    version,
    about = "Prefix search over a gazetteer of cities"
)]
pub struct CliArgs {
    /// Dataset to load: .json, .json.gz, .bin or .bin.gz (default: bundled cities_sorted.json)
    #[arg(short = 'i', long = "input", env = "CITYFINDER_DATA", global = true)]
    pub input: Option<String>,

    /// Key folding: `lowercase` (default) or `ascii` to also ignore accents
    #[arg(long = "fold", env = "CITYFINDER_FOLDING", global = true)]
    pub fold: Option<String>,

    /// Print JSON instead of plain lines
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the loaded catalog
    Stats,

    /// List every city in dataset order
    All {
        /// Show at most N cities
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Group under a letter header per initial
        #[arg(short = 'g', long)]
        grouped: bool,
    },

    /// Find cities whose name starts with a prefix
    Search {
        /// Prefix to search (case-insensitive); blank lists everything
        prefix: String,

        /// Show at most N cities
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Group under a letter header per initial
        #[arg(short = 'g', long)]
        grouped: bool,

        /// Re-sort matches by name, then country code
        #[arg(short = 's', long)]
        sorted: bool,
    },

    /// Convert the input JSON dataset into the binary format
    Build {
        /// Output path; a `.gz` suffix enables gzip
        output: String,

        /// Never gzip, whatever the suffix
        #[arg(long)]
        no_compress: bool,
    },
}
