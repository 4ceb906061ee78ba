use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lookalike", about = "Find catalog products that look like a query image")]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Data directory (overrides LOOKALIKE_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Index source: json, records or sqlite (overrides LOOKALIKE_SOURCE)
    #[arg(long, global = true)]
    pub source: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank the catalog against a query
    #[command(group(ArgGroup::new("query").required(true).args(["vector", "image"])))]
    Search {
        /// Query feature vector as a JSON array, e.g. '[0.1, 0.2, ...]'
        #[arg(long)]
        vector: Option<String>,
        /// Image file to embed with the configured extractor
        #[arg(long)]
        image: Option<PathBuf>,
        /// Number of results; zero or negative returns none (default: LOOKALIKE_TOP_K)
        #[arg(long, allow_negative_numbers = true)]
        top_k: Option<i64>,
    },
    /// Show index statistics
    Stats,
    /// Validate the JSON sources and write them into a SQLite snapshot
    Import {
        /// Target database (default: LOOKALIKE_DB)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}
