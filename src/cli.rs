//! CLI argument definitions
//!
//! Subcommands for searching, cross-matching and browsing a proposal corpus

use clap::{Args, Parser, Subcommand};
use proposal_search::listing::{ColumnFilter, MetadataColumn};
use std::path::PathBuf;

/// Proposal corpus search CLI
#[derive(Parser, Debug)]
#[command(name = "proposal-search")]
#[command(about = "Fuzzy search and cross-match over a corpus of proposal records", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory of markdown proposal records
    #[arg(long, global = true, env = "PROPOSAL_CORPUS_DIR", default_value = "data")]
    pub corpus: PathBuf,

    /// JSON configuration file (threshold, field weights)
    #[arg(long, global = true, env = "PROPOSAL_SEARCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the fuzzy match threshold (0.0 exact .. 1.0 anything)
    #[arg(long, global = true)]
    pub threshold: Option<f64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ranked fuzzy search across titles, bodies and metadata
    Search(SearchArgs),
    /// Match a comma-separated list of terms three ways
    Crossmatch(CrossmatchArgs),
    /// Show one proposal by program id
    Show(ShowArgs),
    /// Browse the metadata table
    Metadata(MetadataArgs),
}

/// Search command arguments
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Search text
    pub query: String,

    /// Maximum number of results to print
    #[arg(short = 'l', long, default_value_t = 20)]
    pub limit: usize,

    /// Print JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

/// Cross-match command arguments
#[derive(Args, Debug, Clone)]
pub struct CrossmatchArgs {
    /// Comma-separated terms, e.g. "M82, NGC 1068"
    pub terms: String,

    /// Print CSV
    #[arg(long, conflicts_with = "json")]
    pub csv: bool,

    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Program id
    pub id: String,

    #[arg(long)]
    pub json: bool,
}

/// Metadata listing arguments
#[derive(Args, Debug, Clone)]
pub struct MetadataArgs {
    /// Column filter as column=value, repeatable
    #[arg(short = 'f', long = "filter")]
    pub filters: Vec<ColumnFilter>,

    /// Column to sort by
    #[arg(short = 's', long)]
    pub sort: Option<MetadataColumn>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page number, starting at 1
    #[arg(short = 'p', long, default_value_t = 1)]
    pub page: usize,

    #[arg(long)]
    pub json: bool,
}
