//! proposal-search CLI
//!
//! Loads a directory of proposal records once, then runs one command:
//! - `search <query>` - ranked fuzzy search
//! - `crossmatch <terms>` - fuzzy, contains and exact matches per term
//! - `show <id>` - a single record
//! - `metadata` - filtered, sorted, paginated metadata table

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use proposal_search::crossmatch::to_csv;
use proposal_search::listing::{ListingQuery, SortDirection};
use proposal_search::report::{
    format_cross_match, format_document, format_metadata_page, format_search_results, to_json,
};
use proposal_search::{corpus, load_config, AppError, ProposalIndex};
use tracing::info;

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    match run(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(threshold) = cli.threshold {
        config = config.with_threshold(threshold);
    }

    let documents = corpus::load_directory(&cli.corpus)?;
    let index = ProposalIndex::new(documents, &config)?;
    info!("Serving {} proposals from {}", index.len(), cli.corpus.display());

    match cli.command {
        Commands::Search(args) => execute_search(&index, args),
        Commands::Crossmatch(args) => execute_crossmatch(&index, args),
        Commands::Show(args) => execute_show(&index, args),
        Commands::Metadata(args) => execute_metadata(&index, args),
    }
}

fn execute_search(index: &ProposalIndex, args: cli::SearchArgs) -> Result<String> {
    let results = index.search(&args.query);
    if args.json {
        let shown: Vec<_> = results.iter().take(args.limit).collect();
        return Ok(to_json(&shown)?);
    }
    Ok(format_search_results(&results, &args.query, args.limit))
}

fn execute_crossmatch(index: &ProposalIndex, args: cli::CrossmatchArgs) -> Result<String> {
    let rows = index.cross_match_input(&args.terms);
    if rows.is_empty() {
        return Err(AppError::InvalidInput("no terms to match".to_string()).into());
    }

    if args.csv {
        Ok(to_csv(&rows))
    } else if args.json {
        Ok(to_json(&rows)?)
    } else {
        Ok(format_cross_match(&rows))
    }
}

fn execute_show(index: &ProposalIndex, args: cli::ShowArgs) -> Result<String> {
    let doc = index
        .get_by_id(&args.id)
        .ok_or_else(|| AppError::NotFound(format!("proposal not found: {}", args.id.trim())))?;

    if args.json {
        return Ok(to_json(doc)?);
    }
    Ok(format_document(doc))
}

fn execute_metadata(index: &ProposalIndex, args: cli::MetadataArgs) -> Result<String> {
    let direction = if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    let query = ListingQuery {
        filters: args.filters,
        sort: args.sort.map(|column| (column, direction)),
        page: args.page,
        ..Default::default()
    };

    let page = index.list_metadata(&query);
    if args.json {
        return Ok(to_json(&page)?);
    }
    Ok(format_metadata_page(&page))
}

/// Map an error to the process exit code
fn get_exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AppError>() {
        Some(app_error) => app_error.exit_code(),
        None => 5,
    }
}
