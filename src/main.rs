//! booksearch CLI
//!
//! Interactive autocomplete search over the Google Books catalog, plus a
//! one-shot lookup mode for scripting.

use booksearch::{AppConfig, BookCatalog, GoogleBooksClient, Suggestion};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// booksearch - find books as you type
///
/// Queries are debounced and sent to the catalog endpoint; pick a suggestion
/// with the arrow keys and Enter, or with the mouse.
#[derive(Parser)]
#[command(name = "booksearch")]
#[command(author = "booksearch Contributors")]
#[command(version)]
#[command(about = "Autocomplete search over a remote book catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Catalog search endpoint
    #[arg(long, global = true, default_value = booksearch::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Quiet period after the last keystroke before searching, in milliseconds
    #[arg(long, global = true, default_value = "300")]
    debounce_ms: u64,

    /// Number of results requested per lookup
    #[arg(long, global = true, default_value = "20")]
    max_results: u32,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value = "10")]
    timeout_secs: u64,

    /// Write logs here instead of next to the executable
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive search bar (default)
    Tui,

    /// Look up a query once and print the matching titles
    Lookup {
        /// Search query (use -- before the query if it starts with -)
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Print suggestions as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn config(&self) -> AppConfig {
        AppConfig {
            endpoint: self.endpoint.clone(),
            debounce: Duration::from_millis(self.debounce_ms),
            max_results: self.max_results,
            request_timeout_secs: self.timeout_secs,
            log_file: self.log_file.clone(),
            debug: self.debug,
            ..Default::default()
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config();

    if let Err(e) = booksearch::logging::init(config.log_file.as_deref(), config.debug) {
        eprintln!("{} {}", style("Warning:").yellow().bold(), e);
    }

    let result = match cli.command {
        None | Some(Commands::Tui) => cmd_tui(config),
        Some(Commands::Lookup { query, json }) => cmd_lookup(&config, &query, json),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "exiting with error");
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_tui(config: AppConfig) -> booksearch::Result<()> {
    let client = GoogleBooksClient::new(&config)?;
    tracing::info!(endpoint = %client.endpoint(), "starting interactive search");

    if let Some(title) = booksearch::tui::run(config, Arc::new(client))? {
        println!("{} {}", style("Selected Book:").green().bold(), title);
    }
    Ok(())
}

fn cmd_lookup(config: &AppConfig, query: &str, json: bool) -> booksearch::Result<()> {
    let suggestions: Vec<Suggestion> = if query.is_empty() {
        Vec::new()
    } else {
        let client = GoogleBooksClient::new(config)?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_message(format!("Searching for '{}'...", query));
        spinner.enable_steady_tick(Duration::from_millis(80));

        let result = client.search(query);
        spinner.finish_and_clear();
        result?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("{}", style("No suggestions").dim());
        return Ok(());
    }

    for (i, book) in suggestions.iter().enumerate() {
        println!("{:>3}. {}", style(i + 1).cyan(), book.title);
    }
    Ok(())
}
