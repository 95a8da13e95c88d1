//! booksearch - autocomplete search over a remote book catalog
//!
//! As the user types, queries are debounced and sent to the Google Books
//! volumes endpoint; matching titles are listed under the input and can be
//! picked with the arrow keys and Enter, or with the mouse.
//!
//! # Example
//!
//! ```no_run
//! use booksearch::{AppConfig, BookCatalog, GoogleBooksClient};
//!
//! fn main() -> booksearch::Result<()> {
//!     let client = GoogleBooksClient::new(&AppConfig::default())?;
//!     for book in client.search("dune")? {
//!         println!("{}", book.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod debounce;
pub mod error;
pub mod logging;
pub mod search_bar;
pub mod tui;

// Re-export main types
pub use catalog::{parse_volumes, BookCatalog, GoogleBooksClient, Suggestion};
pub use debounce::Debouncer;
pub use error::{BookSearchError, Result};
pub use search_bar::{FetchRequest, Phase, SearchBar};

use std::path::PathBuf;
use std::time::Duration;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Google Books volumes endpoint
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Catalog search endpoint
    pub endpoint: String,
    /// Quiet period after the last keystroke before a lookup is sent
    pub debounce: Duration,
    /// Offset of the first result requested
    pub start_index: u32,
    /// Number of results requested per lookup
    pub max_results: u32,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// Suggestion rows shown before the list scrolls
    pub max_visible_rows: u16,
    /// Log file override
    pub log_file: Option<PathBuf>,
    /// Verbose logging
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce: debounce::DEFAULT_DELAY,
            start_index: 0,
            max_results: 20,
            request_timeout_secs: 10,
            max_visible_rows: 8,
            log_file: None,
            debug: false,
        }
    }
}
