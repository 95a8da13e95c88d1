//! Terminal frontend for the search bar

pub mod app;
pub mod colors;
pub mod list;
pub mod search;
pub mod ui;

use crate::catalog::BookCatalog;
use crate::AppConfig;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;

fn init_terminal() -> crate::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> crate::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the interactive search bar until the user quits.
///
/// Returns the title of the book picked last, if any.
pub fn run(config: AppConfig, catalog: Arc<dyn BookCatalog>) -> crate::Result<Option<String>> {
    let mut terminal = init_terminal()?;
    let mut app = app::App::new(config, catalog);

    let result = app.run(&mut terminal);

    // Restore terminal even if the loop failed
    restore_terminal(&mut terminal)?;
    result?;

    Ok(app.bar.selected().map(|book| book.title.clone()))
}
