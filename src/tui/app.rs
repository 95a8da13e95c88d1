use crate::catalog::{BookCatalog, Suggestion};
use crate::search_bar::{FetchRequest, SearchBar};
use crate::tui::list::ListViewport;
use crate::tui::search::SearchInput;
use crate::tui::ui;
use crate::AppConfig;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Messages from background threads
pub enum BgMessage {
    Suggestions {
        seq: u64,
        query: String,
        result: crate::Result<Vec<Suggestion>>,
    },
}

pub struct App {
    pub config: AppConfig,

    // Sub-states
    pub bar: SearchBar,
    pub input: SearchInput,
    pub list: ListViewport,

    pub status_message: String,

    catalog: Arc<dyn BookCatalog>,

    // Channel
    bg_receiver: Receiver<BgMessage>,
    bg_sender: Sender<BgMessage>,

    // Quit flag
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, catalog: Arc<dyn BookCatalog>) -> Self {
        let (bg_sender, bg_receiver) = channel();
        let list = ListViewport {
            visible_rows: config.max_visible_rows as usize,
            ..Default::default()
        };

        Self {
            bar: SearchBar::new(config.debounce),
            input: SearchInput::default(),
            list,
            status_message: "Ready".to_string(),
            catalog,
            bg_receiver,
            bg_sender,
            should_quit: false,
            config,
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let timeout = self
                .bar
                .time_until_due(Instant::now())
                .map_or(tick_rate, |due| due.min(tick_rate));
            if event::poll(timeout)? {
                let ev = event::read()?;
                self.handle_event(ev, Instant::now());
            }

            self.tick(Instant::now());

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Apply finished lookups and dispatch the debounced one if it is due.
    pub fn tick(&mut self, now: Instant) {
        self.process_messages();
        if let Some(request) = self.bar.poll(now) {
            self.dispatch(request);
        }
    }

    fn dispatch(&mut self, request: FetchRequest) {
        let catalog = Arc::clone(&self.catalog);
        let tx = self.bg_sender.clone();
        self.status_message = format!("Searching for '{}'...", request.query);

        thread::spawn(move || {
            let result = catalog.search(&request.query);
            let _ = tx.send(BgMessage::Suggestions {
                seq: request.seq,
                query: request.query,
                result,
            });
        });
    }

    fn process_messages(&mut self) {
        while let Ok(msg) = self.bg_receiver.try_recv() {
            self.handle_message(msg);
        }
    }

    fn handle_message(&mut self, msg: BgMessage) {
        match msg {
            BgMessage::Suggestions { seq, query, result } => {
                let failed = result.is_err();
                if self.bar.apply_response(seq, result) {
                    self.list.reset();
                    self.status_message = if failed {
                        "No suggestions".to_string()
                    } else {
                        format!("{} results for '{}'", self.bar.suggestions().len(), query)
                    };
                }
            }
        }
    }

    /// Block until every dispatched lookup has reported back, or `timeout` passes.
    ///
    /// Returns true if nothing is left in flight.
    pub fn wait_for_pending(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.bar.in_flight() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.bg_receiver.recv_timeout(remaining) {
                Ok(msg) => self.handle_message(msg),
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.bar.in_flight() == 0
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Paste(text) => {
                text.chars()
                    .filter(|c| !c.is_control())
                    .for_each(|c| self.input.insert(c));
                self.query_changed(now);
            }
            _ => {}
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // AltGr arrives as Ctrl+Alt on Windows; treat it as plain text input
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.should_quit = true;
            }
            KeyCode::Char('u') if ctrl => {
                if self.input.clear() {
                    self.query_changed(now);
                }
            }
            KeyCode::Esc => {
                if self.input.clear() {
                    self.query_changed(now);
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Down => {
                self.bar.select_next();
                self.follow_active();
            }
            KeyCode::Up => {
                self.bar.select_prev();
                self.follow_active();
            }
            KeyCode::Enter => {
                if let Some(book) = self.bar.commit_active() {
                    self.status_message = format!("Selected '{}'", book.title);
                }
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.insert(c);
                self.query_changed(now);
            }
            KeyCode::Backspace => {
                if self.input.backspace() {
                    self.query_changed(now);
                }
            }
            KeyCode::Delete => {
                if self.input.delete() {
                    self.query_changed(now);
                }
            }
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => {}
        }
    }

    // --- Mouse handling ---

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !self.bar.list_visible() {
            return;
        }
        let total = self.bar.suggestions().len();

        match mouse.kind {
            MouseEventKind::Moved => {
                if let Some(index) = self.list.row_at(mouse.column, mouse.row, total) {
                    self.bar.hover(index);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self.list.row_at(mouse.column, mouse.row, total) {
                    if let Some(book) = self.bar.click(index) {
                        self.status_message = format!("Selected '{}'", book.title);
                    }
                }
            }
            MouseEventKind::ScrollDown => {
                let last_start = total.saturating_sub(self.list.visible_rows);
                self.list.scroll_offset = (self.list.scroll_offset + 1).min(last_start);
            }
            MouseEventKind::ScrollUp => {
                self.list.scroll_offset = self.list.scroll_offset.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn query_changed(&mut self, now: Instant) {
        self.bar.input_changed(self.input.text(), now);
        self.list.reset();
        if self.input.is_empty() {
            self.status_message = "Ready".to_string();
        }
    }

    fn follow_active(&mut self) {
        if let Some(index) = self.bar.active_index() {
            self.list.ensure_visible(index);
        }
    }
}
