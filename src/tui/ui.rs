use crate::catalog::Suggestion;
use crate::tui::app::App;
use crate::tui::colors;
use crate::tui::search::PLACEHOLDER;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use unicode_width::UnicodeWidthStr;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(0),    // Suggestions + selection
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_search_bar(frame, app, chunks[0]);
    draw_body(frame, app, chunks[1]);
    draw_status_bar(frame, app, chunks[2]);
}

/// Horizontal scroll that keeps the cursor inside an input `width` columns wide
pub fn input_scroll(cursor_column: u16, width: u16) -> u16 {
    cursor_column.saturating_sub(width.saturating_sub(1))
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::BORDER_FOCUSED))
        .title(" Search ");

    let text = if app.input.is_empty() {
        Span::styled(PLACEHOLDER, Style::default().fg(colors::PLACEHOLDER))
    } else {
        Span::styled(app.input.text(), Style::default().fg(Color::White))
    };

    let inner_width = area.width.saturating_sub(2);
    let cursor_column = app.input.cursor_column();
    let scroll = input_scroll(cursor_column, inner_width);

    frame.render_widget(
        Paragraph::new(Line::from(text)).block(block).scroll((0, scroll)),
        area,
    );

    // Account for the left border
    let cursor_x = area
        .x
        .saturating_add(1)
        .saturating_add(cursor_column - scroll);
    frame.set_cursor_position(Position::new(cursor_x, area.y.saturating_add(1)));
}

fn draw_body(frame: &mut Frame, app: &mut App, area: Rect) {
    let list_height = if app.bar.list_visible() {
        let max_rows = app.config.max_visible_rows.max(1) as usize;
        let rows = app.bar.suggestions().len().clamp(1, max_rows) as u16;
        (rows + 2).min(area.height)
    } else {
        0
    };
    let panel_height = if app.bar.selected().is_some() { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(list_height),
            Constraint::Length(panel_height),
            Constraint::Min(0),
        ])
        .split(area);

    if list_height > 0 {
        draw_suggestions(frame, app, chunks[0]);
    } else {
        app.list.rows_area = None;
    }

    if let Some(book) = app.bar.selected() {
        draw_selected_book(frame, book, chunks[1]);
    }
}

fn draw_suggestions(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::BORDER_MUTED));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    app.list.visible_rows = inner.height as usize;
    app.list.rows_area = Some(inner);

    let suggestions = app.bar.suggestions();
    if suggestions.is_empty() {
        let text = if app.bar.is_searching() {
            "Searching..."
        } else {
            "No matches"
        };
        let hint = Paragraph::new(format!(" {}", text)).style(
            Style::default()
                .fg(colors::PLACEHOLDER)
                .add_modifier(Modifier::ITALIC),
        );
        frame.render_widget(hint, inner);
        return;
    }

    let items: Vec<ListItem> = app
        .list
        .visible_range(suggestions.len())
        .map(|index| {
            let style = if app.bar.is_highlighted(index) {
                Style::default()
                    .fg(colors::HIGHLIGHT_FG)
                    .bg(colors::HIGHLIGHT_BG)
            } else {
                Style::default()
            };
            ListItem::new(format!(" {}", suggestions[index].title)).style(style)
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn draw_selected_book(frame: &mut Frame, book: &Suggestion, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::SELECTED_TITLE))
        .title(" Selected Book ");

    let title = Paragraph::new(format!(" {}", book.title))
        .block(block)
        .style(
            Style::default()
                .fg(colors::SELECTED_TITLE)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(title, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let phase = app.bar.phase();
    let phase_text = format!(" {} ", colors::phase_label(phase));
    let left_text = if app.bar.is_searching() {
        format!(" \u{23F3} {}", app.status_message)
    } else {
        format!(" {}", app.status_message)
    };
    let right_text = " \u{2191}\u{2193}:Navigate  Enter:Select  Esc:Clear  Ctrl+Q:Quit ";

    let used = phase_text.width() + left_text.width() + right_text.width();
    let available_width = area.width as usize;

    let mut spans = vec![
        Span::styled(
            phase_text,
            Style::default()
                .fg(Color::Black)
                .bg(colors::phase_color(phase))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(left_text),
    ];
    // Not enough space: drop the key hints
    if used < available_width {
        spans.push(Span::raw(" ".repeat(available_width - used)));
        spans.push(Span::styled(right_text, Style::default().fg(Color::Gray)));
    }

    let status = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White).bg(colors::STATUS_BG));
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_scroll_keeps_cursor_in_box() {
        assert_eq!(input_scroll(0, 10), 0);
        assert_eq!(input_scroll(9, 10), 0);
        assert_eq!(input_scroll(10, 10), 1);
        assert_eq!(input_scroll(u16::MAX, 58), u16::MAX - 57);
        assert_eq!(input_scroll(5, 0), 5);
    }
}
