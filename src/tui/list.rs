use ratatui::layout::{Position, Rect};

/// Scroll and hit-testing state for the suggestion list
pub struct ListViewport {
    pub scroll_offset: usize,
    pub visible_rows: usize,
    /// Where the rows were last drawn; `None` while the list is hidden
    pub rows_area: Option<Rect>,
}

impl Default for ListViewport {
    fn default() -> Self {
        Self {
            scroll_offset: 0,
            visible_rows: 8,
            rows_area: None,
        }
    }
}

impl ListViewport {
    pub fn reset(&mut self) {
        self.scroll_offset = 0;
    }

    /// Range of suggestion indices currently on screen
    pub fn visible_range(&self, total: usize) -> std::ops::Range<usize> {
        let start = self.scroll_offset.min(total);
        let end = (start + self.visible_rows).min(total);
        start..end
    }

    pub fn ensure_visible(&mut self, index: usize) {
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if self.visible_rows > 0 && index >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = index - self.visible_rows + 1;
        }
    }

    /// Suggestion index under a terminal cell, if any
    pub fn row_at(&self, column: u16, row: u16, total: usize) -> Option<usize> {
        let area = self.rows_area?;
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        let index = self.scroll_offset + (row - area.y) as usize;
        (index < total).then_some(index)
    }
}
