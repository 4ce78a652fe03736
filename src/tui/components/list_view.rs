//! Generic list view component

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::tui::{traits::Navigable, ui::Styles};

/// Configuration for list view rendering
#[derive(Debug, Clone)]
pub struct ListViewConfig {
    pub title: String,
    pub empty_message: String,
}

impl Default for ListViewConfig {
    fn default() -> Self {
        Self {
            title: "List".to_string(),
            empty_message: "Nothing to show".to_string(),
        }
    }
}

impl ListViewConfig {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn with_empty_message(mut self, message: &str) -> Self {
        self.empty_message = message.to_string();
        self
    }
}

/// Generic list view component
pub struct ListView<T> {
    pub items: Vec<T>,
    pub state: ListState,
    pub config: ListViewConfig,
}

impl<T> ListView<T> {
    pub fn new(items: Vec<T>, config: ListViewConfig) -> Self {
        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }

        Self {
            items,
            state,
            config,
        }
    }

    /// Update items and maintain selection if possible
    pub fn set_items(&mut self, items: Vec<T>) {
        let selected = self.state.selected();
        self.items = items;

        let next = match selected {
            _ if self.items.is_empty() => None,
            Some(idx) if idx < self.items.len() => Some(idx),
            _ => Some(0),
        };
        self.state.select(next);
    }

    /// Navigate to next item
    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 1) % self.items.len(),
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Navigate to previous item
    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    /// Render the list view, formatting each row with `item_formatter`
    pub fn render<F>(&mut self, f: &mut Frame, area: Rect, focused: bool, item_formatter: F)
    where
        F: Fn(usize, &T) -> ListItem<'static>,
    {
        let items: Vec<ListItem> = if self.items.is_empty() {
            vec![ListItem::new(self.config.empty_message.clone()).style(Styles::inactive())]
        } else {
            self.items
                .iter()
                .enumerate()
                .map(|(i, item)| item_formatter(i, item))
                .collect()
        };

        let block = Block::default()
            .title(self.config.title.clone())
            .borders(Borders::ALL)
            .border_style(if focused {
                Styles::active_border()
            } else {
                Styles::inactive_border()
            });

        // Selection is only highlighted while the pane has focus
        let list = List::new(items)
            .block(block)
            .highlight_style(if focused {
                Styles::selected()
            } else {
                Style::default()
            });

        f.render_stateful_widget(list, area, &mut self.state);
    }
}

impl<T> Navigable for ListView<T> {
    fn navigate_up(&mut self) {
        self.previous();
    }

    fn navigate_down(&mut self) {
        self.next();
    }

    fn get_selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        self.state.select(index);
    }

    fn get_item_count(&self) -> usize {
        self.items.len()
    }
}
