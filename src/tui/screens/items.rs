//! Item list pane: reloads when the refresh signal is raised and renders the collection

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{ListItem, Paragraph},
    Frame,
};
use tracing::{debug, error};

use crate::{
    api::MarketplaceApi,
    config::Config,
    models::Item,
    refresh::RefreshCoordinator,
    tui::{
        components::{ListView, ListViewConfig, StatusMessage},
        traits::Navigable,
        ui::{truncate_to_width, Styles},
    },
};

pub struct ItemListScreen {
    pub list: ListView<Item>,
    pub config: Config,
    pub last_error: Option<String>,
}

impl ItemListScreen {
    pub fn new(config: Config) -> Self {
        Self {
            list: ListView::new(
                Vec::new(),
                ListViewConfig::new("Items").with_empty_message("No items listed yet"),
            ),
            config,
            last_error: None,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.list.items
    }

    /// Fetch the collection if a refresh was requested.
    ///
    /// The coordinator is told the load finished after every settled fetch,
    /// successful or not, so a failing backend never leaves the request raised.
    /// On failure the previously shown items stay in place.
    pub async fn reload_if_signaled(
        &mut self,
        api: &dyn MarketplaceApi,
        coordinator: &RefreshCoordinator,
    ) -> Option<StatusMessage> {
        if !coordinator.needs_refresh() {
            return None;
        }

        let status = match api.fetch_items().await {
            Ok(items) => {
                debug!("GET success: {} items", items.len());
                let count = items.len();
                self.list.set_items(items);
                self.list.config.title = format!("Items ({})", count);
                self.last_error = None;
                StatusMessage::info(format!("Loaded {} items", count))
            }
            Err(e) => {
                error!("GET error: {}", e);
                self.last_error = Some(e.to_string());
                StatusMessage::error(format!("Failed to load items: {}", e))
            }
        };

        coordinator.on_list_loaded();
        Some(status)
    }

    /// Handle a key press; `r` asks the coordinator for a reload
    pub fn handle_key_event(&mut self, key: KeyEvent, coordinator: &RefreshCoordinator) {
        match key.code {
            KeyCode::Up => self.list.navigate_up(),
            KeyCode::Down => self.list.navigate_down(),
            KeyCode::Home => self.list.navigate_to_first(),
            KeyCode::End => self.list.navigate_to_last(),
            KeyCode::Char('r') => coordinator.request_refresh(),
            _ => {}
        }
    }

    /// The two display lines of one item row
    pub fn item_lines(&self, item: &Item, width: usize) -> [String; 2] {
        [
            truncate_to_width(
                &format!("Name: {} | Category: {}", item.name, item.category),
                width,
            ),
            truncate_to_width(&format!("  {}", self.config.image_url(&item.image)), width),
        ]
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(if self.last_error.is_some() {
                [Constraint::Min(0), Constraint::Length(1)]
            } else {
                [Constraint::Min(0), Constraint::Length(0)]
            })
            .split(area);

        let width = chunks[0].width.saturating_sub(2) as usize;
        let rows: Vec<ListItem<'static>> = self
            .list
            .items
            .iter()
            .map(|item| {
                let [heading, image] = self.item_lines(item, width);
                ListItem::new(vec![
                    Line::from(heading),
                    Line::from(Span::styled(image, Styles::inactive())),
                ])
            })
            .collect();

        self.list
            .render(f, chunks[0], focused, |i, _| rows[i].clone());

        if let Some(ref err) = self.last_error {
            let line = Paragraph::new(truncate_to_width(
                &format!("Last reload failed: {}", err),
                chunks[1].width as usize,
            ))
            .style(Styles::error());
            f.render_widget(line, chunks[1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::tui::components::StatusType;
    use ratatui::{backend::TestBackend, Terminal};

    fn lamp() -> Item {
        Item {
            id: 1,
            name: "Lamp".to_string(),
            category: "Home".to_string(),
            image: "img/lamp.png".to_string(),
        }
    }

    fn screen() -> ItemListScreen {
        ItemListScreen::new(Config::default())
    }

    fn rendered_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[tokio::test]
    async fn test_initial_load_renders_items_and_clears_signal() {
        let api = FakeApi::with_items(vec![lamp()]);
        let coordinator = RefreshCoordinator::new();
        let mut screen = screen();

        let status = screen.reload_if_signaled(&api, &coordinator).await.unwrap();

        assert_eq!(status.status_type, StatusType::Info);
        assert_eq!(api.fetch_calls(), 1);
        assert!(!coordinator.needs_refresh());
        assert_eq!(coordinator.loads_completed(), 1);
        assert_eq!(screen.items(), &[lamp()]);

        // Settled: further render passes neither fetch nor report again
        assert!(screen.reload_if_signaled(&api, &coordinator).await.is_none());
        assert_eq!(api.fetch_calls(), 1);
        assert_eq!(coordinator.loads_completed(), 1);

        let mut terminal = Terminal::new(TestBackend::new(80, 8)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                screen.draw(f, area, true)
            })
            .unwrap();
        let text = rendered_text(&terminal);
        assert_eq!(text.matches("Name: Lamp | Category: Home").count(), 1);
        assert!(text.contains("http://localhost:9000/img/lamp.png"));
        assert!(text.contains("Items (1)"));
    }

    #[tokio::test]
    async fn test_no_fetch_without_signal() {
        let api = FakeApi::with_items(vec![lamp()]);
        let coordinator = RefreshCoordinator::new();
        coordinator.on_list_loaded();
        let mut screen = screen();

        assert!(screen.reload_if_signaled(&api, &coordinator).await.is_none());
        assert_eq!(api.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_fetch_still_reports_completion() {
        let api = FakeApi::failing_fetch();
        let coordinator = RefreshCoordinator::new();
        let mut screen = screen();
        screen.list.set_items(vec![lamp()]);

        let status = screen.reload_if_signaled(&api, &coordinator).await.unwrap();

        assert_eq!(status.status_type, StatusType::Error);
        assert!(!coordinator.needs_refresh());
        assert_eq!(coordinator.loads_completed(), 1);
        assert!(screen.last_error.is_some());
        // Previous items stay visible
        assert_eq!(screen.items().len(), 1);

        // The next render pass does not refetch
        assert!(screen.reload_if_signaled(&api, &coordinator).await.is_none());
        assert_eq!(api.fetch_calls(), 1);
        assert_eq!(coordinator.loads_completed(), 1);
    }

    #[test]
    fn test_refresh_key_raises_signal() {
        let coordinator = RefreshCoordinator::new();
        coordinator.on_list_loaded();
        let mut screen = screen();

        screen.handle_key_event(
            KeyEvent::new(KeyCode::Char('r'), crossterm::event::KeyModifiers::NONE),
            &coordinator,
        );
        assert!(coordinator.needs_refresh());
    }
}
