//! Main TUI application state and event loop

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::info;

use super::components::StatusDisplay;
use super::screens::{ItemListScreen, ListingScreen};
use super::ui::centered_rect;
use crate::api::MarketplaceApi;
use crate::config::Config;
use crate::listing::ListingForm;
use crate::refresh::RefreshCoordinator;

/// Pane that receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pane {
    Listing,
    Items,
}

/// Main TUI application state
pub struct App {
    pub config: Config,
    pub api: Arc<dyn MarketplaceApi>,
    pub coordinator: RefreshCoordinator,

    pub listing: ListingScreen,
    pub items: ItemListScreen,
    pub status: StatusDisplay,

    pub focus: Pane,
    pub should_quit: bool,
    pub show_help_popup: bool,
}

impl App {
    /// Wire the form, the list and the refresh coordinator around one API client
    pub fn new(config: Config, api: Arc<dyn MarketplaceApi>) -> Self {
        let coordinator = RefreshCoordinator::new();
        let controller = ListingForm::new(api.clone(), coordinator.completion_callback());

        Self {
            listing: ListingScreen::new(controller),
            items: ItemListScreen::new(config.clone()),
            status: StatusDisplay::new()
                .with_timestamps()
                .with_idle_hint("Esc: switch pane | F1/?: Help | Ctrl+C: Quit"),
            config,
            api,
            coordinator,
            focus: Pane::Listing,
            should_quit: false,
            show_help_popup: false,
        }
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Connected to backend at {}", self.config.backend_origin());

        loop {
            self.tick().await;

            terminal.draw(|f| self.draw(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key).await;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// One render pass worth of background work: reload the list if signaled
    pub async fn tick(&mut self) {
        if let Some(message) = self
            .items
            .reload_if_signaled(self.api.as_ref(), &self.coordinator)
            .await
        {
            self.status.set_message(message);
        }
    }

    /// Handle keyboard input events
    pub async fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::F(1) => {
                self.show_help_popup = !self.show_help_popup;
                return;
            }
            KeyCode::Char('?') if self.focus == Pane::Items => {
                self.show_help_popup = !self.show_help_popup;
                return;
            }
            KeyCode::Esc => {
                if self.show_help_popup {
                    self.show_help_popup = false;
                } else {
                    self.toggle_focus();
                }
                return;
            }
            _ => {}
        }

        if self.show_help_popup {
            return;
        }

        match self.focus {
            Pane::Listing => {
                if let Some(message) = self.listing.handle_key_event(key).await {
                    self.status.set_message(message);
                }
            }
            Pane::Items => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                _ => self.items.handle_key_event(key, &self.coordinator),
            },
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Pane::Listing => Pane::Items,
            Pane::Items => Pane::Listing,
        };
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        let title = Paragraph::new("Simple Mercari").style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(title, rows[0]);

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[1]);

        self.listing.draw(f, panes[0], self.focus == Pane::Listing);
        self.items.draw(f, panes[1], self.focus == Pane::Items);
        self.status.render(f, rows[2]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    /// Draw help popup with shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 60, area);

        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(HELP_TEXT)
            .block(
                Block::default()
                    .title("Help - Shortcuts")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        f.render_widget(help_popup, popup_area);
    }
}

const HELP_TEXT: &str = "Global:\n\
    Esc - Switch between form and item list / close help\n\
    F1 - Toggle this help\n\
    Ctrl+C / Ctrl+Q - Quit\n\n\
    Listing form:\n\
    Tab / Shift+Tab - Next / previous field\n\
    Enter on Image file - Attach the file at the typed path\n\
    Enter elsewhere - List this item\n\n\
    Item list:\n\
    ↑/↓ - Move selection\n\
    r - Reload items\n\
    ? - Toggle this help\n\
    q - Quit";
