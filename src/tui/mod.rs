//! Terminal user interface for browsing items and listing new ones

pub mod app;
pub mod components;
pub mod screens;
pub mod traits;
pub mod ui;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use crate::api::MarketplaceApi;
use crate::config::Config;

pub use app::App;

/// Take over the terminal, run the app until the user quits, then restore it
pub async fn run_tui(config: Config, api: Arc<dyn MarketplaceApi>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, api);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match &result {
        Ok(_) => info!("TUI exited successfully"),
        Err(e) => error!("TUI encountered an error: {}", e),
    }

    result
}
