//! Panes of the marketplace TUI

pub mod items;
pub mod listing;

pub use items::ItemListScreen;
pub use listing::ListingScreen;
