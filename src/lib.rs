pub mod cli;
pub mod clock;
pub mod input;
pub mod math;
pub mod nav;
pub mod options;
pub mod pages;
pub mod render;
pub mod scene;
pub mod ui;

// Re-export the types most callers reach for
pub use nav::{HistoryEntry, NavigationHistory, PageFlow, SessionHistory};
pub use pages::{Page, PageContent};
pub use scene::{Motion, ParkAsset};
