//! UI layer for the admin shell: routing and the individual pages.

pub mod app;
pub mod create_page;
pub mod organisations_page;
pub mod versions_panel;

pub use app::AdminApp;
