//! Client-side behaviour for the marketing site: navigation, scroll
//! helpers, modals, filters, counters, ripples and validated forms.

pub mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod forms;
pub mod ui;

pub use app::App;
pub use config::SiteConfig;
pub use error::{Result, SiteError};
