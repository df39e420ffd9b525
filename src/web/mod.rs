//! Server-rendered HTML surface: routes, forms, flash messages and templates.

pub mod error;
pub mod flash;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
pub mod templates;

pub use router::app_router;
pub use state::AppState;
