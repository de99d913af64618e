pub mod api;
pub mod app;
pub mod calendar;
pub mod config;
pub mod emoji;
pub mod errors;
pub mod fuzzy;
pub mod handlers;
pub mod models;
pub mod session;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
