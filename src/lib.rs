pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod mailer;
pub mod models;
pub mod rate_limit;
pub mod spam;
pub mod state;
pub mod storage;
pub mod submission;
pub mod ui;
pub mod validation;
pub mod whatsapp;

pub use app::router;
pub use config::Config;
pub use state::AppState;
