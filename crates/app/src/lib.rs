pub mod app;
pub mod error;
pub mod services;
pub mod startup;

pub use app::{AppConfig, AppState};
pub use error::{AppError, Result};
pub use services::{AppServices, RecordSummary};
pub use startup::{AppPaths, ensure_app_data_dir};
