pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod fs;
pub mod identity;
pub mod models;

pub use app::run;
pub use config::ListOptions;
pub use error::ListError;
