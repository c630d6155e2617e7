//! HTTP side of the prom client: backend endpoints, configuration and
//! picture loading.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod image;

pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_API_URL, default_config_dir};
pub use dashboard::{DeleteError, delete_account, load_summary};
pub use error::{ApiError, Result};
pub use image::load_picture;
