//! Configuration loading.

pub mod loader;
pub mod model;

pub use model::{AppConfig, ListFormat};
