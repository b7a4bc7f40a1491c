//! File based client configuration

pub mod json;
pub mod loader;

pub use json::{JsonClientConfig, JsonRedirect};
pub use loader::ConfigLoader;
