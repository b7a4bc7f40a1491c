//! wrapline - resolve wrap URIs into wrappers and invoke them
//!
//! Facade over [`wrapline_core`]; the integration tests of the workspace live
//! alongside this crate.
pub use wrapline_core::*;
