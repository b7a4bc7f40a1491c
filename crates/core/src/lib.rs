//! wrapline-core - resolution and invocation of wrap URIs
//!
//! This crate provides:
//! - URI parsing and the resolver chain that turns a URI into a wrapper
//! - Per-call resolution contexts with cycle detection and history
//! - The client pipeline: load, derive env, invoke, negotiate encoding
//! - Concurrent query execution over a pre-parsed plan
//!
//! Execution engines, storage resolvers and query parsers are pluggable
//! through the traits in [`interfaces`].
pub mod client;
pub mod codec;
pub mod config;
pub mod env;
pub mod error;
pub mod implementations;
pub mod interfaces;
pub mod resolution;
pub mod resolvers;
pub mod types;
pub mod uri;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use rmpv::Value;
pub use types::{
    FileContent, GetFileOptions, InvokeArgs, InvokeOptions, InvokeResult, InvokeValue,
    UriPackageOrWrapper,
};
pub use uri::Uri;

pub use client::{ClientConfig, ClientConfigBuilder, QueryOptions, QueryResult, WrapClient};
pub use config::{ConfigLoader, JsonClientConfig};
pub use env::Env;
pub use implementations::InterfaceImplementations;
pub use interfaces::{
    CoreClient, FileReader, GetImplementationsOptions, ManifestPackageLoader, QueryParser,
    UriResolver, WrapPackage, Wrapper,
};
pub use resolution::{ResolutionContext, ResolutionHistory, ResolutionStep, ResolvingGuard, StepOutcome};
