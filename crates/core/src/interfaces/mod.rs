//! Trait seams of the pipeline
//!
//! Execution engines, resolver backends and the query parser live outside
//! this crate; they plug in through these traits.

pub mod client;
pub mod query;
pub mod resolver;
pub mod wrapper;

pub use client::{CoreClient, GetImplementationsOptions};
pub use query::QueryParser;
pub use resolver::UriResolver;
pub use wrapper::{FileReader, ManifestPackageLoader, WrapPackage, Wrapper};
