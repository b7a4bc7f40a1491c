//! Value types passed across the resolution and invocation boundary

pub mod file;
pub mod invoke;
pub mod resolution;

pub use file::{FileContent, GetFileOptions};
pub use invoke::{InvokeArgs, InvokeOptions, InvokeResult, InvokeValue};
pub use resolution::UriPackageOrWrapper;
