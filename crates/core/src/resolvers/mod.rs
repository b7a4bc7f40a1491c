//! Generic resolvers and their composition
//!
//! Backends that talk to storage or name services are external; this module
//! only holds the pieces every chain is assembled from.

pub mod aggregator;
pub mod cache;
pub mod extendable;
pub mod extension_wrapper;
pub mod file_reader;
pub mod recursive;
pub mod static_resolvers;

pub use aggregator::UriResolverAggregator;
pub use cache::WrapperCacheResolver;
pub use extendable::{ExtendableUriResolver, URI_RESOLVER_INTERFACE};
pub use extension_wrapper::UriResolverWrapper;
pub use file_reader::ExtensionFileReader;
pub use recursive::RecursiveResolver;
pub use static_resolvers::{PackageResolver, UriRedirectResolver, WrapperResolver};

use crate::error::Result;
use crate::resolution::{ResolutionContext, ResolutionStep};
use crate::types::UriPackageOrWrapper;
use crate::uri::Uri;

/// Record `result` as one step of `context` and hand it back
pub(crate) fn track_result(
    context: &mut ResolutionContext,
    uri: &Uri,
    description: String,
    result: Result<UriPackageOrWrapper>,
) -> Result<UriPackageOrWrapper> {
    context.track_step(ResolutionStep::new(uri.clone(), &result).with_description(description));
    result
}
