use async_trait::async_trait;

use super::CoreClient;
use crate::error::Result;
use crate::resolution::ResolutionContext;
use crate::types::UriPackageOrWrapper;
use crate::uri::Uri;

/// Advances a uri one step toward a wrapper.
///
/// "No match" is signalled by returning the input uri unchanged in the
/// `Uri` variant, not by an error.
#[async_trait]
pub trait UriResolver: Send + Sync {
    async fn try_resolve_uri(
        &self,
        uri: &Uri,
        client: &dyn CoreClient,
        context: &mut ResolutionContext,
    ) -> Result<UriPackageOrWrapper>;
}
