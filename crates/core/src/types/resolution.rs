use std::fmt;
use std::sync::Arc;

use crate::interfaces::{WrapPackage, Wrapper};
use crate::uri::Uri;

/// Result of one resolution step
#[derive(Clone)]
pub enum UriPackageOrWrapper {
    /// Redirect target, or the original uri when nothing matched
    Uri(Uri),
    Package(Uri, Arc<dyn WrapPackage>),
    Wrapper(Uri, Arc<dyn Wrapper>),
}

impl UriPackageOrWrapper {
    /// The uri carried by whichever variant is active
    pub fn uri(&self) -> &Uri {
        match self {
            UriPackageOrWrapper::Uri(uri)
            | UriPackageOrWrapper::Package(uri, _)
            | UriPackageOrWrapper::Wrapper(uri, _) => uri,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, UriPackageOrWrapper::Uri(_))
    }
}

impl fmt::Debug for UriPackageOrWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UriPackageOrWrapper::Uri(uri) => write!(f, "Uri({uri})"),
            UriPackageOrWrapper::Package(uri, _) => write!(f, "Package({uri})"),
            UriPackageOrWrapper::Wrapper(uri, _) => write!(f, "Wrapper({uri})"),
        }
    }
}
