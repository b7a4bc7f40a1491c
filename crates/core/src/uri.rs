//! Wrap URIs
//!
//! A URI has the normalized form `wrap://<authority>/<path>`. The scheme is
//! optional on input, so `ens/foo.eth` and `wrap://ens/foo.eth` are equal.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const WRAP_SCHEME: &str = "wrap://";

/// Identity of a resolvable resource
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uri {
    uri: String,
    authority: String,
    path: String,
}

impl Uri {
    /// Parse a URI from its string form
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidUri {
            uri: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid("the provided URI is empty"));
        }

        let processed = trimmed.strip_prefix('/').unwrap_or(trimmed);

        let rest = match processed.find(WRAP_SCHEME) {
            Some(0) => &processed[WRAP_SCHEME.len()..],
            Some(_) => return Err(invalid("the wrap:// scheme must be at the beginning of the URI")),
            None => processed,
        };

        let (authority, path) = rest
            .split_once('/')
            .ok_or_else(|| invalid("expected <authority>/<path>, e.g. wrap://ens/domain.eth"))?;

        if !is_valid_authority(authority) {
            return Err(invalid(
                "authority must start with a lowercase letter and contain only [a-z0-9-_]",
            ));
        }
        if path.is_empty() {
            return Err(invalid("path is empty"));
        }

        Ok(Self {
            uri: format!("{WRAP_SCHEME}{authority}/{path}"),
            authority: authority.to_string(),
            path: path.to_string(),
        })
    }

    /// Authority segment (`ens` in `wrap://ens/foo.eth`)
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Everything after the authority
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Normalized string form, always prefixed with `wrap://`
    pub fn as_str(&self) -> &str {
        &self.uri
    }

    pub fn equals(a: &Uri, b: &Uri) -> bool {
        a.uri == b.uri
    }
}

fn is_valid_authority(authority: &str) -> bool {
    let mut chars = authority.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl Eq for Uri {}

impl Hash for Uri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uri.hash(state);
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

impl fmt::Debug for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uri({})", self.uri)
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uri::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Uri::parse(value)
    }
}

impl TryFrom<String> for Uri {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Uri::parse(&value)
    }
}

impl From<Uri> for String {
    fn from(uri: Uri) -> Self {
        uri.uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_is_optional() {
        let with_scheme = Uri::parse("wrap://ens/domain.eth").unwrap();
        let without = Uri::parse("ens/domain.eth").unwrap();
        let leading_slash = Uri::parse("/ens/domain.eth").unwrap();

        assert_eq!(with_scheme, without);
        assert_eq!(with_scheme, leading_slash);
        assert_eq!(without.as_str(), "wrap://ens/domain.eth");
        assert_eq!(without.authority(), "ens");
        assert_eq!(without.path(), "domain.eth");
    }

    #[test]
    fn test_nested_path_is_kept() {
        let uri = Uri::parse("content-store/QmHash/sub/dir").unwrap();
        assert_eq!(uri.authority(), "content-store");
        assert_eq!(uri.path(), "QmHash/sub/dir");
    }

    #[test]
    fn test_rejects_malformed_uris() {
        assert!(Uri::parse("").is_err());
        assert!(Uri::parse("   ").is_err());
        assert!(Uri::parse("ens").is_err());
        assert!(Uri::parse("ens/").is_err());
        assert!(Uri::parse("Ens/domain.eth").is_err());
        assert!(Uri::parse("ens/wrap://domain.eth").is_err());
        assert!(Uri::parse("wrap:///domain.eth").is_err());
    }

    #[test]
    fn test_serde_uses_string_form() {
        let uri = Uri::parse("ens/domain.eth").unwrap();
        let json = serde_json::to_string(&uri).unwrap();
        assert_eq!(json, "\"wrap://ens/domain.eth\"");

        let back: Uri = serde_json::from_str("\"ipfs/QmHash\"").unwrap();
        assert_eq!(back.as_str(), "wrap://ipfs/QmHash");

        assert!(serde_json::from_str::<Uri>("\"nope\"").is_err());
    }
}
