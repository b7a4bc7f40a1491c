//! JSON representation of a client configuration
//!
//! ```json
//! {
//!   "redirects": [{ "from": "ens/app.eth", "to": "ipfs/QmHash" }],
//!   "envs": { "ipfs/QmHash": { "apiKey": "..." } },
//!   "interfaces": { "ens/iface.eth": ["ens/impl.eth"] },
//!   "extensions": true,
//!   "wrapper_cache": 64
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::{ClientConfig, ClientConfigBuilder};
use crate::codec;
use crate::error::{Error, Result};
use crate::uri::Uri;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonClientConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub redirects: Vec<JsonRedirect>,

    /// Env per uri
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub envs: BTreeMap<String, serde_json::Value>,

    /// Implementations per interface uri
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub interfaces: BTreeMap<String, Vec<Uri>>,

    /// Resolve through registered resolver extensions
    #[serde(default)]
    pub extensions: bool,

    /// Capacity of the wrapper cache; no cache when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapper_cache: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRedirect {
    pub from: Uri,
    pub to: Uri,
}

impl JsonClientConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Fold this configuration into `builder`
    pub fn apply(self, mut builder: ClientConfigBuilder) -> Result<ClientConfigBuilder> {
        for redirect in self.redirects {
            builder = builder.add_redirect(redirect.from, redirect.to);
        }

        for (uri, env) in self.envs {
            builder = builder.add_env(Uri::parse(&uri)?, codec::to_value(&env)?);
        }

        for (interface, implementations) in self.interfaces {
            builder = builder.add_interface_implementations(Uri::parse(&interface)?, implementations);
        }

        if self.extensions {
            builder = builder.add_defaults();
        }
        if let Some(capacity) = self.wrapper_cache {
            builder = builder.with_wrapper_cache(capacity);
        }

        Ok(builder)
    }

    pub fn into_builder(self) -> Result<ClientConfigBuilder> {
        self.apply(ClientConfigBuilder::new())
    }

    pub fn build(self) -> Result<ClientConfig> {
        self.into_builder()?.build()
    }
}
