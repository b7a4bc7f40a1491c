use serde::{Deserialize, Serialize};

/// Options for reading a file out of a wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetFileOptions {
    pub path: String,
    /// When set, the file is returned as text instead of raw bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

impl GetFileOptions {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            encoding: None,
        }
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }
}

/// Contents of a wrapper file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Bytes(Vec<u8>),
    Text(String),
}

impl FileContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileContent::Bytes(bytes) => bytes,
            FileContent::Text(text) => text.as_bytes(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            FileContent::Bytes(bytes) => bytes,
            FileContent::Text(text) => text.into_bytes(),
        }
    }
}
