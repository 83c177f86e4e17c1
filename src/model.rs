use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::hosts::HostParser;
use crate::traits::{RepoUrlParser, UrlError};

/// A validated reference to a source-code repository.
///
/// `host`, `owner` and `name` come from the URL column of a row; `metadata`
/// carries the remaining columns verbatim, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoUrl {
    pub host: String,  // e.g., "github.com"
    pub owner: String, // organization or user
    pub name: String,
    #[serde(default)]
    pub metadata: Vec<String>,
}

impl RepoUrl {
    pub fn new(host: impl Into<String>, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            owner: owner.into(),
            name: name.into(),
            metadata: Vec::new(),
        }
    }

    /// Attaches trailing CSV columns to the record.
    pub fn with_metadata(mut self, metadata: Vec<String>) -> Self {
        self.metadata = metadata;
        self
    }
}

impl fmt::Display for RepoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.owner, self.name)
    }
}

impl FromStr for RepoUrl {
    type Err = UrlError;

    /// Parses with the default [`HostParser`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HostParser::default().parse(s)
    }
}
