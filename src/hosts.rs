//! Default repository URL validation.
//!
//! [`HostParser`] accepts full URLs (`https://github.com/owner/repo`) and the
//! scheme-less shorthand (`github.com/owner/repo`), and only lets through hosts
//! on its allow-list.

use tracing::trace;
use url::Url;

use crate::model::RepoUrl;
use crate::traits::{RepoUrlParser, UrlError};

const DEFAULT_SCHEME: &str = "https://";
const GIT_SUFFIX: &str = ".git";

/// Allow-list based implementation of [`RepoUrlParser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostParser {
    hosts: Vec<String>,
}

impl Default for HostParser {
    /// Only `github.com` is supported out of the box.
    fn default() -> Self {
        Self {
            hosts: vec!["github.com".to_string()],
        }
    }
}

impl HostParser {
    /// Creates a parser that rejects every host.
    pub fn empty() -> Self {
        Self { hosts: Vec::new() }
    }

    /// Adds a supported host. Hosts are compared case-insensitively.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        let host = host.into().to_ascii_lowercase();
        if !self.hosts.contains(&host) {
            self.hosts.push(host);
        }
        self
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn supports(&self, host: &str) -> bool {
        self.hosts.iter().any(|h| h.eq_ignore_ascii_case(host))
    }
}

impl RepoUrlParser for HostParser {
    fn parse(&self, input: &str) -> Result<RepoUrl, UrlError> {
        let invalid = || UrlError::InvalidUrl(input.to_string());

        let candidate = if input.contains("://") {
            input.to_string()
        } else {
            format!("{DEFAULT_SCHEME}{input}")
        };

        let parsed = Url::parse(&candidate).map_err(|e| {
            trace!(input, error = %e, "URL failed to parse");
            invalid()
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid());
        }
        let host = parsed.host_str().ok_or_else(invalid)?;

        // Exactly "owner/name" with an optional ".git" suffix on the name.
        let segments: Vec<&str> = parsed.path().trim_matches('/').split('/').collect();
        let &[owner, name] = segments.as_slice() else {
            return Err(invalid());
        };
        let name = name.strip_suffix(GIT_SUFFIX).unwrap_or(name);
        if owner.is_empty() || name.is_empty() {
            return Err(invalid());
        }

        if !self.supports(host) {
            return Err(UrlError::UnsupportedHost(host.to_string()));
        }

        Ok(RepoUrl::new(host, owner, name))
    }
}
