use crate::model::RepoUrl;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("unsupported host: {0}")]
    UnsupportedHost(String),
    #[error("invalid repository URL: {0}")]
    InvalidUrl(String),
}

/// Turns the URL column of a row into a [`RepoUrl`].
///
/// Implementations only fill `host`, `owner` and `name`; the iterator attaches
/// metadata afterwards. Plain functions and closures with the matching
/// signature implement this trait too.
pub trait RepoUrlParser {
    fn parse(&self, input: &str) -> Result<RepoUrl, UrlError>;
}

impl<F> RepoUrlParser for F
where
    F: Fn(&str) -> Result<RepoUrl, UrlError>,
{
    fn parse(&self, input: &str) -> Result<RepoUrl, UrlError> {
        self(input)
    }
}
