use thiserror::Error;

use crate::traits::UrlError;

/// Failures scoped to a single row. Iteration continues past them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// The row could not be split into a usable URL field
    #[error("malformed row: {0}")]
    Malformed(String),

    /// The URL names a host the validator does not recognize
    #[error("unsupported host: {0}")]
    UnsupportedHost(String),

    /// The URL is not a repository reference for any host
    #[error("invalid repository URL: {0}")]
    InvalidUrl(String),
}

impl From<UrlError> for RowError {
    fn from(err: UrlError) -> Self {
        match err {
            UrlError::UnsupportedHost(host) => RowError::UnsupportedHost(host),
            UrlError::InvalidUrl(url) => RowError::InvalidUrl(url),
        }
    }
}

/// Errors returned by [`RowIterator::next_repo`](super::RowIterator::next_repo).
#[derive(Error, Debug)]
pub enum IterError {
    /// The underlying stream failed; no further rows are produced
    #[error("stream error: {0}")]
    Stream(#[from] std::io::Error),

    /// One row was rejected; the next call moves on to the following row
    #[error("row {row}: {source}")]
    Row {
        row: u64,
        #[source]
        source: RowError,
    },

    /// Called after the last row was consumed
    #[error("no more rows")]
    Exhausted,
}

/// Flat classification of [`IterError`], for matching on what went wrong
/// without caring about the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Stream,
    MalformedRow,
    UnsupportedHost,
    InvalidUrl,
    Exhausted,
}

impl IterError {
    pub(crate) fn at_row(row: u64, source: impl Into<RowError>) -> Self {
        IterError::Row {
            row,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            IterError::Stream(_) => ErrorKind::Stream,
            IterError::Row { source, .. } => match source {
                RowError::Malformed(_) => ErrorKind::MalformedRow,
                RowError::UnsupportedHost(_) => ErrorKind::UnsupportedHost,
                RowError::InvalidUrl(_) => ErrorKind::InvalidUrl,
            },
            IterError::Exhausted => ErrorKind::Exhausted,
        }
    }

    /// `true` when no further rows will be produced after this error.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, IterError::Row { .. })
    }

    /// 1-based index of the offending row, counting only rows that were not
    /// skipped as blank or comment lines.
    pub fn row(&self) -> Option<u64> {
        match self {
            IterError::Row { row, .. } => Some(*row),
            _ => None,
        }
    }
}
