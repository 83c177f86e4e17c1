use serde::{Deserialize, Serialize};

/// Reader configuration for [`RowIterator`](super::RowIterator).
///
/// Deserializes with defaults for missing fields, so an empty config table is
/// the default configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IteratorOptions {
    /// Lines whose first non-whitespace byte is this marker are skipped (default: `#`)
    pub comment: u8,

    /// Treat the first row as a header and skip it (default: `false`)
    pub has_headers: bool,

    /// Allow rows with differing field counts (default: `true`)
    ///
    /// When disabled, a row whose width differs from the first row is
    /// reported as malformed.
    pub flexible: bool,

    /// Strip surrounding whitespace from the URL field (default: `true`)
    pub trim_url: bool,
}

impl Default for IteratorOptions {
    fn default() -> Self {
        Self {
            comment: b'#',
            has_headers: false,
            flexible: true,
            trim_url: true,
        }
    }
}

impl IteratorOptions {
    pub fn with_comment(mut self, comment: u8) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn with_flexible(mut self, flexible: bool) -> Self {
        self.flexible = flexible;
        self
    }

    pub fn with_trim_url(mut self, trim_url: bool) -> Self {
        self.trim_url = trim_url;
        self
    }

    /// Width checks happen after blank and comment filtering, so the CSV
    /// reader itself always runs in flexible mode.
    pub(crate) fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(self.has_headers)
            .flexible(true)
            .comment(Some(self.comment));
        builder
    }
}
