//! Pull-based iteration over repository rows in CSV input.
//!
//! [`RowIterator`] reads one row at a time from any [`Read`] source:
//! - Blank lines and comment lines are skipped without taking an iteration step
//! - The first field is validated by a [`RepoUrlParser`]
//! - Remaining fields are attached verbatim as [`RepoUrl::metadata`]
//! - Bad rows surface as [`IterError::Row`] and iteration carries on; a failing
//!   stream surfaces once as [`IterError::Stream`] and ends it
//!
//! # Example
//!
//! ```
//! use repo_harvester::make_iterator_from;
//!
//! let input = "github.com/owner1/repo1\n# skipped\ngithub.com/owner2/repo2,meta\n";
//! let mut rows = make_iterator_from(input.as_bytes()).unwrap();
//!
//! while rows.has_next() {
//!     match rows.next_repo() {
//!         Ok(repo) => println!("{repo} {:?}", repo.metadata),
//!         Err(err) => eprintln!("{err}"),
//!     }
//! }
//! ```

mod error;
mod lines;
mod options;

pub use error::{ErrorKind, IterError, RowError};
pub use options::IteratorOptions;

use std::io::Read;
use std::iter::FusedIterator;
use tracing::{debug, error, trace, warn};

use self::lines::LineFilter;
use crate::hosts::HostParser;
use crate::model::RepoUrl;
use crate::traits::RepoUrlParser;

/// Counters for the rows handed out so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IterStats {
    /// Rows returned as valid records
    pub records: u64,

    /// Rows rejected with a row-level error
    pub row_errors: u64,
}

/// A row read from the stream but not yet validated.
#[derive(Debug)]
struct RawRow {
    row: u64,
    fields: Vec<String>,
}

/// Forward-only, single-pass iterator turning CSV rows into [`RepoUrl`]s.
///
/// `has_next` may read ahead one row; that row is held until the matching
/// `next_repo` call, so repeated `has_next` calls never skip input.
///
/// The iterator owns its reader. Pass `&mut File` (or any `&mut R: Read`) to
/// keep the stream with the caller.
pub struct RowIterator<R, P = HostParser> {
    reader: csv::Reader<LineFilter<R>>,
    parser: P,
    options: IteratorOptions,
    record: csv::StringRecord,
    peeked: Option<Result<RawRow, IterError>>,
    exhausted: bool,
    rows_read: u64,
    width: Option<usize>,
    stats: IterStats,
}

/// Creates a [`RowIterator`] with the default options and [`HostParser`].
///
/// # Errors
///
/// Returns [`IterError::Stream`] if the stream cannot be read while setting up.
pub fn make_iterator_from<R: Read>(reader: R) -> Result<RowIterator<R>, IterError> {
    RowIterator::from_reader(reader)
}

impl<R: Read> RowIterator<R, HostParser> {
    pub fn from_reader(reader: R) -> Result<Self, IterError> {
        Self::with_options(reader, HostParser::default(), &IteratorOptions::default())
    }
}

impl<R: Read, P: RepoUrlParser> RowIterator<R, P> {
    /// Creates an iterator with a custom URL validator and reader options.
    ///
    /// No data row is consumed. With `has_headers` set the header row is read
    /// here, so an unreadable stream is reported immediately.
    ///
    /// # Errors
    ///
    /// Returns [`IterError::Stream`] if reading the header fails with an I/O error.
    pub fn with_options(reader: R, parser: P, options: &IteratorOptions) -> Result<Self, IterError> {
        let mut reader = options
            .reader_builder()
            .from_reader(LineFilter::new(reader, options.comment));

        if options.has_headers {
            match reader.headers() {
                Ok(headers) => debug!(columns = headers.len(), "Skipped header row"),
                Err(e) if e.is_io_error() => {
                    error!(error = %e, "Failed to read header row");
                    return Err(IterError::Stream(e.into()));
                }
                Err(e) => warn!(error = %e, "Header row is not valid text, ignoring it"),
            }
        }

        debug!(
            comment = %char::from(options.comment),
            has_headers = options.has_headers,
            flexible = options.flexible,
            "Row iterator ready"
        );

        Ok(Self {
            reader,
            parser,
            options: options.clone(),
            record: csv::StringRecord::new(),
            peeked: None,
            exhausted: false,
            rows_read: 0,
            width: None,
            stats: IterStats::default(),
        })
    }

    /// Reports whether another outcome (record or error) is available.
    pub fn has_next(&mut self) -> bool {
        self.fill();
        self.peeked.is_some()
    }

    /// Returns the next row as a validated record.
    ///
    /// # Errors
    ///
    /// - [`IterError::Row`] for a row that cannot be used; the following call
    ///   continues with the next row
    /// - [`IterError::Stream`] if the underlying stream fails; the iterator is
    ///   exhausted afterwards
    /// - [`IterError::Exhausted`] when called after the last row
    pub fn next_repo(&mut self) -> Result<RepoUrl, IterError> {
        self.fill();

        let result = match self.peeked.take() {
            None => return Err(IterError::Exhausted),
            Some(Ok(raw)) => self.validate(raw),
            Some(Err(err)) => Err(err),
        };

        match &result {
            Ok(repo) => {
                self.stats.records += 1;
                trace!(repo = %repo, metadata = repo.metadata.len(), "Parsed row");
            }
            Err(err @ IterError::Row { .. }) => {
                self.stats.row_errors += 1;
                warn!(row = err.row(), kind = ?err.kind(), error = %err, "Rejected row");
            }
            Err(IterError::Stream(e)) => error!(error = %e, "Stopped reading rows"),
            Err(IterError::Exhausted) => {}
        }

        result
    }

    pub fn stats(&self) -> IterStats {
        self.stats
    }

    /// Reads ahead one row, an error, or the end of the stream. Blank and
    /// comment lines never reach the CSV reader.
    fn fill(&mut self) {
        if self.peeked.is_some() || self.exhausted {
            return;
        }

        match self.reader.read_record(&mut self.record) {
            Ok(false) => {
                trace!("Reached end of input");
                self.exhausted = true;
            }
            Ok(true) => {
                self.rows_read += 1;
                self.peeked = Some(Ok(RawRow {
                    row: self.rows_read,
                    fields: self.record.iter().map(str::to_owned).collect(),
                }));
            }
            Err(e) if e.is_io_error() => {
                self.exhausted = true;
                self.peeked = Some(Err(IterError::Stream(e.into())));
            }
            Err(e) => {
                // The reader has moved past the bad record already.
                self.rows_read += 1;
                self.peeked = Some(Err(IterError::at_row(
                    self.rows_read,
                    RowError::Malformed(e.to_string()),
                )));
            }
        }
    }

    fn validate(&mut self, raw: RawRow) -> Result<RepoUrl, IterError> {
        let RawRow { row, fields } = raw;

        if !self.options.flexible {
            let expected = *self.width.get_or_insert(fields.len());
            if fields.len() != expected {
                return Err(IterError::at_row(
                    row,
                    RowError::Malformed(format!(
                        "found {} fields, expected {}",
                        fields.len(),
                        expected
                    )),
                ));
            }
        }

        let mut fields = fields.into_iter();
        let url = fields.next().unwrap_or_default();
        let url = if self.options.trim_url {
            url.trim()
        } else {
            url.as_str()
        };
        if url.is_empty() {
            return Err(IterError::at_row(
                row,
                RowError::Malformed("missing repository URL".to_string()),
            ));
        }

        let repo = self
            .parser
            .parse(url)
            .map_err(|e| IterError::at_row(row, e))?;

        Ok(repo.with_metadata(fields.collect()))
    }
}

impl<R: Read, P: RepoUrlParser> Iterator for RowIterator<R, P> {
    type Item = Result<RepoUrl, IterError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_next() {
            Some(self.next_repo())
        } else {
            None
        }
    }
}

impl<R: Read, P: RepoUrlParser> FusedIterator for RowIterator<R, P> {}
