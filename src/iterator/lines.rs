//! Raw-line filtering ahead of CSV parsing.

use std::io::{self, BufRead, BufReader, Read};
use tracing::trace;

/// [`Read`] adapter that drops blank lines and comment lines before the CSV
/// reader sees them.
///
/// A line is a comment when its first non-whitespace byte is the marker, and
/// blank when it holds only whitespace. Lines inside an open quoted field are
/// passed through untouched, so multi-line fields keep their content.
pub(crate) struct LineFilter<R> {
    inner: BufReader<R>,
    comment: u8,
    line: Vec<u8>,
    pos: usize,
    line_no: u64,
    in_quotes: bool,
}

impl<R: Read> LineFilter<R> {
    pub(crate) fn new(inner: R, comment: u8) -> Self {
        Self {
            inner: BufReader::new(inner),
            comment,
            line: Vec::new(),
            pos: 0,
            line_no: 0,
            in_quotes: false,
        }
    }

    fn is_skippable(&self) -> bool {
        match self.line.iter().find(|b| !b.is_ascii_whitespace()) {
            None => true,
            Some(&first) => first == self.comment,
        }
    }

    /// Loads the next line to serve. Returns `false` at end of input.
    fn next_line(&mut self) -> io::Result<bool> {
        loop {
            self.line.clear();
            self.pos = 0;
            if self.inner.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(false);
            }
            self.line_no += 1;

            if !self.in_quotes && self.is_skippable() {
                trace!(line = self.line_no, "Skipped blank or comment line");
                continue;
            }

            // Escaped quotes come in pairs, so parity tells whether a field is left open.
            let quotes = self.line.iter().filter(|&&b| b == b'"').count();
            if quotes % 2 == 1 {
                self.in_quotes = !self.in_quotes;
            }
            return Ok(true);
        }
    }
}

impl<R: Read> Read for LineFilter<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.line.len() && !self.next_line()? {
            return Ok(0);
        }
        let available = &self.line[self.pos..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.pos += n;
        Ok(n)
    }
}
