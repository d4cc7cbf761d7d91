//! `io::Write` bridge for the `fmt::Write` printers

use std::fmt;
use std::io;

/// `fmt::Write` view of an `io::Write` sink
///
/// `fmt::Error` carries no detail, so the first I/O error is kept here and
/// returned by [`write_io`].
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: io::Write> IoSink<W> {
    /// Wrap a writer
    pub fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    /// Flush and hand back the writer, or the first I/O error seen
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: io::Write> fmt::Write for IoSink<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.error.is_some() {
            return Err(fmt::Error);
        }
        self.inner.write_all(s.as_bytes()).map_err(|err| {
            self.error = Some(err);
            fmt::Error
        })
    }
}

/// Run a printer against an `io::Write` sink
///
/// ```
/// use bintree::print::{write_levels, write_io};
/// use bintree::Tree;
///
/// let tree: Tree<()> = [(1, ())].into_iter().collect();
/// let bytes = write_io(Vec::new(), |out| write_levels(out, &tree)).unwrap();
/// assert!(String::from_utf8(bytes).unwrap().contains("(01)"));
/// ```
pub fn write_io<W, F>(out: W, print: F) -> io::Result<W>
where
    W: io::Write,
    F: FnOnce(&mut IoSink<W>) -> fmt::Result,
{
    let mut sink = IoSink::new(out);
    let printed = print(&mut sink);
    match (printed, sink.error.take()) {
        (_, Some(err)) => Err(err),
        (Err(fmt::Error), None) => Err(io::Error::new(io::ErrorKind::Other, "printer failed")),
        (Ok(()), None) => sink.finish(),
    }
}
