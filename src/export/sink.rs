//! Output sink for exported content.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error_handling::ExportError;

/// Append-in-order writer for content values.
///
/// The underlying writer is closed when the sink is dropped, so every exit
/// path releases it. Only [`ContentSink::finish`] reports flush failures.
pub(crate) struct ContentSink<W: Write> {
    inner: W,
    path: PathBuf,
    separator: Option<Vec<u8>>,
    written: usize,
}

impl ContentSink<BufWriter<File>> {
    /// Creates (or truncates) the destination file.
    pub(crate) fn create(path: &Path, separator: Option<Vec<u8>>) -> Result<Self, ExportError> {
        let file = File::create(path).map_err(|e| ExportError::write(path, e))?;
        Ok(Self::new(BufWriter::new(file), path, separator))
    }
}

impl<W: Write> ContentSink<W> {
    pub(crate) fn new(inner: W, path: impl Into<PathBuf>, separator: Option<Vec<u8>>) -> Self {
        Self {
            inner,
            path: path.into(),
            separator,
            written: 0,
        }
    }

    /// Writes one row's value. `None` (SQL NULL) writes nothing but still counts.
    pub(crate) fn write_value(&mut self, value: Option<&[u8]>) -> Result<(), ExportError> {
        self.try_write_value(value)
            .map_err(|e| ExportError::write(&self.path, e))?;
        self.written += 1;
        Ok(())
    }

    fn try_write_value(&mut self, value: Option<&[u8]>) -> io::Result<()> {
        if self.written > 0 {
            if let Some(separator) = &self.separator {
                self.inner.write_all(separator)?;
            }
        }
        if let Some(bytes) = value {
            self.inner.write_all(bytes)?;
        }
        Ok(())
    }

    /// Number of values written so far.
    pub(crate) fn written(&self) -> usize {
        self.written
    }

    #[cfg(test)]
    pub(crate) fn inner_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Flushes buffered output and returns the number of values written.
    pub(crate) fn finish(mut self) -> Result<usize, ExportError> {
        self.inner
            .flush()
            .map_err(|e| ExportError::write(&self.path, e))?;
        Ok(self.written)
    }
}
