//! Presentation sink: where resolved results leave the core.

use std::io::Write;

use crate::convert::ConversionResult;
use crate::error::FlickrbbError;

/// Receives conversion results in order. The CLI writes BBCode to stdout;
/// other frontends can implement this for previews or clipboards.
pub trait Sink {
    fn render(&mut self, result: &ConversionResult) -> Result<(), FlickrbbError>;

    /// Batch variant for the set path; default renders members in order.
    fn render_all(&mut self, results: &[ConversionResult]) -> Result<(), FlickrbbError> {
        for result in results {
            self.render(result)?;
        }
        Ok(())
    }
}

/// Writes each result as a BBCode block to the underlying writer.
pub struct BbcodeSink<W: Write> {
    writer: W,
}

impl<W: Write> BbcodeSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for BbcodeSink<W> {
    fn render(&mut self, result: &ConversionResult) -> Result<(), FlickrbbError> {
        if result.image_url.is_empty() {
            return Err(FlickrbbError::EmptyResult);
        }
        self.writer.write_all(result.bbcode().as_bytes())?;
        Ok(())
    }
}
