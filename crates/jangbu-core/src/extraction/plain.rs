use crate::error::JangbuError;
use crate::extraction::pdftotext::split_pages;
use crate::extraction::{PageContent, PdfExtractor};

/// Accepts already-extracted text as well as PDFs.
///
/// Input starting with the `%PDF-` signature goes to the wrapped backend;
/// anything else is read as UTF-8 text, with form feeds separating pages.
pub struct TextFallbackExtractor<E> {
    inner: E,
}

impl<E: PdfExtractor> TextFallbackExtractor<E> {
    pub fn new(inner: E) -> Self {
        TextFallbackExtractor { inner }
    }
}

impl<E: PdfExtractor> PdfExtractor for TextFallbackExtractor<E> {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageContent>, JangbuError> {
        if bytes.starts_with(b"%PDF-") {
            return self.inner.extract_pages(bytes);
        }
        let text = std::str::from_utf8(bytes)
            .map_err(|e| JangbuError::Extraction(format!("neither a PDF nor UTF-8 text: {e}")))?;
        Ok(split_pages(text))
    }

    fn backend_name(&self) -> &str {
        self.inner.backend_name()
    }
}
