use crate::error::JangbuError;
use crate::extraction::{PageContent, PdfExtractor};
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// Notice text through poppler's `pdftotext`.
///
/// Filing notices put a label and its amount at opposite ends of a table
/// row; `-layout` keeps them on one output line, which is what the line
/// matchers expect.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Whether a `pdftotext` binary can be started at all.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }

    fn layout_text(&self, pdf: &Path) -> Result<String, JangbuError> {
        let output = Command::new("pdftotext")
            .args(["-layout", "-enc", "UTF-8"])
            .arg(pdf)
            .arg("-")
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => JangbuError::PdftotextNotFound,
                _ => JangbuError::Extraction(format!("could not start pdftotext: {e}")),
            })?;

        if !output.status.success() {
            return Err(JangbuError::PdftotextFailed {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        // Hangul survives even if a stray byte does not.
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, JangbuError> {
        // pdftotext only reads from a path.
        let mut notice = tempfile::Builder::new()
            .prefix("jangbu-notice-")
            .suffix(".pdf")
            .tempfile()?;
        notice.write_all(pdf_bytes)?;
        notice.flush()?;

        let text = self.layout_text(notice.path())?;
        Ok(split_pages(&text))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext output into pages (form feed `\x0c` separates pages).
///
/// Scanned pages come back without text; they are kept with no lines so
/// page numbering stays aligned with the source document.
pub(crate) fn split_pages(text: &str) -> Vec<PageContent> {
    let mut pages: Vec<PageContent> = text
        .split('\x0c')
        .enumerate()
        .map(|(i, page_text)| PageContent {
            page_number: i + 1,
            lines: page_text
                .lines()
                .map(|l| l.trim_end().to_string())
                .filter(|l| !l.is_empty())
                .collect(),
        })
        .collect();

    // pdftotext terminates the last page with a form feed as well
    if pages.len() > 1 && pages.last().is_some_and(|p| p.lines.is_empty()) {
        pages.pop();
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages() {
        let text = "누계매출   1,234,567\n\x0c\n\x0c차가감하여 납부할세액  10,000\n\x0c";
        let pages = split_pages(text);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].lines, vec!["누계매출   1,234,567"]);
        assert!(pages[1].lines.is_empty());
        assert_eq!(pages[2].page_number, 3);
    }

    #[test]
    fn test_damaged_notice_is_an_error() {
        // Installed or not, pdftotext never yields text for this.
        let result = PdftotextExtractor::new().extract_pages(b"%PDF-1.4 truncated");
        assert!(matches!(
            result,
            Err(JangbuError::PdftotextNotFound | JangbuError::PdftotextFailed { .. })
        ));
    }

    #[test]
    fn test_split_pages_single_page_without_trailing_feed() {
        let pages = split_pages("only line");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].lines, vec!["only line"]);
    }
}
