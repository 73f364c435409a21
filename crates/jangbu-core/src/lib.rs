pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod notice;
pub mod parsing;
pub mod render;

use serde::Serialize;
use std::collections::HashMap;

use config::LayoutConfig;
use error::JangbuError;
use extraction::ledger_xlsx::read_ledger_workbook;
use extraction::{pages_to_text, PdfExtractor};
use model::{LedgerKind, NoticeDocument, NoticeSummary};
use parsing::file_stem;
use render::font::LedgerFont;
use render::render_ledger;

/// An uploaded file: its original name and raw bytes.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        InputFile {
            name: name.into(),
            bytes,
        }
    }
}

/// A rendered journal ready for download.
#[derive(Debug, Clone)]
pub struct RenderedLedger {
    pub source: String,
    pub file_name: String,
    pub kind: LedgerKind,
    pub records: usize,
    pub bytes: Vec<u8>,
}

/// A file that could not be processed; the rest of the batch carries on.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct LedgerBatch {
    pub outputs: Vec<RenderedLedger>,
    pub failures: Vec<FileFailure>,
}

#[derive(Debug, Default, Serialize)]
pub struct NoticeBatch {
    pub summary: NoticeSummary,
    pub documents: usize,
    pub failures: Vec<FileFailure>,
}

/// Render every ledger a workbook holds: one PDF per ledger kind present.
pub fn render_ledger_file(
    file: &InputFile,
    font: &LedgerFont,
    layout: &LayoutConfig,
) -> Result<Vec<RenderedLedger>, JangbuError> {
    let documents = read_ledger_workbook(&file.bytes, &file.name)?;
    if documents.is_empty() {
        tracing::warn!(file = %file.name, "no sales or purchase rows found");
    }

    documents
        .iter()
        .map(|doc| {
            let bytes = render_ledger(doc, font, layout)?;
            Ok(RenderedLedger {
                source: file.name.clone(),
                file_name: doc.file_name(),
                kind: doc.kind,
                records: doc.records.len(),
                bytes,
            })
        })
        .collect()
}

/// Output file names handed out within one batch, with the input that
/// claimed each.
#[derive(Debug, Default)]
struct OutputNames {
    claimed: HashMap<String, String>,
}

impl OutputNames {
    /// Reserve a unique name for `ledger`.
    ///
    /// `{company}_{kind}.pdf` is tried first; when another input already
    /// took it, the full stem `{stem}_{kind}.pdf` is used instead. If that
    /// is taken too the ledger is refused rather than overwriting the other.
    fn claim(&mut self, ledger: &mut RenderedLedger) -> Result<(), FileFailure> {
        if !self.claimed.contains_key(&ledger.file_name) {
            self.claimed
                .insert(ledger.file_name.clone(), ledger.source.clone());
            return Ok(());
        }
        let owner = self.claimed[&ledger.file_name].clone();

        let fallback = format!("{}_{}.pdf", file_stem(&ledger.source), ledger.kind.label());
        if let Some(fallback_owner) = self.claimed.get(&fallback) {
            return Err(FileFailure {
                file_name: ledger.source.clone(),
                reason: format!(
                    "{} would overwrite the ledger rendered from {fallback_owner}",
                    ledger.file_name
                ),
            });
        }

        tracing::warn!(
            source = %ledger.source,
            taken_by = %owner,
            "{} already written, using {fallback}",
            ledger.file_name
        );
        self.claimed.insert(fallback.clone(), ledger.source.clone());
        ledger.file_name = fallback;
        Ok(())
    }
}

/// Render a batch of workbooks. A file that fails is reported and skipped.
///
/// Every output gets a distinct file name, so writing them all into one
/// directory never loses a ledger.
pub fn render_ledger_batch(
    files: &[InputFile],
    font: &LedgerFont,
    layout: &LayoutConfig,
) -> LedgerBatch {
    let mut batch = LedgerBatch::default();
    let mut names = OutputNames::default();
    for file in files {
        match render_ledger_file(file, font, layout) {
            Ok(outputs) => {
                for mut ledger in outputs {
                    match names.claim(&mut ledger) {
                        Ok(()) => batch.outputs.push(ledger),
                        Err(failure) => {
                            tracing::warn!(file = %file.name, reason = %failure.reason, "skipping ledger");
                            batch.failures.push(failure);
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!(file = %file.name, error = %e, "skipping ledger file");
                batch.failures.push(FileFailure {
                    file_name: file.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
    batch
}

/// Extract the full text of one notice PDF.
pub fn read_notice(
    file: &InputFile,
    extractor: &dyn PdfExtractor,
) -> Result<NoticeDocument, JangbuError> {
    let pages = extractor.extract_pages(&file.bytes)?;
    let empty = pages.iter().filter(|p| p.lines.is_empty()).count();
    if empty > 0 {
        tracing::debug!(file = %file.name, pages = empty, "pages without extractable text");
    }
    Ok(NoticeDocument::new(file.name.clone(), pages_to_text(&pages)))
}

/// Summarize a batch of notice PDFs.
///
/// A document whose text cannot be extracted is reported and takes part
/// with empty text, so the business name still comes from the first upload.
pub fn summarize_notices(files: &[InputFile], extractor: &dyn PdfExtractor) -> NoticeBatch {
    let mut failures = Vec::new();
    let documents: Vec<NoticeDocument> = files
        .iter()
        .map(|file| {
            read_notice(file, extractor).unwrap_or_else(|e| {
                tracing::warn!(
                    file = %file.name,
                    backend = extractor.backend_name(),
                    error = %e,
                    "could not extract notice text"
                );
                failures.push(FileFailure {
                    file_name: file.name.clone(),
                    reason: e.to_string(),
                });
                NoticeDocument::new(file.name.clone(), "")
            })
        })
        .collect();

    NoticeBatch {
        summary: notice::extract(&documents),
        documents: documents.len(),
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(source: &str, kind: LedgerKind) -> RenderedLedger {
        let company = parsing::company_from_file_name(source);
        RenderedLedger {
            source: source.to_string(),
            file_name: format!("{company}_{}.pdf", kind.label()),
            kind,
            records: 1,
            bytes: Vec::new(),
        }
    }

    #[test]
    fn test_distinct_companies_keep_short_names() {
        let mut names = OutputNames::default();
        let mut a = rendered("ACME_2024.xlsx", LedgerKind::Sales);
        let mut b = rendered("Globex_2024.xlsx", LedgerKind::Sales);
        let mut c = rendered("ACME_2024.xlsx", LedgerKind::Purchase);
        names.claim(&mut a).unwrap();
        names.claim(&mut b).unwrap();
        names.claim(&mut c).unwrap();
        assert_eq!(a.file_name, "ACME_매출.pdf");
        assert_eq!(b.file_name, "Globex_매출.pdf");
        assert_eq!(c.file_name, "ACME_매입.pdf");
    }

    #[test]
    fn test_same_company_falls_back_to_full_stem() {
        let mut names = OutputNames::default();
        let mut first = rendered("ACME_2024_1기.xlsx", LedgerKind::Sales);
        let mut second = rendered("ACME_2024_2기.xlsx", LedgerKind::Sales);
        names.claim(&mut first).unwrap();
        names.claim(&mut second).unwrap();
        assert_eq!(first.file_name, "ACME_매출.pdf");
        assert_eq!(second.file_name, "ACME_2024_2기_매출.pdf");
    }

    #[test]
    fn test_same_input_twice_is_refused() {
        let mut names = OutputNames::default();
        let mut first = rendered("ACME_2024.xlsx", LedgerKind::Sales);
        let mut second = rendered("ACME_2024.xlsx", LedgerKind::Sales);
        let mut third = rendered("ACME_2024.xlsx", LedgerKind::Sales);
        names.claim(&mut first).unwrap();
        names.claim(&mut second).unwrap();
        assert_eq!(second.file_name, "ACME_2024_매출.pdf");

        let failure = names.claim(&mut third).unwrap_err();
        assert_eq!(failure.file_name, "ACME_2024.xlsx");
        assert!(failure.reason.contains("ACME_매출.pdf"));
    }
}
