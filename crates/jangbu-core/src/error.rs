use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum JangbuError {
    #[error("font file not found at {path}. Pass --font or set JANGBU_FONT to a Hangul TrueType font (e.g. NanumGothic.ttf)")]
    FontMissing { path: PathBuf },

    #[error("no font configured. Pass --font or set JANGBU_FONT to a Hangul TrueType font")]
    FontNotConfigured,

    #[error("font could not be parsed: {0}")]
    FontInvalid(String),

    #[error("font cannot be used for ledgers: {0}")]
    FontUnsupported(String),

    #[error("failed to open workbook: {0}")]
    Workbook(String),

    #[error("no header row found within the first {searched} rows (expected columns 구분, 번호, 일자, 거래처, 공급가액, 세액, 합계)")]
    HeaderNotFound { searched: usize },

    #[error("required column '{column}' not found in the header row")]
    MissingColumn { column: String },

    #[error("ledger has no records to render")]
    EmptyLedger,

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to load layout from {path}: {reason}")]
    LayoutLoad { path: PathBuf, reason: String },

    #[error("invalid layout: {0}")]
    LayoutInvalid(String),

    #[error("all {failed} input file(s) failed")]
    BatchFailed { failed: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
