use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parsing::normalize::is_summary_text;

/// Which journal a record belongs to, taken from the classification column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    Sales,
    Purchase,
}

impl LedgerKind {
    /// Journal title printed at the top of every page.
    pub fn title(&self) -> &'static str {
        match self {
            LedgerKind::Sales => "매출장",
            LedgerKind::Purchase => "매입장",
        }
    }

    /// Classification value as it appears in the spreadsheet and output file names.
    pub fn label(&self) -> &'static str {
        match self {
            LedgerKind::Sales => "매출",
            LedgerKind::Purchase => "매입",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<LedgerKind> {
        let trimmed = s.trim();
        if trimmed.contains("매출") || trimmed.eq_ignore_ascii_case("sales") {
            Some(LedgerKind::Sales)
        } else if trimmed.contains("매입") || trimmed.eq_ignore_ascii_case("purchase") {
            Some(LedgerKind::Purchase)
        } else {
            None
        }
    }
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Transaction,
    /// Subtotal or period total (monthly, quarterly, cumulative...).
    Summary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amounts {
    pub supply: i64,
    pub tax: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub label: String,
    pub date: String,
    pub counterparty: String,
    pub amounts: Amounts,
    pub kind: RowKind,
}

impl LedgerRecord {
    /// Build a record, deciding its row kind from the label and counterparty text.
    pub fn new(
        label: impl Into<String>,
        date: impl Into<String>,
        counterparty: impl Into<String>,
        amounts: Amounts,
    ) -> Self {
        let label = label.into();
        let counterparty = counterparty.into();
        let kind = if is_summary_text(&label, &counterparty) {
            RowKind::Summary
        } else {
            RowKind::Transaction
        };
        LedgerRecord {
            label,
            date: date.into(),
            counterparty,
            amounts,
            kind,
        }
    }

    pub fn is_summary(&self) -> bool {
        self.kind == RowKind::Summary
    }

    /// Text shown for a summary row: label and counterparty, untruncated.
    pub fn summary_text(&self) -> String {
        match (self.label.trim(), self.counterparty.trim()) {
            (label, "") => label.to_string(),
            ("", counterparty) => counterparty.to_string(),
            (label, counterparty) => format!("{label} {counterparty}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerDocument {
    pub title: String,
    pub company: String,
    pub kind: LedgerKind,
    pub date_range: String,
    pub records: Vec<LedgerRecord>,
}

impl LedgerDocument {
    /// Suggested download name, `{company}_{kind}.pdf`.
    pub fn file_name(&self) -> String {
        format!("{}_{}.pdf", self.company, self.kind.label())
    }
}

/// Sentinel for notice fields that never matched.
pub const NOTICE_ZERO: &str = "0";

/// Sentinel business name when the first file name has no underscore.
pub const UNKNOWN_BUSINESS: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeSummary {
    pub business: String,
    pub sales: String,
    pub purchase: String,
    pub refund: String,
}

impl Default for NoticeSummary {
    fn default() -> Self {
        NoticeSummary {
            business: UNKNOWN_BUSINESS.to_string(),
            sales: NOTICE_ZERO.to_string(),
            purchase: NOTICE_ZERO.to_string(),
            refund: NOTICE_ZERO.to_string(),
        }
    }
}

/// One uploaded notice: its file name and the text of all its pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeDocument {
    pub file_name: String,
    pub text: String,
}

impl NoticeDocument {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        NoticeDocument {
            file_name: file_name.into(),
            text: text.into(),
        }
    }
}
