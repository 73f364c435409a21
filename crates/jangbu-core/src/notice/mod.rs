pub mod matchers;
pub mod template;

use serde::{Deserialize, Serialize};

use crate::model::{NoticeDocument, NoticeSummary, UNKNOWN_BUSINESS};
use matchers::{
    digits_verbatim, is_purchase_line, is_refund_line, is_sales_line, last_two_groups,
};

/// Kind of notice, told apart by file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    SalesLedger,
    PurchaseLedger,
    /// Filing receipt or return carrying the net tax payable.
    Filing,
}

impl NoticeKind {
    /// Classify a file name; `None` for files the extractor ignores.
    pub fn from_file_name(file_name: &str) -> Option<NoticeKind> {
        if file_name.contains("매출") {
            Some(NoticeKind::SalesLedger)
        } else if file_name.contains("매입") {
            Some(NoticeKind::PurchaseLedger)
        } else if ["접수증", "신고서", "납부서"]
            .iter()
            .any(|kw| file_name.contains(kw))
        {
            Some(NoticeKind::Filing)
        } else {
            None
        }
    }
}

/// Pull the sales, purchase and refund figures out of a batch of notices.
///
/// Each field keeps the value of the last matching line across all
/// documents of its kind; fields that never match stay `"0"`.
pub fn extract(documents: &[NoticeDocument]) -> NoticeSummary {
    let mut summary = NoticeSummary {
        business: documents
            .first()
            .map(|d| business_name(&d.file_name))
            .unwrap_or_else(|| UNKNOWN_BUSINESS.to_string()),
        ..Default::default()
    };

    for doc in documents {
        let Some(kind) = NoticeKind::from_file_name(&doc.file_name) else {
            tracing::debug!(file = %doc.file_name, "ignoring unrecognized notice");
            continue;
        };
        tracing::debug!(file = %doc.file_name, ?kind, "scanning notice");

        for line in doc.text.lines() {
            match kind {
                NoticeKind::SalesLedger if is_sales_line(line) => {
                    if let Some(value) = last_two_groups(line) {
                        summary.sales = value;
                    }
                }
                NoticeKind::PurchaseLedger if is_purchase_line(line) => {
                    if let Some(value) = last_two_groups(line) {
                        summary.purchase = value;
                    }
                }
                NoticeKind::Filing if is_refund_line(line) => {
                    let value = digits_verbatim(line);
                    if !value.is_empty() {
                        summary.refund = value;
                    }
                }
                _ => {}
            }
        }
    }

    summary
}

/// Business name from a file name: the part before the first `_`.
pub fn business_name(file_name: &str) -> String {
    match file_name.split_once('_') {
        Some((name, _)) => name.to_string(),
        None => UNKNOWN_BUSINESS.to_string(),
    }
}
