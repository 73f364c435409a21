pub mod normalize;
pub mod values;

use std::path::Path;

use crate::model::{Amounts, LedgerDocument, LedgerKind, LedgerRecord};

/// One spreadsheet row, as text, before classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLedgerRow {
    pub classification: String,
    pub label: String,
    pub date: String,
    pub counterparty: String,
    pub amounts: Amounts,
}

/// Group raw rows into one document per ledger kind present.
///
/// Rows keep their spreadsheet order within each document. Rows whose
/// classification is neither sales nor purchase are dropped. Documents are
/// returned sales first.
pub fn build_documents(rows: Vec<RawLedgerRow>, source_name: &str) -> Vec<LedgerDocument> {
    let company = company_from_file_name(source_name);

    let mut sales = Vec::new();
    let mut purchase = Vec::new();
    for row in rows {
        let target = match LedgerKind::from_str_loose(&row.classification) {
            Some(LedgerKind::Sales) => &mut sales,
            Some(LedgerKind::Purchase) => &mut purchase,
            None => {
                tracing::debug!(
                    classification = %row.classification,
                    "skipping row without sales/purchase classification"
                );
                continue;
            }
        };
        target.push(LedgerRecord::new(
            row.label,
            row.date,
            row.counterparty,
            row.amounts,
        ));
    }

    [(LedgerKind::Sales, sales), (LedgerKind::Purchase, purchase)]
        .into_iter()
        .filter(|(_, records)| !records.is_empty())
        .map(|(kind, records)| LedgerDocument {
            title: kind.title().to_string(),
            company: company.clone(),
            kind,
            date_range: date_range(&records),
            records,
        })
        .collect()
}

/// Company name from an input file name: the stem before the first `_`.
///
/// `"한빛상사_2024_1기.xlsx"` -> `"한빛상사"`; a stem without an underscore
/// is used whole.
pub fn company_from_file_name(file_name: &str) -> String {
    let stem = file_stem(file_name);
    match stem.split_once('_') {
        Some((company, _)) => company.to_string(),
        None => stem,
    }
}

/// File name without directories or extension.
pub fn file_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}

/// `"{min} ~ {max}"` over the non-empty dates, compared as strings.
pub fn date_range(records: &[LedgerRecord]) -> String {
    let mut dates = records
        .iter()
        .map(|r| r.date.trim())
        .filter(|d| !d.is_empty());
    let Some(first) = dates.next() else {
        return String::new();
    };
    let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    format!("{min} ~ {max}")
}
