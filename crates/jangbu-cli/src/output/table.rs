use jangbu_core::model::LedgerDocument;
use jangbu_core::parsing::values::format_thousands;
use jangbu_core::{FileFailure, RenderedLedger};
use std::fmt::Write;
use std::path::Path;

/// Plain-text listing of parsed ledgers, one block per ledger kind.
pub fn format_documents(documents: &[LedgerDocument]) -> String {
    let mut out = String::new();
    for (i, doc) in documents.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "=== {} ({}) ===", doc.title, doc.company);
        if !doc.date_range.is_empty() {
            let _ = writeln!(out, "  기간: {}", doc.date_range);
        }
        let _ = writeln!(out);

        let mut number = 0;
        for record in &doc.records {
            let marker = if record.is_summary() {
                "  *".to_string()
            } else {
                number += 1;
                format!("{number:>3}")
            };
            let name = if record.is_summary() {
                record.summary_text()
            } else {
                record.counterparty.clone()
            };
            let _ = writeln!(
                out,
                "{marker}  {:<10}  {:<25}  {:>14}  {:>12}  {:>14}",
                record.date,
                name,
                format_thousands(record.amounts.supply),
                format_thousands(record.amounts.tax),
                format_thousands(record.amounts.total),
            );
        }
        let _ = writeln!(out, "\n  {} records", doc.records.len());
    }
    out.trim_end().to_string()
}

pub fn print_written(outputs: &[RenderedLedger], out_dir: &Path) {
    for ledger in outputs {
        println!(
            "  {} -> {} ({} records)",
            ledger.source,
            out_dir.join(&ledger.file_name).display(),
            ledger.records
        );
    }
}

pub fn print_failures(failures: &[FileFailure]) {
    if failures.is_empty() {
        return;
    }
    eprintln!("\n  Failed files:");
    for failure in failures {
        eprintln!("    {}: {}", failure.file_name, failure.reason);
    }
}
