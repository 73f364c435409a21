use std::io::Cursor;

use calamine::{Data, Range, Reader};

use crate::error::JangbuError;
use crate::extraction::columns::{locate_columns, ColumnMap};
use crate::model::{Amounts, LedgerDocument};
use crate::parsing::values::{to_int, truncate_f64};
use crate::parsing::{build_documents, RawLedgerRow};

/// Read a ledger workbook (xlsx, xls, xlsb or ods) into ledger documents.
///
/// Only the first worksheet is read. `source_name` is the uploaded file
/// name; the company name is taken from it.
pub fn read_ledger_workbook(
    bytes: &[u8],
    source_name: &str,
) -> Result<Vec<LedgerDocument>, JangbuError> {
    let cursor = Cursor::new(bytes);
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
        .map_err(|e| JangbuError::Workbook(e.to_string()))?;

    let sheet = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| JangbuError::Workbook("workbook has no worksheets".into()))?
        .map_err(|e| JangbuError::Workbook(format!("failed to read first worksheet: {e}")))?;

    parse_ledger_range(&sheet, source_name)
}

/// Parse a worksheet range: locate the header row, then read every row below it.
pub fn parse_ledger_range(
    sheet: &Range<Data>,
    source_name: &str,
) -> Result<Vec<LedgerDocument>, JangbuError> {
    let text_rows: Vec<Vec<String>> = sheet
        .rows()
        .map(|row| {
            row.iter()
                .map(|c| cell_as_string(c).unwrap_or_default())
                .collect()
        })
        .collect();

    let (header_idx, columns) = locate_columns(&text_rows)?;

    let mut rows = Vec::new();
    for (raw, text) in sheet.rows().zip(&text_rows).skip(header_idx + 1) {
        if text.iter().all(|c| c.is_empty()) {
            continue;
        }
        rows.push(read_row(raw, text, &columns));
    }

    tracing::debug!(source = source_name, rows = rows.len(), "read ledger rows");
    Ok(build_documents(rows, source_name))
}

fn read_row(raw: &[Data], text: &[String], columns: &ColumnMap) -> RawLedgerRow {
    let text_at = |idx: usize| text.get(idx).cloned().unwrap_or_default();
    RawLedgerRow {
        classification: text_at(columns.classification),
        label: text_at(columns.label),
        date: text_at(columns.date),
        counterparty: text_at(columns.counterparty),
        amounts: Amounts {
            supply: amount_from_cell(raw.get(columns.supply)),
            tax: amount_from_cell(raw.get(columns.tax)),
            total: amount_from_cell(raw.get(columns.total)),
        },
    }
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d").to_string()),
        Data::DateTimeIso(s) => Some(s.clone()),
        Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}

/// Integer amount of a monetary cell; anything unusable is 0.
fn amount_from_cell(cell: Option<&Data>) -> i64 {
    match cell {
        Some(Data::Float(f)) => truncate_f64(*f),
        Some(Data::Int(i)) => *i,
        Some(Data::String(s)) => to_int(Some(s)),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LedgerKind, RowKind};

    fn sheet(rows: &[Vec<Data>]) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(1) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    fn header() -> Vec<Data> {
        ["구분", "번호", "일자", "거래처", "공급가액", "세액", "합계"]
            .iter()
            .map(|h| s(h))
            .collect()
    }

    #[test]
    fn test_parse_mixed_ledger() {
        let range = sheet(&[
            vec![s("2024년 1기")],
            header(),
            vec![
                s("매출"),
                Data::Int(1),
                Data::Float(20240101.0),
                s("ACME"),
                Data::Float(1000.0),
                Data::Float(100.0),
                Data::Float(1100.0),
            ],
            vec![Data::Empty],
            vec![
                s("매입"),
                Data::Int(1),
                s("20240102"),
                s("Globex"),
                s("2,000"),
                s("200.7"),
                s("n/a"),
            ],
            vec![
                s("매출"),
                s("월계"),
                Data::Empty,
                Data::Empty,
                Data::Float(1000.0),
                Data::Float(100.0),
                Data::Float(1100.0),
            ],
        ]);

        let docs = parse_ledger_range(&range, "ACME_2024.xlsx").unwrap();
        assert_eq!(docs.len(), 2);

        let sales = &docs[0];
        assert_eq!(sales.kind, LedgerKind::Sales);
        assert_eq!(sales.records.len(), 2);
        assert_eq!(sales.records[0].label, "1");
        assert_eq!(sales.records[0].date, "20240101");
        assert_eq!(sales.records[0].amounts.total, 1100);
        assert_eq!(sales.records[1].kind, RowKind::Summary);
        assert_eq!(sales.date_range, "20240101 ~ 20240101");

        let purchase = &docs[1];
        assert_eq!(purchase.records[0].amounts.supply, 2000);
        assert_eq!(purchase.records[0].amounts.tax, 200);
        assert_eq!(purchase.records[0].amounts.total, 0);
    }

    #[test]
    fn test_missing_column_fails() {
        let range = sheet(&[vec![s("구분"), s("일자"), s("거래처"), s("공급가액")]]);
        assert!(matches!(
            parse_ledger_range(&range, "x.xlsx"),
            Err(JangbuError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_unreadable_bytes_fail() {
        assert!(matches!(
            read_ledger_workbook(b"not a workbook", "x.xlsx"),
            Err(JangbuError::Workbook(_))
        ));
    }

    #[test]
    fn test_amount_from_cell() {
        assert_eq!(amount_from_cell(None), 0);
        assert_eq!(amount_from_cell(Some(&Data::Empty)), 0);
        assert_eq!(amount_from_cell(Some(&Data::Float(99.9))), 99);
        assert_eq!(amount_from_cell(Some(&Data::Float(f64::NAN))), 0);
        assert_eq!(amount_from_cell(Some(&Data::Bool(true))), 0);
    }
}
