use crate::error::JangbuError;
use crate::parsing::normalize::compact;

/// Rows searched for the header before giving up (title rows sit above it).
pub const HEADER_SEARCH_ROWS: usize = 10;

/// Column names the ledger workbook must carry.
pub const CLASSIFICATION: &str = "구분";
pub const DATE: &str = "일자";
pub const COUNTERPARTY: &str = "거래처";
pub const LABEL: &str = "번호";
pub const SUPPLY: &str = "공급가액";
pub const TAX: &str = "세액";
pub const TOTAL: &str = "합계";

/// Zero-based column index of every required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub classification: usize,
    pub date: usize,
    pub counterparty: usize,
    pub label: usize,
    pub supply: usize,
    pub tax: usize,
    pub total: usize,
}

/// Detect if a row looks like the ledger header row.
pub fn is_header_row(cells: &[String]) -> bool {
    let required = [CLASSIFICATION, DATE, COUNTERPARTY, SUPPLY, TAX, TOTAL];
    let count = required
        .iter()
        .filter(|name| cells.iter().any(|c| compact(c) == **name))
        .count();
    count >= 3
}

/// Find the header row within the first rows and map its columns.
///
/// Returns the header row index together with the column map. A row that
/// looks like a header but misses a column reports that column; a sheet
/// with no header-like row in reach reports `HeaderNotFound`.
pub fn locate_columns(rows: &[Vec<String>]) -> Result<(usize, ColumnMap), JangbuError> {
    let (header_idx, header) = rows
        .iter()
        .take(HEADER_SEARCH_ROWS)
        .enumerate()
        .find(|(_, cells)| is_header_row(cells))
        .ok_or(JangbuError::HeaderNotFound {
            searched: HEADER_SEARCH_ROWS,
        })?;

    let find = |name: &str| -> Result<usize, JangbuError> {
        header
            .iter()
            .position(|c| compact(c) == name)
            .ok_or_else(|| JangbuError::MissingColumn {
                column: name.to_string(),
            })
    };

    let map = ColumnMap {
        classification: find(CLASSIFICATION)?,
        date: find(DATE)?,
        counterparty: find(COUNTERPARTY)?,
        label: find(LABEL)?,
        supply: find(SUPPLY)?,
        tax: find(TAX)?,
        total: find(TOTAL)?,
    };
    Ok((header_idx, map))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_is_header_row() {
        assert!(is_header_row(&cells(&[
            "구분", "번호", "일자", "거래처", "공급가액", "세액", "합계"
        ])));
        assert!(!is_header_row(&cells(&["매출", "1", "20240101", "ACME"])));
    }

    #[test]
    fn test_locate_columns_below_title_rows() {
        let rows = vec![
            cells(&["2024년 1기 매출매입장"]),
            cells(&[]),
            cells(&["일자", "구분", "번호", "거래처", "공급 가액", "세액", "합계"]),
            cells(&["20240101", "매출", "1", "ACME", "1000", "100", "1100"]),
        ];
        let (idx, map) = locate_columns(&rows).unwrap();
        assert_eq!(idx, 2);
        assert_eq!(map.date, 0);
        assert_eq!(map.classification, 1);
        assert_eq!(map.supply, 4);
        assert_eq!(map.total, 6);
    }

    #[test]
    fn test_missing_column_is_named() {
        let rows = vec![cells(&["구분", "일자", "거래처", "공급가액", "세액", "합계"])];
        match locate_columns(&rows) {
            Err(JangbuError::MissingColumn { column }) => assert_eq!(column, LABEL),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn test_no_header_at_all() {
        let rows = vec![cells(&["a", "b"]), cells(&["c", "d"])];
        let err = locate_columns(&rows).unwrap_err();
        assert!(matches!(err, JangbuError::HeaderNotFound { searched: 10 }));
        assert!(err.to_string().contains("first 10 rows"));
    }

    #[test]
    fn test_header_below_search_window_not_found() {
        let mut rows = vec![cells(&["메모"]); HEADER_SEARCH_ROWS];
        rows.push(cells(&["구분", "번호", "일자", "거래처", "공급가액", "세액", "합계"]));
        assert!(matches!(
            locate_columns(&rows),
            Err(JangbuError::HeaderNotFound { .. })
        ));
    }
}
