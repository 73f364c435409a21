use crate::config::LayoutConfig;
use crate::model::LedgerRecord;

/// One page of rows, with every row's position and decoration decided.
#[derive(Debug, Clone)]
pub struct PagePlan<'a> {
    /// 1-based page number.
    pub number: usize,
    pub rows: Vec<RowPlan<'a>>,
}

#[derive(Debug, Clone)]
pub struct RowPlan<'a> {
    pub record: &'a LedgerRecord,
    /// Position of the record in the whole document.
    pub index: usize,
    /// Position within the page, 0-based.
    pub slot: usize,
    /// Text baseline.
    pub y: f32,
    pub marker: RowMarker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMarker {
    /// Transaction row with its running number (1-based, document-wide).
    Numbered(usize),
    /// Summary row; consecutive summary rows share one ruled block.
    Summary { rule_above: bool, rule_below: bool },
}

pub fn page_count(records: usize, rows_per_page: usize) -> usize {
    records.div_ceil(rows_per_page.max(1))
}

/// Lay the records out on pages of `rows_per_page`.
///
/// Page breaks are positional only. The running number counts transaction
/// rows and carries over page breaks. Summary neighbours are looked up in
/// document order, so a block split by a page break keeps its inner edge
/// unruled.
pub fn plan_pages<'a>(records: &'a [LedgerRecord], layout: &LayoutConfig) -> Vec<PagePlan<'a>> {
    let per_page = layout.rows_per_page.max(1);
    let top = layout.header_bottom();
    let summary_at = |i: Option<usize>| i.and_then(|i| records.get(i)).is_some_and(|r| r.is_summary());

    let mut counter = 0usize;
    let mut pages = Vec::with_capacity(page_count(records.len(), per_page));

    for (page_idx, window) in records.chunks(per_page).enumerate() {
        let mut rows = Vec::with_capacity(window.len());
        for (slot, record) in window.iter().enumerate() {
            let index = page_idx * per_page + slot;
            let marker = if record.is_summary() {
                RowMarker::Summary {
                    rule_above: !summary_at(index.checked_sub(1)),
                    rule_below: !summary_at(Some(index + 1)),
                }
            } else {
                counter += 1;
                RowMarker::Numbered(counter)
            };
            rows.push(RowPlan {
                record,
                index,
                slot,
                y: top - slot as f32 * layout.row_height,
                marker,
            });
        }
        pages.push(PagePlan {
            number: page_idx + 1,
            rows,
        });
    }

    pages
}

/// First `max_chars` characters of `s` (characters, not bytes).
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
