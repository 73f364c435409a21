pub mod canvas;
pub mod font;
pub mod layout;

use lopdf::content::Content;
use lopdf::{dictionary, Document, Object};

use crate::config::LayoutConfig;
use crate::error::JangbuError;
use crate::model::{LedgerDocument, LedgerRecord};
use crate::parsing::values::format_thousands;
use canvas::{GlyphEncoder, PageCanvas, FONT_RESOURCE};
use font::LedgerFont;
use layout::{plan_pages, truncate_chars, RowMarker, RowPlan};

pub const PDF_MIME: &str = "application/pdf";

const TITLE_SIZE: f32 = 16.0;
const META_SIZE: f32 = 10.0;
const HEADER_SIZE: f32 = 9.0;
const BODY_SIZE: f32 = 9.0;
const SUMMARY_SIZE: f32 = 8.0;

// Offsets from the top edge of the page.
const TITLE_TOP: f32 = 50.0;
const COMPANY_TOP: f32 = 80.0;
const PERIOD_TOP: f32 = 95.0;
const HEADER_RULE_TOP: f32 = 110.0;
const HEADER_TEXT_TOP: f32 = 124.0;
const HEADER_BOTTOM_RULE_TOP: f32 = 132.0;

// Rule offsets relative to a row baseline.
const RULE_BELOW: f32 = 8.0;
const RULE_ABOVE: f32 = 15.0;

const THICK_RULE: f32 = 1.2;
const BLOCK_RULE: f32 = 0.8;
const THIN_RULE: f32 = 0.3;
const LIGHT_GREY: f32 = 0.75;

/// Horizontal anchors of the table columns. Amount columns are right edges.
struct Columns {
    number: f32,
    date: f32,
    counterparty: f32,
    supply_right: f32,
    tax_right: f32,
    total_right: f32,
}

impl Columns {
    fn new(layout: &LayoutConfig) -> Self {
        let left = layout.margin_left;
        let right = layout.right_edge();
        Columns {
            number: left,
            date: left + 30.0,
            counterparty: left + 85.0,
            supply_right: right - 135.0,
            tax_right: right - 70.0,
            total_right: right,
        }
    }
}

/// Render a ledger document to PDF bytes.
pub fn render_ledger(
    document: &LedgerDocument,
    font: &LedgerFont,
    layout: &LayoutConfig,
) -> Result<Vec<u8>, JangbuError> {
    render(
        &document.records,
        &document.title,
        &document.date_range,
        &document.company,
        font,
        layout,
    )
}

/// Render records as a paginated journal: one page per `rows_per_page`
/// records, each with the title, company, period and page number on top.
pub fn render(
    records: &[LedgerRecord],
    title: &str,
    date_range: &str,
    company: &str,
    font: &LedgerFont,
    layout: &LayoutConfig,
) -> Result<Vec<u8>, JangbuError> {
    let pages = plan_pages(records, layout);
    if pages.is_empty() {
        return Err(JangbuError::EmptyLedger);
    }

    let mut encoder = GlyphEncoder::new(font)?;
    let columns = Columns::new(layout);
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.new_object_id();

    let mut page_ids = Vec::with_capacity(pages.len());
    for page in &pages {
        let mut canvas = PageCanvas::default();
        draw_page_header(
            &mut canvas,
            &mut encoder,
            layout,
            &columns,
            page.number,
            title,
            company,
            date_range,
        );
        for row in &page.rows {
            draw_row(&mut canvas, &mut encoder, layout, &columns, row);
        }

        let content = Content {
            operations: canvas.ops,
        };
        let encoded = content
            .encode()
            .map_err(|e| JangbuError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(lopdf::Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    encoder.write_font(&mut doc, font_id)?;

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::from(layout.page_width),
                Object::from(layout.page_height),
            ],
            "Resources" => dictionary! {
                "Font" => dictionary! { FONT_RESOURCE => font_id },
            },
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| JangbuError::Pdf(e.to_string()))?;

    tracing::debug!(
        title,
        company,
        records = records.len(),
        pages = page_ids.len(),
        bytes = output.len(),
        "rendered ledger"
    );
    Ok(output)
}

#[allow(clippy::too_many_arguments)]
fn draw_page_header(
    canvas: &mut PageCanvas,
    enc: &mut GlyphEncoder<'_>,
    layout: &LayoutConfig,
    columns: &Columns,
    page_number: usize,
    title: &str,
    company: &str,
    date_range: &str,
) {
    let top = layout.page_height;
    let left = layout.margin_left;
    let right = layout.right_edge();

    canvas.text_centered(enc, layout.page_width / 2.0, top - TITLE_TOP, TITLE_SIZE, title);
    canvas.text(enc, left, top - COMPANY_TOP, META_SIZE, &format!("상호: {company}"));
    canvas.text(enc, left, top - PERIOD_TOP, META_SIZE, &format!("기간: {date_range}"));
    canvas.text_right(enc, right, top - COMPANY_TOP, META_SIZE, &format!("페이지 {page_number}"));

    canvas.rule(left, right, top - HEADER_RULE_TOP, THICK_RULE, 0.0);
    let y = top - HEADER_TEXT_TOP;
    canvas.text(enc, columns.number, y, HEADER_SIZE, "No.");
    canvas.text(enc, columns.date, y, HEADER_SIZE, "일자");
    canvas.text(enc, columns.counterparty, y, HEADER_SIZE, "거래처");
    canvas.text_right(enc, columns.supply_right, y, HEADER_SIZE, "공급가액");
    canvas.text_right(enc, columns.tax_right, y, HEADER_SIZE, "세액");
    canvas.text_right(enc, columns.total_right, y, HEADER_SIZE, "합계");
    canvas.rule(left, right, top - HEADER_BOTTOM_RULE_TOP, THICK_RULE, 0.0);
}

fn draw_row(
    canvas: &mut PageCanvas,
    enc: &mut GlyphEncoder<'_>,
    layout: &LayoutConfig,
    columns: &Columns,
    row: &RowPlan<'_>,
) {
    let left = layout.margin_left;
    let right = layout.right_edge();
    let record = row.record;
    let y = row.y;

    match row.marker {
        RowMarker::Summary {
            rule_above,
            rule_below,
        } => {
            canvas.text(enc, columns.number, y, SUMMARY_SIZE, &record.summary_text());
            if rule_above {
                canvas.rule(left, right, y + RULE_ABOVE, BLOCK_RULE, 0.0);
            }
            if rule_below {
                canvas.rule(left, right, y - RULE_BELOW, BLOCK_RULE, 0.0);
            }
        }
        RowMarker::Numbered(number) => {
            canvas.text(enc, columns.number, y, BODY_SIZE, &number.to_string());
            canvas.text(enc, columns.date, y, BODY_SIZE, record.date.trim());
            let counterparty =
                truncate_chars(record.counterparty.trim(), layout.counterparty_max_chars);
            canvas.text(enc, columns.counterparty, y, BODY_SIZE, &counterparty);
            canvas.rule(left, right, y - RULE_BELOW, THIN_RULE, LIGHT_GREY);
        }
    }

    let amounts = record.amounts;
    canvas.text_right(enc, columns.supply_right, y, BODY_SIZE, &format_thousands(amounts.supply));
    canvas.text_right(enc, columns.tax_right, y, BODY_SIZE, &format_thousands(amounts.tax));
    canvas.text_right(enc, columns.total_right, y, BODY_SIZE, &format_thousands(amounts.total));
}
