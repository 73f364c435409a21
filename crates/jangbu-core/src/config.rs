use crate::error::JangbuError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Page geometry and table metrics for rendered ledgers, in PDF points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub rows_per_page: usize,
    pub row_height: f32,
    /// Counterparty text on transaction rows is cut to this many characters.
    pub counterparty_max_chars: usize,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Baseline of the first table row, measured from the top edge.
    pub first_row_offset: f32,
    pub bottom_margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            page_width: 595.0,
            page_height: 842.0,
            rows_per_page: 26,
            row_height: 23.0,
            counterparty_max_chars: 25,
            margin_left: 40.0,
            margin_right: 40.0,
            first_row_offset: 150.0,
            bottom_margin: 40.0,
        }
    }
}

impl LayoutConfig {
    /// Baseline y of slot 0 (PDF origin is bottom-left).
    pub fn header_bottom(&self) -> f32 {
        self.page_height - self.first_row_offset
    }

    pub fn right_edge(&self) -> f32 {
        self.page_width - self.margin_right
    }
}

/// Load a layout from a JSON file. Missing keys fall back to the defaults.
pub fn load_layout(path: &Path) -> Result<LayoutConfig, JangbuError> {
    let content = std::fs::read_to_string(path).map_err(|e| JangbuError::LayoutLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let layout: LayoutConfig =
        serde_json::from_str(&content).map_err(|e| JangbuError::LayoutLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Validate that a layout can hold a full page of rows.
pub fn validate_layout(layout: &LayoutConfig) -> Result<(), JangbuError> {
    if layout.page_width <= 0.0 || layout.page_height <= 0.0 {
        return Err(JangbuError::LayoutInvalid(
            "page dimensions must be positive".into(),
        ));
    }

    if layout.rows_per_page == 0 {
        return Err(JangbuError::LayoutInvalid(
            "rows_per_page must be at least 1".into(),
        ));
    }

    if layout.row_height <= 0.0 {
        return Err(JangbuError::LayoutInvalid(
            "row_height must be positive".into(),
        ));
    }

    if layout.counterparty_max_chars == 0 {
        return Err(JangbuError::LayoutInvalid(
            "counterparty_max_chars must be at least 1".into(),
        ));
    }

    if layout.margin_left + layout.margin_right >= layout.page_width {
        return Err(JangbuError::LayoutInvalid(
            "horizontal margins leave no room for the table".into(),
        ));
    }

    let last_row = layout.header_bottom() - (layout.rows_per_page - 1) as f32 * layout.row_height;
    if last_row < layout.bottom_margin {
        return Err(JangbuError::LayoutInvalid(format!(
            "{} rows of height {} do not fit on the page (last row at y={:.1}, bottom margin {})",
            layout.rows_per_page, layout.row_height, last_row, layout.bottom_margin
        )));
    }

    Ok(())
}
