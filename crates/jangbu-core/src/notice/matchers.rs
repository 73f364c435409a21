use regex::Regex;
use std::sync::LazyLock;

use crate::parsing::normalize::compact;

/// Sales ledger line carrying the running total.
pub const SALES_TRIGGER: &str = "누계";
/// Purchase ledger line carrying the running total.
pub const PURCHASE_TRIGGER: &str = "누계매입";
/// Filing line with the amount due (or refunded), compared without spaces.
pub const REFUND_TRIGGER: &str = "차가감하여납부할세액";

static DIGIT_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9,]+").expect("valid digit-run pattern"));

/// Last-two-comma-groups rule.
///
/// Takes the last run of digits and commas on the line, splits it on
/// commas and, when there are at least two groups, joins the last two:
/// `"누계매출 1,234,567"` -> `"234,567"`. Lines without such a run, or whose
/// last run has no comma, yield `None`.
pub fn last_two_groups(line: &str) -> Option<String> {
    let last_run = DIGIT_RUNS.find_iter(line).last()?.as_str();
    let groups: Vec<&str> = last_run.split(',').collect();
    if groups.len() < 2 {
        return None;
    }
    Some(groups[groups.len() - 2..].join(","))
}

/// Every digit and comma on the line, concatenated as they appear.
pub fn digits_verbatim(line: &str) -> String {
    line.chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect()
}

pub fn is_sales_line(line: &str) -> bool {
    line.contains(SALES_TRIGGER)
}

pub fn is_purchase_line(line: &str) -> bool {
    line.contains(PURCHASE_TRIGGER)
}

pub fn is_refund_line(line: &str) -> bool {
    compact(line).contains(REFUND_TRIGGER)
}
