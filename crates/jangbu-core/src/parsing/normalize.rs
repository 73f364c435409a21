/// Keywords marking a subtotal or period-total row.
pub const SUMMARY_KEYWORDS: &[&str] = &["합계", "소계", "월계", "분기", "반기", "누계"];

/// Remove whitespace and bracket characters so "[ 월 계 ]" compares as "월계".
pub fn compact(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && !is_bracket(*c))
        .collect()
}

fn is_bracket(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | '<' | '>')
}

/// Whether a row with this label and counterparty is a summary row.
///
/// Only the compacted concatenation matters, so the split between the two
/// fields and any spacing or bracketing is irrelevant.
pub fn is_summary_text(label: &str, counterparty: &str) -> bool {
    let joined = compact(&format!("{label}{counterparty}"));
    SUMMARY_KEYWORDS.iter().any(|kw| joined.contains(kw))
}
