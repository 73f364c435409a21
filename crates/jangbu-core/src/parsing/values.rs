/// Coerce a raw monetary cell into an integer amount.
///
/// Handles formats like:
/// - `None`, `""`, `"   "` -> 0
/// - `"1,234"` -> 1234
/// - `"1,234.9"` -> 1234 (truncated toward zero)
/// - `"-500.5"` -> -500
/// - `"1e3"` -> 1000
/// - `"abc"`, `"nan"`, `"inf"` -> 0
pub fn to_int(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 0;
    };
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return 0;
    }
    match cleaned.parse::<f64>() {
        Ok(f) => truncate_f64(f),
        Err(_) => 0,
    }
}

/// Truncate a float toward zero; NaN and infinities become 0.
pub fn truncate_f64(f: f64) -> i64 {
    if f.is_finite() {
        f.trunc() as i64
    } else {
        0
    }
}

/// Format an amount with `,` thousands separators: 1234567 -> "1,234,567".
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
