use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{ReportError, Result};

fn currency_patterns() -> &'static [Regex; 3] {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"^[0-9]+$").expect("static regex"),
            Regex::new(r"^[0-9]+\.$").expect("static regex"),
            Regex::new(r"^[0-9]+\.[0-9]?[0-9]?$").expect("static regex"),
        ]
    })
}

/// Balance input contract: empty, digits, digits with a bare trailing point,
/// or digits with one or two decimals.
pub fn is_currency(value: &str) -> bool {
    value.is_empty() || currency_patterns().iter().any(|re| re.is_match(value))
}

/// Parse a balance that passed `is_currency`. Empty is zero; the written
/// scale is kept so "1000.00" renders back as "1000.00".
pub fn parse_balance(value: &str) -> Result<Decimal> {
    if !is_currency(value) {
        return Err(ReportError::InvalidBalance(value.to_string()));
    }
    let trimmed = value.strip_suffix('.').unwrap_or(value);
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(trimmed).map_err(|_| ReportError::InvalidBalance(value.to_string()))
}

/// Dollars with thousands separators: $1,234.56. Anything that rounds to
/// zero cents prints unsigned.
pub fn money(val: Decimal) -> String {
    let cents = val.abs().round_dp(2);
    let text = format!("{cents:.2}");
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.char_indices() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if val.is_sign_negative() && !cents.is_zero() { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}
