//! Presentation formatting for numbers coming back from the backend.
//!
//! Values arrive as loosely typed JSON: numbers, numeric strings, nulls or
//! nothing at all. Everything that is not a finite number renders as the
//! [`MISSING`] sentinel. Applied only when building view-models.

use serde_json::Value;

/// Shown in place of any value that is missing or not numeric.
pub const MISSING: &str = "—";

const NUMBER_FRACTION_DIGITS: usize = 3;
const CURRENCY_FRACTION_DIGITS: usize = 2;

/// Coerce a JSON value to a finite number. Numeric strings are accepted
/// after trimming; null, empty strings, booleans and containers are not.
pub fn numeric(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// en-US grouped number with up to three fraction digits: `1,234.568`.
pub fn format_number(value: Option<&Value>) -> String {
    match numeric(value) {
        Some(n) => group(n, NUMBER_FRACTION_DIGITS, false),
        None => MISSING.to_string(),
    }
}

/// USD with exactly two fraction digits: `$1,234.50`, `-$3.00`.
pub fn format_currency(value: Option<&Value>) -> String {
    match numeric(value) {
        Some(n) => {
            let digits = group(n.abs(), CURRENCY_FRACTION_DIGITS, true);
            if n < 0.0 && digits.bytes().any(|b| (b'1'..=b'9').contains(&b)) {
                format!("-${}", digits)
            } else {
                format!("${}", digits)
            }
        }
        None => MISSING.to_string(),
    }
}

/// Grouped number followed by `%`: `42%`, `12.5%`.
pub fn format_percent(value: Option<&Value>) -> String {
    match numeric(value) {
        Some(n) => format!("{}%", group(n, NUMBER_FRACTION_DIGITS, false)),
        None => MISSING.to_string(),
    }
}

/// Round to `fraction_digits`, insert thousands separators. With
/// `fixed` the fraction keeps trailing zeros, otherwise they are trimmed.
fn group(n: f64, fraction_digits: usize, fixed: bool) -> String {
    let (int_part, frac_part) = round_half_away(n, fraction_digits);
    let int_part = int_part.as_str();
    let frac_part = frac_part.as_str();

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let fraction = if fixed { frac_part } else { frac_part.trim_end_matches('0') };
    if !fraction.is_empty() {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    let is_zero = !grouped.bytes().any(|b| (b'1'..=b'9').contains(&b));
    if n < 0.0 && !is_zero {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Integer and fraction digits of `|n|`, rounded half away from zero.
///
/// Rounding works on the shortest decimal form of the float rather than its
/// binary value, so ties behave the way browsers' `toLocaleString` does:
/// `0.125` gives `0.13`, `1.005` gives `1.01`. The fraction is zero-padded
/// to exactly `fraction_digits`.
fn round_half_away(n: f64, fraction_digits: usize) -> (String, String) {
    let shortest = n.abs().to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(fraction_digits))
        .collect();

    if frac_part.as_bytes().get(fraction_digits).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - fraction_digits;
    let text: String = digits.iter().map(|&d| d as char).collect();
    (text[..split].to_string(), text[split..].to_string())
}
