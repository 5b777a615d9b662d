//! Number formatting and lenient parsing for the display.

/// Format a number the way the display shows it.
///
/// Uses the shortest representation that parses back to the same value,
/// so whole numbers carry no fraction (`8`, not `8.0`). Negative zero
/// prints as `0`, and non-finite values print as `NaN`, `Infinity` or
/// `-Infinity`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Parse the leading number of `input`, ignoring whatever follows it.
///
/// Leading whitespace and a single sign are accepted, then digits with
/// at most one decimal point. Parsing stops at the first other
/// character, so `"5+3"` reads as `5`. Text that starts with `NaN` or
/// `Infinity` reads as that value. When no digit is found the result is
/// `NaN`; this never fails.
pub fn parse_number(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    if unsigned.starts_with("Infinity") {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let mut end = 0;
    let mut digits = 0;
    let mut decimal = false;
    for c in unsigned.chars() {
        if c.is_ascii_digit() {
            digits += 1;
        } else if c == '.' && !decimal {
            decimal = true;
        } else {
            break;
        }
        end += 1;
    }

    if digits == 0 {
        return f64::NAN;
    }

    let magnitude = unsigned[..end].parse::<f64>().unwrap_or(f64::NAN);
    if negative { -magnitude } else { magnitude }
}
