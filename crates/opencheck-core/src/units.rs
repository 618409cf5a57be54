//! Engineering units and SI prefix handling.

/// Parse a SPICE-style value with optional SI suffix.
///
/// Supported suffixes (case-insensitive):
/// - T (tera, 1e12)
/// - G (giga, 1e9)
/// - MEG (mega, 1e6)
/// - K (kilo, 1e3)
/// - M (milli, 1e-3)
/// - MIL (1/1000 inch, 25.4e-6)
/// - U (micro, 1e-6)
/// - N (nano, 1e-9)
/// - P (pico, 1e-12)
/// - F (femto, 1e-15)
/// - A (atto, 1e-18)
///
/// Letters after the suffix are unit annotations and are ignored, so `10fF`
/// and `1kohm` parse as `1e-14` and `1e3`.
pub fn parse_value(s: &str) -> Option<f64> {
    let s = s.trim().to_uppercase();

    // Try to parse as plain number first
    if let Ok(v) = s.parse::<f64>() {
        return Some(v);
    }

    let num_end = numeric_prefix_len(&s);
    if num_end == 0 {
        return None;
    }

    let (num_str, suffix) = s.split_at(num_end);
    let value: f64 = num_str.parse().ok()?;

    if !suffix.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let multiplier = if suffix.starts_with("MEG") {
        1e6
    } else if suffix.starts_with("MIL") {
        25.4e-6
    } else {
        match suffix.chars().next() {
            Some('T') => 1e12,
            Some('G') => 1e9,
            Some('K') => 1e3,
            Some('M') => 1e-3,
            Some('U') => 1e-6,
            Some('N') => 1e-9,
            Some('P') => 1e-12,
            Some('F') => 1e-15,
            Some('A') => 1e-18,
            // Unit letters without a scale prefix (e.g. "100OHM", "5V")
            _ => 1.0,
        }
    };

    Some(value * multiplier)
}

/// Length of the leading decimal number, including an optional exponent.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let mantissa_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    if i == mantissa_start {
        return 0;
    }

    // Exponent only if followed by digits, so "1E" stays a bare number
    if i < bytes.len() && bytes[i] == b'E' {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let digits_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > digits_start {
            i = j;
        }
    }

    i
}
