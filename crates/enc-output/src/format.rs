//! Number formatting for the text report.

/// Group the digits of a count in thousands: `12345` → `12,345`.
pub fn format_count(value: usize) -> String {
    group_thousands(&value.to_string())
}

/// Two decimals with thousands separators: `-1234.5` → `-1,234.50`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = format!("{}.{frac_part}", group_thousands(int_part));
    // Values that round to zero lose their sign.
    if value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn amounts() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(450.0), "450.00");
        assert_eq!(format_amount(12996.5), "12,996.50");
        assert_eq!(format_amount(-30.0), "-30.00");
        assert_eq!(format_amount(-1234567.891), "-1,234,567.89");
        assert_eq!(format_amount(-0.001), "0.00");
    }
}
