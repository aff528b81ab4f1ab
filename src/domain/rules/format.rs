/// Groups the integer part with `.` separators and no decimals, e.g.
/// `1234567.5` → `"1.234.568"`. Rounding is half-to-even.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let digits = format!("{:.0}", value.abs());
    let negative = value.is_sign_negative() && digits.bytes().any(|b| b != b'0');

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Display form of HARGA/JUMLAH and of summary totals: null and zero are blank.
pub fn display_amount(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format_thousands(v),
        _ => String::new(),
    }
}

/// Display form of VOL. Fractions are truncated, not rounded.
pub fn display_volume(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format_thousands(v.trunc()),
        _ => String::new(),
    }
}

/// Shortest plain rendering of a number, without grouping.
pub fn format_plain(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_use_period_separator() {
        assert_eq!(format_thousands(1_000_000.0), "1.000.000");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1.000");
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(-1_234_567.0), "-1.234.567");
        assert_eq!(format_thousands(-0.4), "0");
        assert_eq!(format_thousands(2.5), "2");
        assert_eq!(format_thousands(3.5), "4");
    }

    #[test]
    fn zero_and_null_display_blank() {
        assert_eq!(display_amount(None), "");
        assert_eq!(display_amount(Some(0.0)), "");
        assert_eq!(display_amount(Some(25_000.0)), "25.000");
        assert_eq!(display_volume(Some(12.9)), "12");
        assert_eq!(display_volume(Some(1500.0)), "1.500");
        assert_eq!(display_volume(None), "");
    }

    #[test]
    fn plain_format_has_no_grouping() {
        assert_eq!(format_plain(1_000_000.0), "1000000");
        assert_eq!(format_plain(12.5), "12.5");
        assert_eq!(format_plain(1234.12345678), "1234.12345678");
        assert_eq!(format_plain(-0.0), "0");
        assert_eq!(format_plain(f64::NAN), "");
    }
}
