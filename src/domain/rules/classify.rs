use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::entities::dataset::BudgetRow;

static SIX_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6}$").expect("valid regex"));
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// Category of a row's KODE value. Drives totals and styling in every output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeClass {
    Empty,
    Text,
    SixDigit,
    Numeric,
}

/// Precedence matters: the letter check runs before the digit-length checks,
/// so `"12A456"` is text. Residual punctuation also lands in text.
pub fn classify(code: &str) -> CodeClass {
    let code = code.trim();
    if code.is_empty() {
        CodeClass::Empty
    } else if code.chars().any(char::is_alphabetic) {
        CodeClass::Text
    } else if SIX_DIGITS.is_match(code) {
        CodeClass::SixDigit
    } else if DIGITS.is_match(code) {
        CodeClass::Numeric
    } else {
        CodeClass::Text
    }
}

pub fn classify_row(row: &BudgetRow) -> CodeClass {
    classify(&row.kode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_follows_precedence() {
        assert_eq!(classify(""), CodeClass::Empty);
        assert_eq!(classify("   "), CodeClass::Empty);
        assert_eq!(classify("AB1234"), CodeClass::Text);
        assert_eq!(classify("12A456"), CodeClass::Text);
        assert_eq!(classify("123456"), CodeClass::SixDigit);
        assert_eq!(classify(" 123456 "), CodeClass::SixDigit);
        assert_eq!(classify("42"), CodeClass::Numeric);
        assert_eq!(classify("1234567"), CodeClass::Numeric);
        assert_eq!(classify("12.34"), CodeClass::Text);
        assert_eq!(classify("-"), CodeClass::Text);
    }

    #[test]
    fn six_digit_is_lexical_not_numeric() {
        assert_eq!(classify("000001"), CodeClass::SixDigit);
        assert_eq!(classify("1"), CodeClass::Numeric);
        assert_eq!(classify("123 456"), CodeClass::Text);
    }

    #[test]
    fn classify_is_stable_across_calls() {
        for code in ["", "x", "521211", "99", "#", "5212.11", "A.1"] {
            assert_eq!(classify(code), classify(code), "code {code:?}");
        }
    }
}
