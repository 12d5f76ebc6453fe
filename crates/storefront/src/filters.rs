//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Formats an amount in rupees with Indian digit grouping.
///
/// The fractional part is preserved as-is, so whole-rupee prices render
/// without decimals: `299` becomes `₹299`, `1047` becomes `₹1,047`, and
/// `1235.46` becomes `₹1,235.46`.
///
/// Usage in templates: `{{ product.price|rupees }}`
#[askama::filter_fn]
pub fn rupees(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_inr(&value.to_string()))
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Apply Indian digit grouping (last three digits, then pairs) to a plain
/// decimal string and prefix the rupee sign.
fn format_inr(amount: &str) -> String {
    let (int_part, frac_part) = amount.split_once('.').map_or((amount, ""), |(i, f)| (i, f));
    let (sign, digits) = int_part
        .strip_prefix('-')
        .map_or(("", int_part), |rest| ("-", rest));

    let grouped = group_indian(digits);

    let mut out = String::with_capacity(grouped.len() + frac_part.len() + 4);
    out.push_str(sign);
    out.push('₹');
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Group an unsigned digit string Indian-style: `1234567` -> `12,34,567`.
fn group_indian(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    if chars.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = chars.split_at(chars.len() - 3);
    let mut groups: Vec<String> = head
        .rchunks(2)
        .rev()
        .map(|chunk| chunk.iter().collect())
        .collect();
    groups.push(tail.iter().collect());
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts_are_ungrouped() {
        assert_eq!(format_inr("0"), "₹0");
        assert_eq!(format_inr("299"), "₹299");
        assert_eq!(format_inr("999"), "₹999");
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_inr("1047"), "₹1,047");
        assert_eq!(format_inr("12345"), "₹12,345");
    }

    #[test]
    fn test_lakhs_and_crores_grouping() {
        assert_eq!(format_inr("100000"), "₹1,00,000");
        assert_eq!(format_inr("1234567"), "₹12,34,567");
        assert_eq!(format_inr("12345678"), "₹1,23,45,678");
    }

    #[test]
    fn test_fractional_part_is_preserved() {
        assert_eq!(format_inr("1235.46"), "₹1,235.46");
        assert_eq!(format_inr("188.46"), "₹188.46");
        assert_eq!(format_inr("94.23"), "₹94.23");
    }

    #[test]
    fn test_negative_amounts_keep_the_sign_outside() {
        assert_eq!(format_inr("-1047.50"), "-₹1,047.50");
    }
}
