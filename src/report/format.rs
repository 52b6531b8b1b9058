//! Number and date formatting for printed reports.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount to 2 decimals with thousands separators, e.g. `PHP 1,234.50`.
pub fn format_money(amount: Decimal, currency: &str) -> String {
    format!("{} {}", currency, group_thousands(amount))
}

/// Formats a quantity to 2 decimals without grouping.
pub fn format_quantity(value: Decimal) -> String {
    format!("{:.2}", round2(value))
}

/// Formats a date as `January 01, 2026`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn group_thousands(amount: Decimal) -> String {
    let rounded = round2(amount);
    let text = format!("{:.2}", rounded.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, fraction)
}
