//! en-US display strings shared by the list filter and the terminal output.

use std::sync::OnceLock;

use chrono::NaiveDate;
use numfmt::{Formatter, Precision};
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};

/// Formats `amount` as US dollars, e.g. `$1,234.50` or `-$0.99`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    // Cents are taken from the decimal so that only whole dollars go through f64.
    let dollars = rounded.trunc().to_f64().unwrap_or_default();
    let cents = (rounded.fract() * Decimal::ONE_HUNDRED)
        .to_u32()
        .unwrap_or_default();

    format!(
        "{sign}${}.{cents:02}",
        thousands_separator_formatter().fmt_string(dollars)
    )
}

/// Formats `date` as `MM/DD/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

fn thousands_separator_formatter() -> &'static Formatter {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    FORMATTER.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .unwrap()
            .precision(Precision::Decimals(0))
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn formats_currency() {
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(5)), "$5.00");
        assert_eq!(format_currency(dec!(999.9)), "$999.90");
        assert_eq!(format_currency(dec!(1000)), "$1,000.00");
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(-260)), "-$260.00");
        assert_eq!(format_currency(dec!(9999999999999.99)), "$9,999,999,999,999.99");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec!(2.005)), "$2.01");
        assert_eq!(format_currency(dec!(-2.005)), "-$2.01");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn formats_dates_month_first() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        assert_eq!(format_date(date), "02/01/2024");
    }
}
