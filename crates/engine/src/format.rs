//! en-GB currency formatting.
//!
//! Output mirrors what a browser produces for `Intl.NumberFormat('en-GB')`
//! with `style: 'currency'`: symbol first, comma thousands separators, two
//! fraction digits, e.g. `£1,234.56`, `€50.00`, `MAD 50.00`, `-£10.00`.

use crate::Currency;

/// Formats `amount` (major units) in `currency`.
#[must_use]
pub fn format_currency(amount: f64, currency: Currency) -> String {
    format_with_prefix(amount, &prefix(currency.symbol()))
}

/// Formats `amount` for a textual currency code.
///
/// `None` uses the default currency (EUR). Codes that are not supported are
/// rendered with the upper-cased code as prefix, e.g. `USD 3.00`.
#[must_use]
pub fn format_currency_code(amount: f64, code: Option<&str>) -> String {
    let Some(code) = code else {
        return format_currency(amount, Currency::default());
    };
    match Currency::try_from(code) {
        Ok(currency) => format_currency(amount, currency),
        Err(_) => format_with_prefix(amount, &prefix(&code.trim().to_ascii_uppercase())),
    }
}

fn prefix(symbol: &str) -> String {
    if symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        format!("{symbol} ")
    } else {
        symbol.to_string()
    }
}

fn format_with_prefix(amount: f64, prefix: &str) -> String {
    if amount.is_nan() {
        return format!("{prefix}NaN");
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{sign}{prefix}∞");
    }

    // Saturating cast: amounts beyond u128 are not meaningful here.
    let minor = (amount.abs() * 100.0).round() as u128;
    let sign = if amount < 0.0 && minor != 0 { "-" } else { "" };
    let units = group_thousands(&(minor / 100).to_string());
    format!("{sign}{prefix}{units}.{:02}", minor % 100)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
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
    fn every_currency_carries_symbol_and_value() {
        for (currency, symbol) in [
            (Currency::Gbp, "£"),
            (Currency::Eur, "€"),
            (Currency::Mad, "MAD"),
        ] {
            let out = format_currency(100.0, currency);
            assert!(out.contains(symbol), "{out}");
            assert!(out.contains("100"), "{out}");
        }
    }

    #[test]
    fn en_gb_layout() {
        assert_eq!(format_currency(1234.5, Currency::Gbp), "£1,234.50");
        assert_eq!(format_currency(50.0, Currency::Mad), "MAD 50.00");
        assert_eq!(format_currency(-10.0, Currency::Gbp), "-£10.00");
        assert_eq!(format_currency(1_000_000.0, Currency::Eur), "€1,000,000.00");
        assert_eq!(format_currency(0.004, Currency::Eur), "€0.00");
        assert_eq!(format_currency(-0.001, Currency::Eur), "€0.00");
    }

    #[test]
    fn default_code_is_euro() {
        let out = format_currency_code(50.0, None);
        assert!(out.contains('€'));
        assert!(out.contains("50"));
    }

    #[test]
    fn unknown_code_falls_back_to_code_prefix() {
        assert_eq!(format_currency_code(3.0, Some("usd")), "USD 3.00");
        assert_eq!(format_currency_code(3.0, Some("gbp")), "£3.00");
    }

    #[test]
    fn non_finite_values_do_not_panic() {
        assert_eq!(format_currency(f64::NAN, Currency::Gbp), "£NaN");
        assert_eq!(format_currency(f64::NEG_INFINITY, Currency::Eur), "-€∞");
    }
}
