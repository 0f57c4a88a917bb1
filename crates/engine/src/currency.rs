use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Fixed MAD → GBP rate used for the headline figure.
pub const MAD_TO_GBP_RATE: f64 = 0.08;

/// 1 GBP = 1.15 EUR.
pub const GBP_TO_EUR_RATE: f64 = 1.15;

/// ISO currency code of an expense.
///
/// All supported currencies use 2 minor units, so `10.50 MAD` ⇄ `1050`.
/// Conversion to GBP uses fixed rates: there is no rate feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Gbp,
    #[default]
    Eur,
    Mad,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Gbp, Currency::Eur, Currency::Mad];

    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
            Currency::Mad => "MAD",
        }
    }

    /// Symbol used by the en-GB formatter.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Gbp => "£",
            Currency::Eur => "€",
            Currency::Mad => "MAD",
        }
    }

    /// How many GBP one unit of this currency is worth.
    #[must_use]
    pub fn rate_to_gbp(self) -> f64 {
        match self {
            Currency::Gbp => 1.0,
            Currency::Eur => 1.0 / GBP_TO_EUR_RATE,
            Currency::Mad => MAD_TO_GBP_RATE,
        }
    }

    /// Converts `amount` (major units of `self`) into GBP.
    #[must_use]
    pub fn to_gbp(self, amount: f64) -> f64 {
        amount * self.rate_to_gbp()
    }
}

/// Converts an amount in MAD into GBP. No rounding is applied.
#[must_use]
pub fn convert_to_gbp(amount_mad: f64) -> f64 {
    amount_mad * MAD_TO_GBP_RATE
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GBP" => Ok(Currency::Gbp),
            "EUR" => Ok(Currency::Eur),
            "MAD" => Ok(Currency::Mad),
            other => Err(EngineError::InvalidCurrency(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_mad_is_eight_pounds() {
        assert_eq!(convert_to_gbp(100.0), 8.0);
        assert_eq!(Currency::Mad.to_gbp(100.0), 8.0);
    }

    #[test]
    fn euro_uses_inverse_rate() {
        let gbp = Currency::Eur.to_gbp(115.0);
        assert!((gbp - 100.0).abs() < 1e-9);
        assert_eq!(Currency::Gbp.to_gbp(12.5), 12.5);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Currency::try_from(" mad "), Ok(Currency::Mad));
        assert_eq!(Currency::try_from("gbp"), Ok(Currency::Gbp));
        assert!(Currency::try_from("USD").is_err());
    }
}
