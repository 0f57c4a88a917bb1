//! Internal helpers for input validation.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so the engine enforces consistent invariants.

use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, Money, ResultEngine};

/// Trim and NFC-normalize a child name. Empty names are rejected.
pub(crate) fn normalize_child_name(value: &str) -> ResultEngine<String> {
    let normalized: String = value.trim().nfc().collect();
    if normalized.is_empty() {
        return Err(EngineError::InvalidName(
            "child name must not be empty".to_string(),
        ));
    }
    Ok(normalized)
}

/// Trim a description. Empty descriptions are rejected.
pub(crate) fn normalize_description(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidDescription(
            "description must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Convert a decimal amount into minor units, requiring it to be > 0 and at
/// most [`Money::MAX_AMOUNT`].
pub(crate) fn positive_amount(amount: f64) -> ResultEngine<Money> {
    let money = Money::from_major(amount)?;
    if !money.is_positive() {
        return Err(EngineError::InvalidAmount(
            "amount must be > 0".to_string(),
        ));
    }
    if money > Money::MAX_AMOUNT {
        return Err(EngineError::InvalidAmount(format!(
            "amount must be at most {}",
            Money::MAX_AMOUNT
        )));
    }
    Ok(money)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_names_are_composed() {
        let decomposed = "Zoe\u{0301}";
        let composed = normalize_child_name(&format!("  {decomposed} ")).unwrap();
        assert_eq!(composed, "Zo\u{00e9}");
        assert!(normalize_child_name("   ").is_err());
    }

    #[test]
    fn amounts_must_be_positive() {
        assert_eq!(positive_amount(12.5).unwrap().minor(), 1250);
        assert!(positive_amount(0.0).is_err());
        assert!(positive_amount(-3.0).is_err());
        assert!(positive_amount(0.001).is_err());
    }

    #[test]
    fn amounts_are_capped() {
        assert_eq!(positive_amount(1_000_000_000.0).unwrap(), Money::MAX_AMOUNT);
        assert_eq!(
            positive_amount(1_000_000_000.01),
            Err(EngineError::InvalidAmount(
                "amount must be at most 1000000000.00".to_string()
            ))
        );
        assert!(positive_amount(1e17).is_err());
    }

    #[test]
    fn blank_descriptions_are_rejected() {
        assert_eq!(normalize_description("  Museum ").unwrap(), "Museum");
        assert!(matches!(
            normalize_description(" \t "),
            Err(EngineError::InvalidDescription(_))
        ));
    }
}
