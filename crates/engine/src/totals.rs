//! Spending totals of one child.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Category, Currency, EngineError, Expense, Money, ResultEngine};

/// Read model summarizing a child's expenses.
///
/// `total`, `cash` and `card` add amounts regardless of currency; the
/// per-currency breakdown and `grand_total_gbp` are what a reader should
/// rely on when several currencies are mixed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub child_id: i32,
    pub total: Money,
    pub cash: Money,
    pub card: Money,
    /// Always holds an entry for every supported currency.
    pub per_currency: BTreeMap<Currency, Money>,
}

impl Totals {
    pub fn empty(child_id: i32) -> Self {
        Self {
            child_id,
            total: Money::ZERO,
            cash: Money::ZERO,
            card: Money::ZERO,
            per_currency: Currency::ALL.into_iter().map(|c| (c, Money::ZERO)).collect(),
        }
    }

    /// Folds `expenses` into a snapshot for `child_id`.
    pub fn from_expenses<'a, I>(child_id: i32, expenses: I) -> ResultEngine<Self>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let overflow = || EngineError::InvalidAmount("total too large".to_string());

        expenses
            .into_iter()
            .try_fold(Self::empty(child_id), |mut acc, expense| {
                acc.total = acc.total.checked_add(expense.amount).ok_or_else(overflow)?;
                let bucket = match expense.category {
                    Category::Cash => &mut acc.cash,
                    Category::Card => &mut acc.card,
                };
                *bucket = bucket.checked_add(expense.amount).ok_or_else(overflow)?;
                let per_currency = acc.per_currency.entry(expense.currency).or_default();
                *per_currency = per_currency
                    .checked_add(expense.amount)
                    .ok_or_else(overflow)?;
                Ok(acc)
            })
    }

    /// Total of `currency`, zero when unused.
    pub fn in_currency(&self, currency: Currency) -> Money {
        self.per_currency.get(&currency).copied().unwrap_or_default()
    }

    /// Sum of every currency total converted with the fixed GBP rates.
    pub fn grand_total_gbp(&self) -> f64 {
        self.per_currency
            .iter()
            .map(|(currency, amount)| currency.to_gbp(amount.to_major()))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn expense(id: i32, minor: i64, category: Category, currency: Currency) -> Expense {
        Expense {
            id,
            child_id: 1,
            amount: Money::new(minor),
            description: format!("item {id}"),
            date: Utc.timestamp_opt(0, 0).unwrap(),
            category,
            currency,
        }
    }

    #[test]
    fn empty_snapshot_lists_every_currency() {
        let totals = Totals::from_expenses(7, &[]).unwrap();
        assert_eq!(totals.child_id, 7);
        assert_eq!(totals.per_currency.len(), 3);
        assert!(totals.total.is_zero());
        assert_eq!(totals.grand_total_gbp(), 0.0);
    }

    #[test]
    fn splits_by_category_and_currency() {
        let expenses = [
            expense(1, 5000, Category::Cash, Currency::Mad),
            expense(2, 1000, Category::Card, Currency::Gbp),
            expense(3, 2500, Category::Cash, Currency::Mad),
        ];
        let totals = Totals::from_expenses(1, &expenses).unwrap();

        assert_eq!(totals.total, Money::new(8500));
        assert_eq!(totals.cash, Money::new(7500));
        assert_eq!(totals.card, Money::new(1000));
        assert_eq!(totals.in_currency(Currency::Mad), Money::new(7500));
        assert_eq!(totals.in_currency(Currency::Gbp), Money::new(1000));
        assert_eq!(totals.in_currency(Currency::Eur), Money::ZERO);
        assert!((totals.grand_total_gbp() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn euros_convert_at_fixed_rate() {
        let expenses = [expense(1, 11500, Category::Card, Currency::Eur)];
        let totals = Totals::from_expenses(1, &expenses).unwrap();
        assert!((totals.grand_total_gbp() - 100.0).abs() < 1e-9);
    }
}
