//! View-model behind a child's dashboard.
//!
//! The expense list and the totals snapshot are kept exactly as fetched.
//! Filters only decide which expenses are shown; totals always describe the
//! whole ledger.

use std::collections::BTreeSet;

use api_types::{
    Category, Currency,
    child::Child,
    expense::Expense,
    totals::TotalsSnapshot,
};
use engine::{convert_to_gbp, format_currency, format_currency_code};

/// A set of active toggles of one kind.
///
/// No active toggle means no constraint. Otherwise an item passes when it
/// matches any active toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterGroup<T: Ord> {
    active: BTreeSet<T>,
}

impl<T: Ord> Default for FilterGroup<T> {
    fn default() -> Self {
        Self {
            active: BTreeSet::new(),
        }
    }
}

impl<T: Ord> FilterGroup<T> {
    /// Flip `value`, returning whether it is now active.
    pub fn toggle(&mut self, value: T) -> bool {
        if self.active.remove(&value) {
            false
        } else {
            self.active.insert(value);
            true
        }
    }

    pub fn activate(&mut self, value: T) {
        self.active.insert(value);
    }

    pub fn is_active(&self, value: &T) -> bool {
        self.active.contains(value)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn admits(&self, value: &T) -> bool {
        self.active.is_empty() || self.active.contains(value)
    }
}

impl<T: Ord> FromIterator<T> for FilterGroup<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            active: iter.into_iter().collect(),
        }
    }
}

/// Category and currency filters. Groups combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub category: FilterGroup<Category>,
    pub currency: FilterGroup<Currency>,
}

impl Filters {
    pub fn matches(&self, expense: &Expense) -> bool {
        self.category.admits(&expense.category) && self.currency.admits(&expense.currency)
    }

    /// The expenses passing every group, in their original order.
    pub fn apply<'a>(&self, expenses: &'a [Expense]) -> Vec<&'a Expense> {
        expenses.iter().filter(|e| self.matches(e)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_empty() && self.currency.is_empty()
    }

    pub fn clear(&mut self) {
        self.category.clear();
        self.currency.clear();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyLine {
    pub currency: Currency,
    pub total: String,
    pub total_gbp: String,
}

/// Figures shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Headline {
    /// Everything spent, converted to GBP.
    pub grand_total_gbp: String,
    /// Raw sums across currencies, so shown without a symbol.
    pub cash: String,
    pub card: String,
    pub per_currency: Vec<CurrencyLine>,
}

#[derive(Debug, Clone)]
pub struct ChildDashboard {
    child_id: i32,
    child_name: String,
    expenses: Vec<Expense>,
    totals: TotalsSnapshot,
    pub filters: Filters,
}

impl ChildDashboard {
    /// `children` is only used to resolve the display name; an unknown id
    /// shows as "Child".
    pub fn new(
        child_id: i32,
        children: &[Child],
        expenses: Vec<Expense>,
        totals: TotalsSnapshot,
    ) -> Self {
        let child_name = children
            .iter()
            .find(|child| child.id == child_id)
            .map(|child| child.name.clone())
            .unwrap_or_else(|| "Child".to_string());

        Self {
            child_id,
            child_name,
            expenses,
            totals,
            filters: Filters::default(),
        }
    }

    pub fn child_id(&self) -> i32 {
        self.child_id
    }

    pub fn child_name(&self) -> &str {
        &self.child_name
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn totals(&self) -> &TotalsSnapshot {
        &self.totals
    }

    pub fn visible(&self) -> Vec<&Expense> {
        self.filters.apply(&self.expenses)
    }

    pub fn headline(&self) -> Headline {
        let totals = &self.totals;
        let per_currency = totals
            .currency_totals
            .iter()
            .map(|(currency, line)| CurrencyLine {
                currency: *currency,
                total: format_currency_code(line.total, Some(currency.as_str())),
                total_gbp: format_currency(line.total_gbp, engine::Currency::Gbp),
            })
            .collect();

        Headline {
            grand_total_gbp: format_currency(self.grand_total_gbp(), engine::Currency::Gbp),
            cash: format!("{:.2}", totals.total_cash),
            card: format!("{:.2}", totals.total_card),
            per_currency,
        }
    }

    /// Snapshots from servers without per-currency totals only carry
    /// `total_amount`, which was always recorded in MAD.
    fn grand_total_gbp(&self) -> f64 {
        if self.totals.currency_totals.is_empty() {
            convert_to_gbp(self.totals.total_amount)
        } else {
            self.totals.grand_total_gbp
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use api_types::totals::CurrencyTotal;
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};

    use super::*;

    fn date(day: u32) -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(2024, 7, day, 10, 0, 0)
            .unwrap()
            .fixed_offset()
    }

    fn expense(id: i32, amount: f64, category: Category, currency: Currency) -> Expense {
        Expense {
            id,
            amount,
            description: format!("expense {id}"),
            date: date(id as u32),
            child_id: 1,
            category,
            currency,
        }
    }

    fn ledger() -> Vec<Expense> {
        vec![
            expense(4, 50.0, Category::Cash, Currency::Mad),
            expense(3, 10.0, Category::Card, Currency::Gbp),
            expense(2, 7.0, Category::Cash, Currency::Eur),
            expense(1, 3.0, Category::Card, Currency::Mad),
        ]
    }

    fn ids(expenses: &[&Expense]) -> Vec<i32> {
        expenses.iter().map(|e| e.id).collect()
    }

    fn snapshot() -> TotalsSnapshot {
        let mut currency_totals = BTreeMap::new();
        currency_totals.insert(
            Currency::Gbp,
            CurrencyTotal {
                total: 10.0,
                total_gbp: 10.0,
            },
        );
        currency_totals.insert(
            Currency::Mad,
            CurrencyTotal {
                total: 53.0,
                total_gbp: 4.24,
            },
        );
        TotalsSnapshot {
            child_id: 1,
            total_amount: 70.0,
            total_cash: 57.0,
            total_card: 13.0,
            currency_totals,
            grand_total_gbp: 14.24,
        }
    }

    #[test]
    fn no_filters_show_everything() {
        let expenses = ledger();
        assert_eq!(ids(&Filters::default().apply(&expenses)), [4, 3, 2, 1]);
    }

    #[test]
    fn cash_only_keeps_exactly_the_cash_items() {
        let expenses = ledger();
        let mut filters = Filters::default();
        filters.category.activate(Category::Cash);

        let expected: Vec<&Expense> = expenses
            .iter()
            .filter(|e| e.category == Category::Cash)
            .collect();
        assert_eq!(filters.apply(&expenses), expected);
    }

    #[test]
    fn cash_filter_on_mixed_pair() {
        let expenses = vec![
            expense(1, 50.0, Category::Cash, Currency::Mad),
            expense(2, 10.0, Category::Card, Currency::Gbp),
        ];
        let filters = Filters {
            category: [Category::Cash].into_iter().collect(),
            ..Default::default()
        };
        let visible = filters.apply(&expenses);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].category, Category::Cash);
        assert_eq!(visible[0].amount, 50.0);
    }

    #[test]
    fn filters_within_a_group_are_alternatives() {
        let expenses = ledger();
        let filters = Filters {
            currency: [Currency::Gbp, Currency::Eur].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(ids(&filters.apply(&expenses)), [3, 2]);
    }

    #[test]
    fn groups_combine_with_and() {
        let expenses = ledger();
        let filters = Filters {
            category: [Category::Card].into_iter().collect(),
            currency: [Currency::Mad].into_iter().collect(),
        };
        assert_eq!(ids(&filters.apply(&expenses)), [1]);

        let filters = Filters {
            category: [Category::Cash].into_iter().collect(),
            currency: [Currency::Gbp].into_iter().collect(),
        };
        assert!(filters.apply(&expenses).is_empty());
    }

    #[test]
    fn filtered_list_is_an_ordered_subsequence() {
        let expenses = ledger();
        let mut filters = Filters::default();
        filters.category.activate(Category::Cash);
        let visible = filters.apply(&expenses);

        let mut rest = expenses.iter();
        for item in &visible {
            assert!(rest.any(|e| e == *item), "{} out of order", item.id);
        }
    }

    #[test]
    fn toggling_twice_restores_the_group() {
        let mut group = FilterGroup::default();
        assert!(group.toggle(Currency::Mad));
        assert!(group.is_active(&Currency::Mad));
        assert!(!group.admits(&Currency::Gbp));
        assert!(!group.toggle(Currency::Mad));
        assert!(group.is_empty());
        assert!(group.admits(&Currency::Gbp));
    }

    #[test]
    fn filtering_leaves_totals_untouched() {
        let mut dashboard = ChildDashboard::new(1, &[], ledger(), snapshot());
        let before = dashboard.totals().clone();

        dashboard.filters.category.activate(Category::Card);
        dashboard.filters.currency.activate(Currency::Gbp);
        assert_eq!(ids(&dashboard.visible()), [3]);
        assert_eq!(dashboard.totals(), &before);
        assert_eq!(dashboard.expenses().len(), 4);
    }

    #[test]
    fn headline_figures() {
        let children = [Child {
            id: 1,
            name: "Emma".to_string(),
        }];
        let dashboard = ChildDashboard::new(1, &children, ledger(), snapshot());
        assert_eq!(dashboard.child_name(), "Emma");

        let headline = dashboard.headline();
        assert_eq!(headline.grand_total_gbp, "£14.24");
        assert_eq!(headline.cash, "57.00");
        assert_eq!(headline.card, "13.00");
        assert_eq!(
            headline.per_currency[1],
            CurrencyLine {
                currency: Currency::Mad,
                total: "MAD 53.00".to_string(),
                total_gbp: "£4.24".to_string(),
            }
        );
    }

    #[test]
    fn unknown_child_and_legacy_snapshot() {
        let legacy = TotalsSnapshot {
            child_id: 9,
            total_amount: 100.0,
            ..Default::default()
        };
        let dashboard = ChildDashboard::new(9, &[], Vec::new(), legacy);
        assert_eq!(dashboard.child_name(), "Child");
        assert_eq!(dashboard.headline().grand_total_gbp, "£8.00");
    }
}
