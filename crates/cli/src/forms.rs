//! Local validation of the admin forms.
//!
//! Nothing here touches the network: a form that fails validation never
//! produces a request.

use std::str::FromStr;

use api_types::{
    Category, Currency,
    expense::{ExpenseNew, ExpenseUpdate},
    timestamp,
};
use chrono::{DateTime, Utc};
use engine::Money;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("All fields required")]
    MissingFields,
    #[error("Amount must be a positive number with at most two decimals")]
    InvalidAmount,
    #[error("Unknown currency: {0} (expected GBP, EUR or MAD)")]
    InvalidCurrency(String),
    #[error("Unknown category: {0} (expected cash or card)")]
    InvalidCategory(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Nothing to update")]
    NothingToUpdate,
}

pub fn parse_currency(raw: &str) -> Result<Currency, FormError> {
    let code = raw.trim();
    Currency::ALL
        .into_iter()
        .find(|currency| currency.as_str().eq_ignore_ascii_case(code))
        .ok_or_else(|| FormError::InvalidCurrency(raw.to_string()))
}

pub fn parse_category(raw: &str) -> Result<Category, FormError> {
    let name = raw.trim();
    Category::ALL
        .into_iter()
        .find(|category| category.as_str().eq_ignore_ascii_case(name))
        .ok_or_else(|| FormError::InvalidCategory(raw.to_string()))
}

fn parse_amount(raw: &str) -> Result<f64, FormError> {
    let amount = Money::from_str(raw.trim()).map_err(|_| FormError::InvalidAmount)?;
    if !amount.is_positive() {
        return Err(FormError::InvalidAmount);
    }
    Ok(amount.to_major())
}

/// The "add expense" form. Text fields hold what the user typed.
#[derive(Debug, Clone, Default)]
pub struct ExpenseForm {
    pub child_id: Option<i32>,
    pub amount: String,
    pub description: String,
    pub category: Category,
    pub currency: Currency,
}

impl ExpenseForm {
    /// Build the request body, dated `now`.
    pub fn into_request(self, now: DateTime<Utc>) -> Result<ExpenseNew, FormError> {
        let description = self.description.trim();
        let (Some(child_id), false, false) =
            (self.child_id, self.amount.trim().is_empty(), description.is_empty())
        else {
            return Err(FormError::MissingFields);
        };

        Ok(ExpenseNew {
            child_id,
            amount: parse_amount(&self.amount)?,
            description: description.to_string(),
            date: now.fixed_offset(),
            category: Some(self.category),
            currency: Some(self.currency),
        })
    }
}

/// The "edit expense" form. Only the fields given are sent.
#[derive(Debug, Clone, Default)]
pub struct ExpenseEditForm {
    pub amount: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub currency: Option<Currency>,
    pub date: Option<String>,
    pub child_id: Option<i32>,
}

impl ExpenseEditForm {
    pub fn into_request(self) -> Result<ExpenseUpdate, FormError> {
        let amount = match self.amount {
            Some(raw) if raw.trim().is_empty() => return Err(FormError::MissingFields),
            Some(raw) => Some(parse_amount(&raw)?),
            None => None,
        };
        let description = match self.description {
            Some(raw) if raw.trim().is_empty() => return Err(FormError::MissingFields),
            Some(raw) => Some(raw.trim().to_string()),
            None => None,
        };
        let date = match self.date {
            Some(raw) => {
                Some(timestamp::parse(&raw).ok_or_else(|| FormError::InvalidDate(raw.clone()))?)
            }
            None => None,
        };

        let update = ExpenseUpdate {
            amount,
            description,
            category: self.category,
            currency: self.currency,
            date,
            child_id: self.child_id,
        };
        let empty = update.amount.is_none()
            && update.description.is_none()
            && update.category.is_none()
            && update.currency.is_none()
            && update.date.is_none()
            && update.child_id.is_none();
        if empty {
            return Err(FormError::NothingToUpdate);
        }
        Ok(update)
    }
}
