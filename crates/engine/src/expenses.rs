//! Expense primitives.
//!
//! An `Expense` is a single spending record of one child, tagged with the
//! payment category and the currency it was paid in.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Category, Currency, Money, ResultEngine};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i32,
    pub child_id: i32,
    pub amount: Money,
    pub description: String,
    pub date: DateTime<Utc>,
    pub category: Category,
    pub currency: Currency,
}

impl TryFrom<Model> for Expense {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: model.id,
            child_id: model.child_id,
            amount: Money::new(model.amount_minor),
            description: model.description,
            date: model.date,
            category: Category::try_from(model.category.as_str())?,
            currency: Currency::try_from(model.currency.as_str())?,
        })
    }
}

/// Input for [`Engine::create_expense`](crate::Engine::create_expense).
#[derive(Clone, Debug)]
pub struct NewExpense {
    pub child_id: i32,
    /// Major units, must be > 0.
    pub amount: f64,
    pub description: String,
    pub date: DateTime<Utc>,
    /// Defaults to cash.
    pub category: Option<Category>,
    /// Defaults to EUR.
    pub currency: Option<Currency>,
}

/// Partial update for [`Engine::update_expense`](crate::Engine::update_expense).
///
/// `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default)]
pub struct ExpensePatch {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub currency: Option<Currency>,
    pub date: Option<DateTime<Utc>>,
    pub child_id: Option<i32>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.currency.is_none()
            && self.date.is_none()
            && self.child_id.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub amount_minor: i64,
    pub description: String,
    pub category: String,
    pub currency: String,
    pub date: DateTimeUtc,
    pub child_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::children::Entity",
        from = "Column::ChildId",
        to = "super::children::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Child,
}

impl Related<super::children::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Child.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
