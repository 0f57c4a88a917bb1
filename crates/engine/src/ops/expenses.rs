use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, Expense, ExpensePatch, NewExpense, ResultEngine, Totals,
    expenses,
    util::{normalize_description, positive_amount},
};

use super::{Engine, with_tx};

impl Engine {
    /// Expenses of `child_id`, newest first.
    pub async fn expenses_for_child(&self, child_id: i32) -> ResultEngine<Vec<Expense>> {
        self.require_child(&self.database, child_id).await?;
        self.load_expenses(&self.database, child_id).await
    }

    /// Totals snapshot of `child_id`, recomputed from the stored expenses.
    pub async fn child_totals(&self, child_id: i32) -> ResultEngine<Totals> {
        self.require_child(&self.database, child_id).await?;
        let expenses = self.load_expenses(&self.database, child_id).await?;
        Totals::from_expenses(child_id, &expenses)
    }

    /// Record a new expense for an existing child.
    pub async fn create_expense(&self, cmd: NewExpense) -> ResultEngine<Expense> {
        let NewExpense {
            child_id,
            amount,
            description,
            date,
            category,
            currency,
        } = cmd;
        let amount = positive_amount(amount)?;
        let description = normalize_description(&description)?;
        let category = category.unwrap_or_default();
        let currency = currency.unwrap_or_default();

        with_tx!(self, |db_tx| {
            self.require_child(&db_tx, child_id).await?;
            let model = expenses::ActiveModel {
                amount_minor: ActiveValue::Set(amount.minor()),
                description: ActiveValue::Set(description),
                category: ActiveValue::Set(category.as_str().to_string()),
                currency: ActiveValue::Set(currency.code().to_string()),
                date: ActiveValue::Set(date),
                child_id: ActiveValue::Set(child_id),
                ..Default::default()
            }
            .insert(&db_tx)
            .await?;

            tracing::debug!(
                expense_id = model.id,
                child_id,
                amount = %amount,
                currency = %currency,
                "expense created"
            );
            Expense::try_from(model)
        })
    }

    /// Apply a partial update to an expense. Last write wins.
    pub async fn update_expense(&self, id: i32, patch: ExpensePatch) -> ResultEngine<Expense> {
        let amount = patch.amount.map(positive_amount).transpose()?;
        let description = patch
            .description
            .as_deref()
            .map(normalize_description)
            .transpose()?;

        with_tx!(self, |db_tx| {
            let existing = self.require_expense(&db_tx, id).await?;
            if patch.is_empty() {
                return Expense::try_from(existing);
            }
            if let Some(child_id) = patch.child_id {
                self.require_child(&db_tx, child_id).await?;
            }

            let mut active: expenses::ActiveModel = existing.into();
            if let Some(amount) = amount {
                active.amount_minor = ActiveValue::Set(amount.minor());
            }
            if let Some(description) = description {
                active.description = ActiveValue::Set(description);
            }
            if let Some(category) = patch.category {
                active.category = ActiveValue::Set(category.as_str().to_string());
            }
            if let Some(currency) = patch.currency {
                active.currency = ActiveValue::Set(currency.code().to_string());
            }
            if let Some(date) = patch.date {
                active.date = ActiveValue::Set(date);
            }
            if let Some(child_id) = patch.child_id {
                active.child_id = ActiveValue::Set(child_id);
            }

            let model = active.update(&db_tx).await?;
            tracing::debug!(expense_id = model.id, "expense updated");
            Expense::try_from(model)
        })
    }

    /// Delete an expense.
    pub async fn delete_expense(&self, id: i32) -> ResultEngine<()> {
        let res = expenses::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if res.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("Expense".to_string()));
        }
        tracing::debug!(expense_id = id, "expense deleted");
        Ok(())
    }

    async fn load_expenses<C>(&self, db: &C, child_id: i32) -> ResultEngine<Vec<Expense>>
    where
        C: ConnectionTrait,
    {
        expenses::Entity::find()
            .filter(expenses::Column::ChildId.eq(child_id))
            .order_by_desc(expenses::Column::Date)
            .order_by_desc(expenses::Column::Id)
            .all(db)
            .await?
            .into_iter()
            .map(Expense::try_from)
            .collect()
    }

    async fn require_expense<C>(&self, db: &C, id: i32) -> ResultEngine<expenses::Model>
    where
        C: ConnectionTrait,
    {
        expenses::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("Expense".to_string()))
    }
}
