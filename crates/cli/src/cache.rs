//! Read-through cache of the per-child queries.
//!
//! Mirrors what a front end keeps between renders: the child list, each
//! child's expenses and totals snapshot. Entries are dropped after a
//! successful mutation so the next read refetches them.

use std::collections::HashMap;

use api_types::{
    child::Child,
    expense::{Expense, ExpenseDeleted, ExpenseNew, ExpenseUpdate},
    totals::TotalsSnapshot,
};
use tokio::sync::RwLock;

use crate::{
    client::{Client, ClientError},
    session::AdminSession,
};

#[derive(Debug, Default)]
struct Entries {
    children: Option<Vec<Child>>,
    expenses: HashMap<i32, Vec<Expense>>,
    totals: HashMap<i32, TotalsSnapshot>,
}

#[derive(Debug)]
pub struct CachedClient {
    client: Client,
    entries: RwLock<Entries>,
}

impl CachedClient {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            entries: RwLock::new(Entries::default()),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn children(&self) -> Result<Vec<Child>, ClientError> {
        if let Some(children) = &self.entries.read().await.children {
            return Ok(children.clone());
        }
        let children = self.client.children().await?;
        self.entries.write().await.children = Some(children.clone());
        Ok(children)
    }

    pub async fn expenses(&self, child_id: i32) -> Result<Vec<Expense>, ClientError> {
        if let Some(expenses) = self.entries.read().await.expenses.get(&child_id) {
            return Ok(expenses.clone());
        }
        let expenses = self.client.expenses(child_id).await?;
        self.entries
            .write()
            .await
            .expenses
            .insert(child_id, expenses.clone());
        Ok(expenses)
    }

    pub async fn total(&self, child_id: i32) -> Result<TotalsSnapshot, ClientError> {
        if let Some(totals) = self.entries.read().await.totals.get(&child_id) {
            return Ok(totals.clone());
        }
        let totals = self.client.total(child_id).await?;
        self.entries
            .write()
            .await
            .totals
            .insert(child_id, totals.clone());
        Ok(totals)
    }

    pub async fn create_expense(
        &self,
        session: &AdminSession,
        payload: &ExpenseNew,
    ) -> Result<Expense, ClientError> {
        let expense = self.client.create_expense(session, payload).await?;
        self.invalidate(expense.child_id).await;
        Ok(expense)
    }

    /// The previous owner of the expense is unknown here, so every child is
    /// invalidated.
    pub async fn update_expense(
        &self,
        session: &AdminSession,
        id: i32,
        payload: &ExpenseUpdate,
    ) -> Result<Expense, ClientError> {
        let expense = self.client.update_expense(session, id, payload).await?;
        self.invalidate_all().await;
        Ok(expense)
    }

    pub async fn delete_expense(
        &self,
        session: &AdminSession,
        id: i32,
    ) -> Result<ExpenseDeleted, ClientError> {
        let deleted = self.client.delete_expense(session, id).await?;
        self.invalidate_all().await;
        Ok(deleted)
    }

    pub async fn invalidate(&self, child_id: i32) {
        let mut entries = self.entries.write().await;
        entries.expenses.remove(&child_id);
        entries.totals.remove(&child_id);
    }

    pub async fn invalidate_all(&self) {
        let mut entries = self.entries.write().await;
        entries.expenses.clear();
        entries.totals.clear();
    }

    #[cfg(test)]
    async fn is_cached(&self, child_id: i32) -> bool {
        let entries = self.entries.read().await;
        entries.expenses.contains_key(&child_id) || entries.totals.contains_key(&child_id)
    }
}
