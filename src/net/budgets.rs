//! Budget resource facade (`/budgets`).

#[cfg(test)]
#[path = "budgets_test.rs"]
mod budgets_test;

use serde::de::IgnoredAny;

use super::categories::CategoryRegistry;
use super::client::{ApiClient, created_at_now};
use super::error::ApiError;
use super::query::Query;
use super::transport::Transport;
use super::types::{Budget, BudgetPatch, NewBudget, Stamped};

const BUDGETS: &str = "/budgets";

fn budget_endpoint(id: u64) -> String {
    format!("{BUDGETS}/{id}")
}

pub struct BudgetApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> BudgetApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns any request error.
    pub async fn get_all(&self, user_id: Option<u64>) -> Result<Vec<Budget>, ApiError> {
        let endpoint = Query::new().with_opt("userId", user_id).endpoint(BUDGETS);
        self.client.get(&endpoint).await
    }

    /// # Errors
    ///
    /// Returns any request error.
    pub async fn get_by_id(&self, id: u64) -> Result<Budget, ApiError> {
        self.client.get(&budget_endpoint(id)).await
    }

    /// Create a budget, stamping `createdAt`.
    ///
    /// # Errors
    ///
    /// Returns any request error.
    pub async fn create(&self, data: &NewBudget) -> Result<Budget, ApiError> {
        self.client.post(BUDGETS, &Stamped::new(data, created_at_now())).await
    }

    /// Create a budget after checking its `categoryId` against `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownCategory`] without sending anything if the
    /// category id is not registered, otherwise any request error.
    pub async fn create_checked(&self, registry: &CategoryRegistry, data: &NewBudget) -> Result<Budget, ApiError> {
        registry
            .check_budget(data)
            .inspect_err(|e| leptos::logging::warn!("budget rejected: {e}"))?;
        self.create(data).await
    }

    /// # Errors
    ///
    /// Returns any request error.
    pub async fn update(&self, id: u64, patch: &BudgetPatch) -> Result<Budget, ApiError> {
        self.client.patch(&budget_endpoint(id), patch).await
    }

    /// # Errors
    ///
    /// Returns any request error.
    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        let _: IgnoredAny = self.client.delete(&budget_endpoint(id)).await?;
        Ok(())
    }
}
