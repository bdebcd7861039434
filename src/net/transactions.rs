//! Transaction resource facade (`/transactions`).
//!
//! All list filtering is delegated to the backend through query parameters;
//! nothing is filtered client-side.

#[cfg(test)]
#[path = "transactions_test.rs"]
mod transactions_test;

use serde::de::IgnoredAny;

use super::categories::CategoryRegistry;
use super::client::{ApiClient, created_at_now};
use super::error::ApiError;
use super::query::Query;
use super::transport::Transport;
use super::types::{NewTransaction, Stamped, Transaction, TransactionPatch};

const TRANSACTIONS: &str = "/transactions";

fn transaction_endpoint(id: u64) -> String {
    format!("{TRANSACTIONS}/{id}")
}

pub struct TransactionApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> TransactionApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// List transactions, optionally only those owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns any request error.
    pub async fn get_all(&self, user_id: Option<u64>) -> Result<Vec<Transaction>, ApiError> {
        let endpoint = Query::new().with_opt("userId", user_id).endpoint(TRANSACTIONS);
        self.client.get(&endpoint).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 if the transaction does not exist.
    pub async fn get_by_id(&self, id: u64) -> Result<Transaction, ApiError> {
        self.client.get(&transaction_endpoint(id)).await
    }

    /// Create a transaction, stamping `createdAt`. The category label is sent
    /// as given; see [`TransactionApi::create_checked`] for the validated form.
    ///
    /// # Errors
    ///
    /// Returns any request error.
    pub async fn create(&self, data: &NewTransaction) -> Result<Transaction, ApiError> {
        self.client.post(TRANSACTIONS, &Stamped::new(data, created_at_now())).await
    }

    /// Create a transaction after resolving its category label and kind in
    /// `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownCategory`] without sending anything if the
    /// category does not resolve, otherwise any request error.
    pub async fn create_checked(
        &self,
        registry: &CategoryRegistry,
        data: &NewTransaction,
    ) -> Result<Transaction, ApiError> {
        registry
            .check_transaction(data)
            .inspect_err(|e| leptos::logging::warn!("transaction rejected: {e}"))?;
        self.create(data).await
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns any request error.
    pub async fn update(&self, id: u64, patch: &TransactionPatch) -> Result<Transaction, ApiError> {
        self.client.patch(&transaction_endpoint(id), patch).await
    }

    /// # Errors
    ///
    /// Returns any request error.
    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        let _: IgnoredAny = self.client.delete(&transaction_endpoint(id)).await?;
        Ok(())
    }

    /// Transactions dated within `[start, end]`, both bounds inclusive.
    ///
    /// # Errors
    ///
    /// Returns any request error.
    pub async fn get_by_date_range(
        &self,
        start: &str,
        end: &str,
        user_id: Option<u64>,
    ) -> Result<Vec<Transaction>, ApiError> {
        let endpoint = Query::new()
            .with("date_gte", start)
            .with("date_lte", end)
            .with_opt("userId", user_id)
            .endpoint(TRANSACTIONS);
        self.client.get(&endpoint).await
    }

    /// Transactions whose category label equals `category`.
    ///
    /// # Errors
    ///
    /// Returns any request error.
    pub async fn get_by_category(&self, category: &str, user_id: Option<u64>) -> Result<Vec<Transaction>, ApiError> {
        let endpoint = Query::new()
            .with("category", category)
            .with_opt("userId", user_id)
            .endpoint(TRANSACTIONS);
        self.client.get(&endpoint).await
    }
}
