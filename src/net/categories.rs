//! Category resource facade (`/categories`) and the category registry used
//! to validate category references before writes.

#[cfg(test)]
#[path = "categories_test.rs"]
mod categories_test;

use super::client::ApiClient;
use super::error::ApiError;
use super::query::Query;
use super::transport::Transport;
use super::types::{Category, NewBudget, NewCategory, NewTransaction, TransactionKind};

const CATEGORIES: &str = "/categories";

pub struct CategoryApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> CategoryApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns any request error.
    pub async fn get_all(&self) -> Result<Vec<Category>, ApiError> {
        self.client.get(CATEGORIES).await
    }

    /// # Errors
    ///
    /// Returns any request error.
    pub async fn get_by_type(&self, kind: TransactionKind) -> Result<Vec<Category>, ApiError> {
        let endpoint = Query::new().with("type", kind.as_str()).endpoint(CATEGORIES);
        self.client.get(&endpoint).await
    }

    /// Create a category. Categories carry no `createdAt`.
    ///
    /// # Errors
    ///
    /// Returns any request error.
    pub async fn create(&self, data: &NewCategory) -> Result<Category, ApiError> {
        self.client.post(CATEGORIES, data).await
    }
}

/// Snapshot of known categories for resolving references at write time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Fetch the current category list.
    ///
    /// # Errors
    ///
    /// Returns any request error.
    pub async fn load<T: Transport>(client: &ApiClient<T>) -> Result<Self, ApiError> {
        Ok(Self::new(client.categories().get_all().await?))
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn find_by_id(&self, id: u64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str, kind: TransactionKind) -> Option<&Category> {
        self.categories.iter().find(|c| c.kind == kind && c.name == name)
    }

    /// Resolve the category a new transaction refers to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownCategory`] if no category of the
    /// transaction's kind carries its label.
    pub fn check_transaction(&self, data: &NewTransaction) -> Result<&Category, ApiError> {
        self.find_by_name(&data.category, data.kind)
            .ok_or_else(|| ApiError::UnknownCategory(format!("{} ({})", data.category, data.kind.as_str())))
    }

    /// Resolve the category a new budget refers to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownCategory`] if `category_id` is not registered.
    pub fn check_budget(&self, data: &NewBudget) -> Result<&Category, ApiError> {
        self.find_by_id(data.category_id)
            .ok_or_else(|| ApiError::UnknownCategory(format!("id {}", data.category_id)))
    }
}
