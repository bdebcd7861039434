use super::*;
use crate::net::test_helpers::{MemoryBackend, client_with};
use crate::net::transport::HttpMethod;
use crate::net::types::{BudgetPeriod, Category, TransactionKind};
use serde_json::json;

fn seeded_backend() -> MemoryBackend {
    MemoryBackend::new().with_collection(
        "budgets",
        vec![
            json!({"id": 1, "userId": 1, "categoryId": 2, "amount": 300.0, "period": "monthly",
                   "startDate": "2024-01-01", "endDate": "2024-01-31", "createdAt": "2024-01-01T00:00:00Z"}),
            json!({"id": 2, "userId": 2, "categoryId": 3, "amount": 9000.0, "period": "yearly",
                   "startDate": "2024-01-01", "endDate": "2024-12-31", "createdAt": "2024-01-01T00:00:00Z"}),
        ],
    )
}

fn new_budget(category_id: u64) -> NewBudget {
    NewBudget {
        user_id: 1,
        category_id,
        amount: 120.0,
        period: BudgetPeriod::Monthly,
        start_date: "2024-02-01".to_owned(),
        end_date: "2024-02-29".to_owned(),
    }
}

#[tokio::test]
async fn get_all_optionally_filters_by_owner() {
    let client = client_with(seeded_backend());
    assert_eq!(client.budgets().get_all(None).await.unwrap().len(), 2);
    let mine = client.budgets().get_all(Some(2)).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].period, BudgetPeriod::Yearly);
}

#[tokio::test]
async fn create_stamps_created_at() {
    let client = client_with(seeded_backend());
    let created = client.budgets().create(&new_budget(2)).await.unwrap();
    assert_eq!(created.id, 3);
    assert!(!created.created_at.is_empty());
    assert_eq!(client.budgets().get_by_id(3).await.unwrap(), created);
}

#[tokio::test]
async fn update_patches_and_delete_removes() {
    let client = client_with(seeded_backend());
    let patch = BudgetPatch { period: Some(BudgetPeriod::Yearly), ..BudgetPatch::default() };
    let updated = client.budgets().update(1, &patch).await.unwrap();
    assert_eq!(updated.period, BudgetPeriod::Yearly);
    assert_eq!(client.transport().last_request().method, HttpMethod::Patch);

    client.budgets().delete(1).await.unwrap();
    assert_eq!(client.budgets().get_by_id(1).await.unwrap_err().status(), Some(404));
}

#[tokio::test]
async fn create_checked_rejects_unregistered_category() {
    let client = client_with(seeded_backend());
    let registry = CategoryRegistry::new(vec![Category {
        id: 2,
        name: "Food".to_owned(),
        kind: TransactionKind::Expense,
        color: "#a00".to_owned(),
        icon: "utensils".to_owned(),
    }]);

    assert!(client.budgets().create_checked(&registry, &new_budget(2)).await.is_ok());
    let before = client.transport().request_count();
    let err = client.budgets().create_checked(&registry, &new_budget(7)).await.unwrap_err();
    assert!(matches!(err, ApiError::UnknownCategory(_)));
    assert_eq!(client.transport().request_count(), before);
}
