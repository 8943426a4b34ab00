mod api_tests;
mod balance_tests;

use crate::core::models::transaction::{Amount, Share, Transaction};
use crate::core::services::LedgerService;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

pub fn create_test_service() -> LedgerService<InMemoryStorage> {
    LedgerService::new(InMemoryStorage::new())
}

/// A transaction that passes validation, paid by `paid_by` in `group`.
pub fn transaction(group: Uuid, paid_by: Uuid, amount: Amount, paid_for: Vec<Share>) -> Transaction {
    Transaction {
        id: Uuid::new_v4(),
        group,
        paid_by,
        paid_for,
        amount,
        date: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single(),
        category: "food".to_string(),
        title: Some("Dinner".to_string()),
    }
}

pub fn users(count: usize) -> Vec<Uuid> {
    (0..count).map(|_| Uuid::new_v4()).collect()
}
