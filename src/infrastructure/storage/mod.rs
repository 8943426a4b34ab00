use crate::core::errors::LedgerError;
use crate::core::models::{group::Group, transaction::Transaction, user::User};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, LedgerError>;
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, LedgerError>;
    async fn save_user(&self, user: User) -> Result<(), LedgerError>;
    async fn delete_user(&self, user_id: Uuid) -> Result<bool, LedgerError>;

    /// All groups, or only those `member` belongs to.
    async fn list_groups(&self, member: Option<Uuid>) -> Result<Vec<Group>, LedgerError>;
    async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, LedgerError>;
    async fn save_group(&self, group: Group) -> Result<(), LedgerError>;
    /// Removes the group along with its transactions.
    async fn delete_group(&self, group_id: Uuid) -> Result<bool, LedgerError>;

    async fn get_transaction(&self, transaction_id: Uuid) -> Result<Option<Transaction>, LedgerError>;
    /// Transactions of a group, most recently created first.
    async fn list_group_transactions(&self, group_id: Uuid) -> Result<Vec<Transaction>, LedgerError>;
    async fn save_transaction(&self, transaction: Transaction) -> Result<(), LedgerError>;
    async fn delete_transaction(&self, transaction_id: Uuid) -> Result<bool, LedgerError>;

    /// Bumps the hit counter of `path` and returns the new count.
    async fn record_call(&self, path: &str) -> Result<u64, LedgerError>;
}

pub mod in_memory;
