use crate::core::errors::LedgerError;
use crate::core::models::{group::Group, transaction::Transaction, user::User};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    groups: Arc<RwLock<HashMap<Uuid, Group>>>,
    // Kept in insertion order so listings can go newest first.
    transactions: Arc<RwLock<Vec<Transaction>>>,
    calls: Arc<RwLock<HashMap<String, u64>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn list_users(&self) -> Result<Vec<User>, LedgerError> {
        let users = self.users.read().await;
        let mut listed: Vec<User> = users.values().cloned().collect();
        listed.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(listed)
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, LedgerError> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }

    async fn save_user(&self, user: User) -> Result<(), LedgerError> {
        let mut users = self.users.write().await;
        users.insert(user.id, user);
        Ok(())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<bool, LedgerError> {
        let mut users = self.users.write().await;
        Ok(users.remove(&user_id).is_some())
    }

    async fn list_groups(&self, member: Option<Uuid>) -> Result<Vec<Group>, LedgerError> {
        let groups = self.groups.read().await;
        let mut listed: Vec<Group> = groups
            .values()
            .filter(|g| member.is_none_or(|user_id| g.has_member(user_id)))
            .cloned()
            .collect();
        listed.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(listed)
    }

    async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, LedgerError> {
        let groups = self.groups.read().await;
        Ok(groups.get(&group_id).cloned())
    }

    async fn save_group(&self, group: Group) -> Result<(), LedgerError> {
        let mut groups = self.groups.write().await;
        groups.insert(group.id, group);
        Ok(())
    }

    async fn delete_group(&self, group_id: Uuid) -> Result<bool, LedgerError> {
        let mut groups = self.groups.write().await;
        let removed = groups.remove(&group_id).is_some();
        if removed {
            let mut transactions = self.transactions.write().await;
            transactions.retain(|t| t.group != group_id);
        }
        Ok(removed)
    }

    async fn get_transaction(&self, transaction_id: Uuid) -> Result<Option<Transaction>, LedgerError> {
        let transactions = self.transactions.read().await;
        Ok(transactions.iter().find(|t| t.id == transaction_id).cloned())
    }

    async fn list_group_transactions(&self, group_id: Uuid) -> Result<Vec<Transaction>, LedgerError> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .iter()
            .rev()
            .filter(|t| t.group == group_id)
            .cloned()
            .collect())
    }

    async fn save_transaction(&self, transaction: Transaction) -> Result<(), LedgerError> {
        let mut transactions = self.transactions.write().await;
        match transactions.iter_mut().find(|t| t.id == transaction.id) {
            Some(existing) => *existing = transaction,
            None => transactions.push(transaction),
        }
        Ok(())
    }

    async fn delete_transaction(&self, transaction_id: Uuid) -> Result<bool, LedgerError> {
        let mut transactions = self.transactions.write().await;
        let before = transactions.len();
        transactions.retain(|t| t.id != transaction_id);
        Ok(transactions.len() != before)
    }

    async fn record_call(&self, path: &str) -> Result<u64, LedgerError> {
        let mut calls = self.calls.write().await;
        let count = calls.entry(path.to_string()).or_insert(0);
        *count = count
            .checked_add(1)
            .ok_or_else(|| LedgerError::StorageError(format!("call counter overflow for {}", path)))?;
        Ok(*count)
    }
}
