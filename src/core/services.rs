use crate::core::balance::{GroupBalances, aggregate};
use crate::core::errors::LedgerError;
use crate::core::models::{group::Group, transaction::Transaction, user::User};
use crate::core::split::split;
use crate::infrastructure::storage::Storage;
use futures::future::try_join_all;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct LedgerService<S: Storage> {
    storage: S,
}

impl<S: Storage> LedgerService<S> {
    pub fn new(storage: S) -> Self {
        LedgerService { storage }
    }

    pub async fn record_call(&self, path: &str) -> Result<u64, LedgerError> {
        self.storage.record_call(path).await
    }

    // USERS

    pub async fn list_users(&self) -> Result<Vec<User>, LedgerError> {
        self.storage.list_users().await
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<User, LedgerError> {
        self.storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| LedgerError::UserNotFound(user_id.to_string()))
    }

    pub async fn create_user(&self, mut user: User) -> Result<User, LedgerError> {
        user.validate()?;
        user.id = Uuid::new_v4();
        self.storage.save_user(user.clone()).await?;
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn update_user(&self, user_id: Uuid, mut user: User) -> Result<User, LedgerError> {
        user.validate()?;
        self.get_user(user_id).await?;
        user.id = user_id;
        self.storage.save_user(user.clone()).await?;
        info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    pub async fn delete_user(&self, user_id: Uuid) -> Result<(), LedgerError> {
        if !self.storage.delete_user(user_id).await? {
            debug!(user_id = %user_id, "delete of unknown user ignored");
        }
        Ok(())
    }

    // GROUPS

    pub async fn list_groups(&self, member: Option<Uuid>) -> Result<Vec<Group>, LedgerError> {
        self.storage.list_groups(member).await
    }

    pub async fn get_group(&self, group_id: Uuid) -> Result<Group, LedgerError> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))
    }

    pub async fn group_users(&self, group_id: Uuid) -> Result<Vec<User>, LedgerError> {
        let group = self.get_group(group_id).await?;
        let users = try_join_all(group.users.iter().map(|id| self.storage.get_user(*id))).await?;
        Ok(users.into_iter().flatten().collect())
    }

    pub async fn create_group(&self, mut group: Group) -> Result<Group, LedgerError> {
        group.validate()?;
        self.ensure_users_exist(&group.users).await?;
        group.id = Uuid::new_v4();
        self.storage.save_group(group.clone()).await?;
        info!(group_id = %group.id, members = group.users.len(), "group created");
        Ok(group)
    }

    pub async fn update_group(&self, group_id: Uuid, mut group: Group) -> Result<Group, LedgerError> {
        group.validate()?;
        self.get_group(group_id).await?;
        self.ensure_users_exist(&group.users).await?;
        group.id = group_id;
        self.storage.save_group(group.clone()).await?;
        info!(group_id = %group.id, members = group.users.len(), "group updated");
        Ok(group)
    }

    pub async fn delete_group(&self, group_id: Uuid) -> Result<(), LedgerError> {
        if !self.storage.delete_group(group_id).await? {
            debug!(group_id = %group_id, "delete of unknown group ignored");
        }
        Ok(())
    }

    // TRANSACTIONS

    pub async fn group_transactions(&self, group_id: Uuid) -> Result<Vec<Transaction>, LedgerError> {
        self.get_group(group_id).await?;
        self.storage.list_group_transactions(group_id).await
    }

    pub async fn get_transaction(&self, transaction_id: Uuid) -> Result<Transaction, LedgerError> {
        self.storage
            .get_transaction(transaction_id)
            .await?
            .ok_or_else(|| LedgerError::TransactionNotFound(transaction_id.to_string()))
    }

    pub async fn create_transaction(
        &self,
        group_id: Uuid,
        mut transaction: Transaction,
    ) -> Result<Transaction, LedgerError> {
        let group = self.get_group(group_id).await?;
        transaction.group = group.id;
        transaction.validate()?;
        Self::ensure_group_members(&group, &transaction)?;

        transaction.id = Uuid::new_v4();
        split(&mut transaction)?;
        self.storage.save_transaction(transaction.clone()).await?;

        info!(
            transaction_id = %transaction.id,
            group_id = %group.id,
            amount = transaction.amount,
            "transaction created"
        );
        Ok(transaction)
    }

    /// Replaces a transaction. Its group cannot change.
    pub async fn update_transaction(
        &self,
        transaction_id: Uuid,
        mut transaction: Transaction,
    ) -> Result<Transaction, LedgerError> {
        let existing = self.get_transaction(transaction_id).await?;
        let group = self.get_group(existing.group).await?;
        transaction.id = transaction_id;
        transaction.group = group.id;
        transaction.validate()?;
        Self::ensure_group_members(&group, &transaction)?;

        split(&mut transaction)?;
        self.storage.save_transaction(transaction.clone()).await?;

        info!(
            transaction_id = %transaction.id,
            group_id = %group.id,
            amount = transaction.amount,
            "transaction updated"
        );
        Ok(transaction)
    }

    pub async fn delete_transaction(&self, transaction_id: Uuid) -> Result<(), LedgerError> {
        if !self.storage.delete_transaction(transaction_id).await? {
            debug!(transaction_id = %transaction_id, "delete of unknown transaction ignored");
        }
        Ok(())
    }

    // BALANCES

    pub async fn group_balances(&self, group_id: Uuid) -> Result<GroupBalances, LedgerError> {
        let group = self.get_group(group_id).await?;
        let transactions = self.storage.list_group_transactions(group_id).await?;
        let balances = aggregate(&group.users, &transactions)?;
        debug!(
            group_id = %group_id,
            transactions = transactions.len(),
            "group balances computed"
        );
        Ok(balances)
    }

    async fn ensure_users_exist(&self, user_ids: &[Uuid]) -> Result<(), LedgerError> {
        let found = try_join_all(user_ids.iter().map(|id| self.storage.get_user(*id))).await?;
        let valid = found.iter().filter(|user| user.is_some()).count();
        if valid != user_ids.len() {
            warn!(valid, total = user_ids.len(), "unknown users referenced");
            return Err(LedgerError::UnknownUsers {
                valid,
                total: user_ids.len(),
            });
        }
        Ok(())
    }

    fn ensure_group_members(group: &Group, transaction: &Transaction) -> Result<(), LedgerError> {
        let users = transaction.users();
        let valid = users.iter().filter(|id| group.has_member(**id)).count();
        if valid != users.len() {
            warn!(group_id = %group.id, valid, total = users.len(), "transaction references non-members");
            return Err(LedgerError::InvalidMembers {
                valid,
                total: users.len(),
            });
        }
        Ok(())
    }
}
