use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::core::models::transaction::Amount;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: &str, description: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            title: format!("Invalid {}", field),
            description: description.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

#[derive(Error, Debug, Clone, Serialize, PartialEq, Eq)]
pub enum LedgerError {
    /// A record field failed validation
    #[error("{1}")]
    InvalidInput(String, FieldError),

    /// A path or body identifier could not be parsed
    #[error("id must be a valid id: {0}")]
    InvalidId(String),

    /// Some referenced users do not exist
    #[error("field \"users\" must be a list of valid users: got {valid} valid users out of {total}")]
    UnknownUsers { valid: usize, total: usize },

    /// Some transaction participants are not members of its group
    #[error("field \"users\" must be a list of valid group members: got {valid} valid users out of {total}")]
    InvalidMembers { valid: usize, total: usize },

    /// Forced amounts add up to more than the transaction amount
    #[error("forced amounts ({forced}) are higher than the transaction amount ({amount})")]
    AmountsExceedTotal { forced: Amount, amount: Amount },

    /// A positive remainder has no weighted beneficiary to go to
    #[error("cannot split remaining amount {0}: no beneficiary has a positive weight")]
    UnsplittableRemainder(Amount),

    #[error("amount overflow while {0}")]
    AmountOverflow(String),

    /// A transaction references someone outside the group member list
    #[error("member {0} is referenced by a transaction but is not part of the group")]
    UnknownMember(Uuid),

    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("Group {0} not found")]
    GroupNotFound(String),

    #[error("Transaction {0} not found")]
    TransactionNotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl LedgerError {
    pub fn invalid_input(field: &str, description: impl Into<String>) -> Self {
        LedgerError::InvalidInput(field.to_string(), FieldError::new(field, description))
    }
}
