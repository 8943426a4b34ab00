use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::errors::LedgerError;

/// Count of the smallest currency unit (e.g. cents).
pub type Amount = u64;

/// Proportional weight of a beneficiary.
pub type Weight = u32;

/// One beneficiary of a transaction.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    pub user: Uuid,
    /// Fixed part owed by this user, taken out before the weighted split. 0 means not forced.
    #[serde(rename = "forcePrice", default, skip_serializing_if = "is_zero")]
    pub forced_amount: Amount,
    /// Weight in the split of what remains after forced amounts.
    #[serde(default, skip_serializing_if = "is_zero_weight")]
    pub weight: Weight,
    /// Output of the splitter. Ignored on input.
    #[serde(rename = "computedPrice", default)]
    pub computed_amount: Amount,
}

impl Share {
    pub fn weighted(user: Uuid, weight: Weight) -> Self {
        Share {
            user,
            weight,
            ..Default::default()
        }
    }

    pub fn forced(user: Uuid, forced_amount: Amount) -> Self {
        Share {
            user,
            forced_amount,
            ..Default::default()
        }
    }
}

fn is_zero(value: &Amount) -> bool {
    *value == 0
}

fn is_zero_weight(value: &Weight) -> bool {
    *value == 0
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub group: Uuid,
    #[serde(default)]
    pub paid_by: Uuid,
    #[serde(default)]
    pub paid_for: Vec<Share>,
    #[serde(default)]
    pub amount: Amount,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Transaction {
    /// Checks the fields the splitter relies on. Runs before any share is touched.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.amount == 0 {
            return Err(LedgerError::invalid_input("amount", r#"field "amount" must be non-zero"#));
        }
        if self.group.is_nil() {
            return Err(LedgerError::invalid_input("group", r#"field "group" must be filled"#));
        }
        if self.paid_by.is_nil() {
            return Err(LedgerError::invalid_input("paidBy", r#"field "paidBy" must be filled"#));
        }
        if self.paid_for.is_empty() {
            return Err(LedgerError::invalid_input(
                "paidFor",
                r#"field "paidFor" must have some values"#,
            ));
        }
        if self.date.is_none() {
            return Err(LedgerError::invalid_input("date", r#"field "date" must be filled"#));
        }
        if self.category.trim().is_empty() {
            return Err(LedgerError::invalid_input("category", r#"field "category" must be filled"#));
        }

        let mut seen = HashSet::with_capacity(self.paid_for.len());
        for share in &self.paid_for {
            if share.user.is_nil() {
                return Err(LedgerError::invalid_input(
                    "paidFor",
                    r#"field "paidFor.user" must be filled"#,
                ));
            }
            if !seen.insert(share.user) {
                return Err(LedgerError::invalid_input(
                    "paidFor",
                    format!(r#"field "paidFor" lists user {} more than once"#, share.user),
                ));
            }
        }

        Ok(())
    }

    /// Payer and beneficiaries, deduplicated, payer first.
    pub fn users(&self) -> Vec<Uuid> {
        let mut users = vec![self.paid_by];
        for share in &self.paid_for {
            if !users.contains(&share.user) {
                users.push(share.user);
            }
        }
        users
    }

    /// Sum of the computed amounts, `None` on overflow.
    pub fn computed_total(&self) -> Option<Amount> {
        self.paid_for
            .iter()
            .try_fold(0, |total: Amount, share| total.checked_add(share.computed_amount))
    }

    /// True when the computed amounts add up to `amount`, i.e. the shares were already split.
    pub fn is_split(&self) -> bool {
        self.computed_total() == Some(self.amount)
    }
}
