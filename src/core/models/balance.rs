use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::transaction::Amount;

/// Net position of one member over a group's whole transaction history.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Total paid as payer.
    pub positive_amount: Amount,
    /// Total owed as beneficiary.
    pub negative_amount: Amount,
    /// `positive_amount - negative_amount`.
    pub total_amount: i64,
}
