use log::debug;
use std::collections::HashMap;
use uuid::Uuid;

use crate::core::errors::LedgerError;
use crate::core::models::{Amount, Balance, Transaction};
use crate::core::split::split_amounts;

/// Balance of every group member, keyed by user id.
pub type GroupBalances = HashMap<Uuid, Balance>;

/// Folds a group's transactions into one balance per member.
///
/// Transactions whose computed amounts already add up to their amount are
/// taken as stored. Any other transaction is split again from its amount,
/// forced amounts and weights first. A payer or beneficiary missing from
/// `members` is an error.
pub fn aggregate(members: &[Uuid], transactions: &[Transaction]) -> Result<GroupBalances, LedgerError> {
    let mut balances: GroupBalances = members.iter().map(|id| (*id, Balance::default())).collect();

    for transaction in transactions {
        transaction.validate()?;
        let computed = owed_amounts(transaction)?;

        let payer = member_entry(&mut balances, transaction.paid_by)?;
        payer.positive_amount = add(payer.positive_amount, transaction.amount)?;

        for (share, owed) in transaction.paid_for.iter().zip(computed) {
            let beneficiary = member_entry(&mut balances, share.user)?;
            beneficiary.negative_amount = add(beneficiary.negative_amount, owed)?;
        }
    }

    for balance in balances.values_mut() {
        balance.total_amount = net(balance)?;
    }

    debug!(
        "Aggregated {} transactions over {} members",
        transactions.len(),
        balances.len()
    );
    Ok(balances)
}

fn owed_amounts(transaction: &Transaction) -> Result<Vec<Amount>, LedgerError> {
    if transaction.is_split() {
        return Ok(transaction.paid_for.iter().map(|share| share.computed_amount).collect());
    }
    debug!("Transaction {} is not split yet, splitting it", transaction.id);
    split_amounts(transaction.amount, &transaction.paid_for)
}

fn member_entry(balances: &mut GroupBalances, member: Uuid) -> Result<&mut Balance, LedgerError> {
    balances.get_mut(&member).ok_or(LedgerError::UnknownMember(member))
}

fn add(total: Amount, amount: Amount) -> Result<Amount, LedgerError> {
    total
        .checked_add(amount)
        .ok_or_else(|| LedgerError::AmountOverflow("summing balances".to_string()))
}

fn net(balance: &Balance) -> Result<i64, LedgerError> {
    let total = i128::from(balance.positive_amount) - i128::from(balance.negative_amount);
    i64::try_from(total).map_err(|_| LedgerError::AmountOverflow("computing net balance".to_string()))
}
