//! Turns a transaction into the exact amount each beneficiary owes.
//!
//! Forced amounts are taken out first, the rest is shared by weight with
//! integer division, and the units lost to rounding go one by one to the
//! weighted beneficiaries in the order they are listed. The computed amounts
//! always add up to the transaction amount.

use log::{debug, warn};

use crate::core::errors::LedgerError;
use crate::core::models::transaction::{Amount, Share, Transaction, Weight};

/// Validates `transaction` and recomputes `computed_amount` on every share.
///
/// On error the shares are left exactly as they were.
pub fn split(transaction: &mut Transaction) -> Result<(), LedgerError> {
    transaction.validate()?;
    let computed = split_amounts(transaction.amount, &transaction.paid_for)?;

    for (share, amount) in transaction.paid_for.iter_mut().zip(computed) {
        share.computed_amount = amount;
    }

    debug!(
        "Split transaction {} of {} between {} beneficiaries",
        transaction.id,
        transaction.amount,
        transaction.paid_for.len()
    );
    Ok(())
}

/// Computes the owed amount of each share, in the order of `shares`.
///
/// Only `forced_amount` and `weight` are read; any previous
/// `computed_amount` is ignored.
pub fn split_amounts(amount: Amount, shares: &[Share]) -> Result<Vec<Amount>, LedgerError> {
    let rest = remaining_after_forced(amount, shares)?;
    let mut computed: Vec<Amount> = shares.iter().map(|share| share.forced_amount).collect();

    if rest == 0 {
        return Ok(computed);
    }

    let total_weight: u64 = shares.iter().map(|share| u64::from(share.weight)).sum();
    if total_weight == 0 {
        warn!("Remaining amount {} of {} has no weighted beneficiary", rest, amount);
        return Err(LedgerError::UnsplittableRemainder(rest));
    }

    let mut distributed: Amount = 0;
    for (slot, share) in computed.iter_mut().zip(shares) {
        let part = proportional_part(rest, share.weight, total_weight);
        *slot += part;
        distributed += part;
    }

    // Each weighted share loses less than one unit to the floor, so a single
    // pass over them is enough to hand the leftover back.
    let mut leftover = rest - distributed;
    for (slot, share) in computed.iter_mut().zip(shares) {
        if leftover == 0 {
            break;
        }
        if share.weight > 0 {
            *slot += 1;
            leftover -= 1;
        }
    }

    if leftover > 0 {
        warn!("Could not hand out {} leftover units of {}", leftover, amount);
        return Err(LedgerError::UnsplittableRemainder(leftover));
    }

    Ok(computed)
}

fn remaining_after_forced(amount: Amount, shares: &[Share]) -> Result<Amount, LedgerError> {
    shares.iter().try_fold(amount, |rest, share| {
        rest.checked_sub(share.forced_amount).ok_or_else(|| {
            let forced = shares
                .iter()
                .map(|share| share.forced_amount)
                .fold(0, Amount::saturating_add);
            warn!("Forced amounts {} exceed transaction amount {}", forced, amount);
            LedgerError::AmountsExceedTotal { forced, amount }
        })
    })
}

/// `floor(rest * weight / total_weight)`, never more than `rest`.
fn proportional_part(rest: Amount, weight: Weight, total_weight: u64) -> Amount {
    let part = u128::from(rest) * u128::from(weight) / u128::from(total_weight);
    Amount::try_from(part).unwrap_or(rest)
}
