use super::{transaction, users};
use crate::core::balance::aggregate;
use crate::core::errors::LedgerError;
use crate::core::models::{Balance, Share};
use uuid::Uuid;

#[test]
fn test_single_payment_for_other_member() {
    let _ = env_logger::try_init();
    let group = Uuid::new_v4();
    let members = users(2);
    let (a, b) = (members[0], members[1]);
    let tx = transaction(
        group,
        a,
        90,
        vec![Share {
            user: b,
            computed_amount: 90,
            ..Default::default()
        }],
    );

    let balances = aggregate(&members, &[tx]).unwrap();

    assert_eq!(
        balances[&a],
        Balance {
            positive_amount: 90,
            negative_amount: 0,
            total_amount: 90
        }
    );
    assert_eq!(
        balances[&b],
        Balance {
            positive_amount: 0,
            negative_amount: 90,
            total_amount: -90
        }
    );
}

#[test]
fn test_every_member_gets_an_entry() {
    let members = users(3);

    let balances = aggregate(&members, &[]).unwrap();

    assert_eq!(balances.len(), 3);
    assert!(balances.values().all(|b| *b == Balance::default()));
}

#[test]
fn test_payer_who_also_benefits_keeps_both_sides() {
    let group = Uuid::new_v4();
    let members = users(2);
    let (a, b) = (members[0], members[1]);
    let tx = transaction(group, a, 100, vec![Share::weighted(a, 1), Share::weighted(b, 1)]);

    let balances = aggregate(&members, &[tx]).unwrap();

    assert_eq!(balances[&a].positive_amount, 100);
    assert_eq!(balances[&a].negative_amount, 50);
    assert_eq!(balances[&a].total_amount, 50);
    assert_eq!(balances[&b].total_amount, -50);
}

#[test]
fn test_net_balances_sum_to_zero() {
    let group = Uuid::new_v4();
    let members = users(4);
    let transactions = vec![
        transaction(
            group,
            members[0],
            1_000,
            vec![
                Share::weighted(members[0], 1),
                Share::weighted(members[1], 1),
                Share::weighted(members[2], 1),
            ],
        ),
        transaction(
            group,
            members[1],
            257,
            vec![Share::forced(members[3], 57), Share::weighted(members[2], 2), Share::weighted(members[0], 5)],
        ),
        transaction(group, members[3], 13, vec![Share::weighted(members[1], 3), Share::weighted(members[2], 4)]),
    ];

    let balances = aggregate(&members, &transactions).unwrap();

    assert_eq!(balances.values().map(|b| b.total_amount).sum::<i64>(), 0);
    let paid: u64 = balances.values().map(|b| b.positive_amount).sum();
    let owed: u64 = balances.values().map(|b| b.negative_amount).sum();
    assert_eq!(paid, 1_270);
    assert_eq!(owed, 1_270);
}

#[test]
fn test_stale_computed_amounts_are_recomputed() {
    let group = Uuid::new_v4();
    let members = users(2);
    let mut tx = transaction(group, members[0], 10, vec![Share::weighted(members[1], 1)]);
    tx.paid_for[0].computed_amount = 3;

    let balances = aggregate(&members, &[tx]).unwrap();

    assert_eq!(balances[&members[1]].negative_amount, 10);
}

#[test]
fn test_unsplit_transaction_is_split_before_aggregation() {
    let group = Uuid::new_v4();
    let members = users(2);
    let (a, b) = (members[0], members[1]);
    let tx = transaction(group, a, 90, vec![Share::weighted(b, 1)]);

    let balances = aggregate(&members, &[tx]).unwrap();

    assert_eq!(balances[&a].total_amount, 90);
    assert_eq!(balances[&b].negative_amount, 90);
}

#[test]
fn test_split_transactions_are_taken_as_stored() {
    let group = Uuid::new_v4();
    let members = users(3);
    let mut tx = transaction(
        group,
        members[0],
        100,
        vec![Share::weighted(members[1], 1), Share::weighted(members[2], 1)],
    );
    // Consistent with the amount, though not what the weights would give.
    tx.paid_for[0].computed_amount = 70;
    tx.paid_for[1].computed_amount = 30;

    let balances = aggregate(&members, &[tx]).unwrap();

    assert_eq!(balances[&members[1]].negative_amount, 70);
    assert_eq!(balances[&members[2]].negative_amount, 30);
    assert_eq!(balances.values().map(|b| b.total_amount).sum::<i64>(), 0);
}

#[test]
fn test_unknown_payer_is_an_integrity_error() {
    let group = Uuid::new_v4();
    let members = users(2);
    let outsider = Uuid::new_v4();
    let tx = transaction(group, outsider, 10, vec![Share::weighted(members[0], 1)]);

    let result = aggregate(&members, &[tx]);

    assert_eq!(result, Err(LedgerError::UnknownMember(outsider)));
}

#[test]
fn test_unknown_beneficiary_is_an_integrity_error() {
    let group = Uuid::new_v4();
    let members = users(2);
    let outsider = Uuid::new_v4();
    let tx = transaction(group, members[0], 10, vec![Share::weighted(outsider, 1)]);

    assert!(matches!(aggregate(&members, &[tx]), Err(LedgerError::UnknownMember(id)) if id == outsider));
}

#[test]
fn test_unsplittable_transaction_fails_aggregation() {
    let group = Uuid::new_v4();
    let members = users(2);
    let tx = transaction(group, members[0], 10, vec![Share::weighted(members[1], 0)]);

    assert_eq!(aggregate(&members, &[tx]), Err(LedgerError::UnsplittableRemainder(10)));
}
