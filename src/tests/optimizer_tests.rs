use super::{assert_close, balance_map};
use crate::core::errors::DangError;
use crate::core::models::{Member, Transaction};
use crate::core::optimizer::{consistency_tolerance, optimize_transactions};

fn tx(from: &str, to: &str, amount: f64) -> Transaction {
    Transaction::new(Member::from(from), Member::from(to), amount)
}

#[test]
fn test_greedy_settlement_example() {
    let balances = balance_map(&[("A", 50.0), ("B", -30.0), ("C", -20.0)]);
    let plan = optimize_transactions(&balances).unwrap();

    assert_eq!(plan.transactions(), &[tx("A", "B", 30.0), tx("A", "C", 20.0)]);
}

#[test]
fn test_caller_balances_untouched() {
    let balances = balance_map(&[("A", 50.0), ("B", -30.0), ("C", -20.0)]);
    let before = balances.clone();
    let _ = optimize_transactions(&balances).unwrap();
    assert_eq!(balances, before);
}

#[test]
fn test_all_zero_balances_give_empty_plan() {
    let balances = balance_map(&[("A", 0.0), ("B", 0.0), ("C", 0.0)]);
    assert!(optimize_transactions(&balances).unwrap().is_empty());
}

#[test]
fn test_one_sided_balances_give_empty_plan() {
    let creditors_only = balance_map(&[("A", 0.0), ("B", -30.0), ("C", -30.0)]);
    assert!(optimize_transactions(&creditors_only).unwrap().is_empty());

    let single_pair = balance_map(&[("A", -50.0), ("B", 0.0)]);
    assert!(optimize_transactions(&single_pair).unwrap().is_empty());
}

#[test]
fn test_partial_payments_use_remaining_balance() {
    // B is owed 100 and has to collect from two debtors in turn.
    let balances = balance_map(&[("A", 60.0), ("B", -100.0), ("C", 40.0)]);
    let plan = optimize_transactions(&balances).unwrap();

    assert_eq!(plan.transactions(), &[tx("A", "B", 60.0), tx("C", "B", 40.0)]);
}

#[test]
fn test_creditors_most_owed_first_and_debtors_largest_first() {
    let balances = balance_map(&[("A", 10.0), ("B", 70.0), ("C", -30.0), ("D", -50.0)]);
    let plan = optimize_transactions(&balances).unwrap();

    assert_eq!(
        plan.transactions(),
        &[tx("B", "D", 50.0), tx("B", "C", 20.0), tx("A", "C", 10.0)]
    );
}

#[test]
fn test_rounding_residue_does_not_leave_extra_payments() {
    let third = 100.0 / 3.0;
    let balances = balance_map(&[("A", -100.0), ("B", third), ("C", third), ("D", third)]);
    let plan = optimize_transactions(&balances).unwrap();

    assert_eq!(plan.len(), 3);
    assert_close(plan.total(), 100.0);
    assert!(plan.iter().all(|t| t.to == Member::from("A") && t.amount > 0.0));
}

#[test]
fn test_unbalanced_input_reports_consistency_error() {
    let balances = balance_map(&[("A", 40.0), ("B", -100.0)]);
    let result = optimize_transactions(&balances);
    assert!(matches!(result, Err(DangError::Consistency { residual }) if (residual + 60.0).abs() < 1e-9));
}

#[test]
fn test_plan_apply_settles_everyone() {
    let mut balances = balance_map(&[("A", 25.0), ("B", 15.0), ("C", -35.0), ("D", -5.0)]);
    let plan = optimize_transactions(&balances).unwrap();
    plan.apply(&mut balances);

    for balance in balances.values() {
        assert_close(*balance, 0.0);
    }
}

#[test]
fn test_rounding_residue_on_large_balances_is_tolerated() {
    let balances = balance_map(&[("A", 1e12), ("B", -(1e12 - 1e-3))]);
    let plan = optimize_transactions(&balances).unwrap();

    assert_eq!(plan.len(), 1);
    assert_eq!(plan.transactions()[0].from, Member::from("A"));
    assert_eq!(plan.transactions()[0].to, Member::from("B"));
}

#[test]
fn test_large_unbalanced_input_still_reports_consistency_error() {
    let balances = balance_map(&[("A", 1e12), ("B", -0.99e12)]);
    let result = optimize_transactions(&balances);
    assert!(matches!(result, Err(DangError::Consistency { .. })));
}

#[test]
fn test_consistency_tolerance_scales_with_largest_balance() {
    assert_eq!(consistency_tolerance(&balance_map(&[("A", 5.0), ("B", -5.0)])), 1e-6);
    assert_close(consistency_tolerance(&balance_map(&[("A", 2e12), ("B", -2e12)])), 2.0);
}
