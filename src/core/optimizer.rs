use crate::constants::{CONSISTENCY_TOLERANCE, RELATIVE_TOLERANCE, SETTLE_TOLERANCE};
use crate::core::errors::DangError;
use crate::core::models::{BalanceMap, Member, SettlementPlan, Transaction};
use log::{debug, warn};

/// Largest residue a set of balances may leave and still count as zero-sum.
///
/// Never below [`CONSISTENCY_TOLERANCE`], and grows with the largest balance so
/// rounding on large amounts is not mistaken for an inconsistency.
pub fn consistency_tolerance(balances: &BalanceMap) -> f64 {
    let largest = balances.values().fold(0.0_f64, |acc, bal| acc.max(bal.abs()));
    CONSISTENCY_TOLERANCE.max(largest * RELATIVE_TOLERANCE)
}

/// Produces the payments that settle `balances`, largest debts first.
///
/// Creditors (owed money) are visited from the most negative balance up,
/// debtors from the largest positive balance down. Each step pays the smaller
/// of the two outstanding amounts, so at least one side settles per payment.
/// The caller's map is not modified.
///
/// Returns an empty plan when there are no creditors or no debtors. When both
/// exist but the balances do not net to zero, the leftover is reported as
/// [`DangError::Consistency`].
pub fn optimize_transactions(balances: &BalanceMap) -> Result<SettlementPlan, DangError> {
    debug!("Optimizing transactions for balances: {:?}", balances);
    let mut working = balances.clone();

    let mut creditors: Vec<(Member, f64)> = balances
        .iter()
        .filter(|(_, bal)| **bal < -SETTLE_TOLERANCE)
        .map(|(member, bal)| (member.clone(), *bal))
        .collect();
    let mut debtors: Vec<(Member, f64)> = balances
        .iter()
        .filter(|(_, bal)| **bal > SETTLE_TOLERANCE)
        .map(|(member, bal)| (member.clone(), *bal))
        .collect();

    if creditors.is_empty() || debtors.is_empty() {
        debug!("Nothing to settle: {} creditors, {} debtors", creditors.len(), debtors.len());
        return Ok(SettlementPlan::default());
    }

    creditors.sort_by(|a, b| a.1.total_cmp(&b.1));
    debtors.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut transactions = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < creditors.len() && j < debtors.len() {
        let creditor = &creditors[i].0;
        let debtor = &debtors[j].0;
        let credit_balance = working[creditor];
        let debt_balance = working[debtor];

        let payment = (-credit_balance).min(debt_balance);
        transactions.push(Transaction::new(debtor.clone(), creditor.clone(), payment));

        let credit_left = credit_balance + payment;
        let debt_left = debt_balance - payment;
        working.insert(creditor.clone(), credit_left);
        working.insert(debtor.clone(), debt_left);

        if credit_left.abs() <= SETTLE_TOLERANCE {
            i += 1;
        }
        if debt_left.abs() <= SETTLE_TOLERANCE {
            j += 1;
        }
    }

    let tolerance = consistency_tolerance(balances);
    if let Some((member, residual)) = working.iter().find(|(_, bal)| bal.abs() > tolerance) {
        warn!("Settlement left {} with residual {}", member, residual);
        return Err(DangError::Consistency { residual: *residual });
    }

    debug!("Optimized transactions: {:?}", transactions);
    Ok(SettlementPlan::new(transactions))
}
