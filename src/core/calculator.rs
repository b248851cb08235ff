use crate::constants::MAX_AMOUNT;
use crate::core::errors::DangError;
use crate::core::models::{BalanceMap, Expenses, Member};
use log::{debug, warn};
use std::collections::BTreeSet;

/// Computes each member's net balance for one round.
///
/// The payer is charged the whole total against what they listed as paid;
/// every other member is charged an even share against their listed amount.
/// Positive balances owe money, negative balances are owed money.
///
/// # Errors
/// * [`DangError::EmptyExpenses`] when no member is listed.
/// * [`DangError::UnknownPayer`] when `payer` is not a key of `expenses`.
/// * [`DangError::NegativeAmount`] for a negative or non-finite amount.
pub fn compute_balances(expenses: &Expenses, payer: &Member) -> Result<BalanceMap, DangError> {
    if expenses.is_empty() {
        warn!("Rejected round with no members");
        return Err(DangError::EmptyExpenses);
    }
    if !expenses.contains_key(payer) {
        warn!("Rejected round: payer {} is not part of it", payer);
        return Err(DangError::UnknownPayer(payer.to_string()));
    }
    if let Some((member, &amount)) = expenses.iter().find(|(_, a)| !a.is_finite() || **a < 0.0) {
        warn!("Rejected round: {} listed with amount {}", member, amount);
        return Err(DangError::NegativeAmount {
            member: member.to_string(),
            amount,
        });
    }

    let total: f64 = expenses.values().sum();
    let share = total / expenses.len() as f64;

    let balances: BalanceMap = expenses
        .iter()
        .map(|(member, &amount)| {
            let balance = if member == payer { amount - total } else { amount - share };
            (member.clone(), balance)
        })
        .collect();

    debug!("Round total {} (share {}), balances: {:?}", total, share, balances);
    Ok(balances)
}

/// Splits `total`, fronted by `payer`, evenly across `selected`.
///
/// Every selected member owes one share. The payer is credited the full total,
/// less their own share when they are among the selected members.
pub fn split_evenly(selected: &[Member], payer: &Member, total: f64) -> Result<BalanceMap, DangError> {
    if selected.is_empty() {
        warn!("Rejected split with no selected members");
        return Err(DangError::EmptyExpenses);
    }
    validate_total(total)?;

    let mut seen = BTreeSet::new();
    if let Some(dup) = selected.iter().find(|m| !seen.insert(*m)) {
        warn!("Rejected split: {} selected twice", dup);
        return Err(DangError::invalid_field(
            "members",
            "Duplicate Member",
            format!("{} is selected more than once", dup),
        ));
    }

    let share = total / selected.len() as f64;
    let mut balances: BalanceMap = selected.iter().map(|m| (m.clone(), share)).collect();
    *balances.entry(payer.clone()).or_insert(0.0) -= total;

    debug!("Split {} by {} across {} members: {:?}", total, payer, selected.len(), balances);
    Ok(balances)
}

fn validate_total(total: f64) -> Result<(), DangError> {
    if !total.is_finite() {
        return Err(DangError::invalid_field(
            "amount",
            "Invalid Amount",
            "Amount must be a finite number",
        ));
    }
    if total <= 0.0 {
        return Err(DangError::invalid_field(
            "amount",
            "Invalid Amount",
            "Amount must be greater than 0",
        ));
    }
    if total > MAX_AMOUNT {
        return Err(DangError::invalid_field(
            "amount",
            "Amount Too Large",
            format!("Amount cannot exceed {}", MAX_AMOUNT),
        ));
    }
    Ok(())
}
