use crate::constants::SETTLE_TOLERANCE;
use crate::core::models::{BalanceMap, Member, SettlementPlan};

pub fn render_plan(plan: &SettlementPlan) -> Vec<String> {
    if plan.is_empty() {
        return vec!["All settled up".to_string()];
    }
    plan.iter()
        .map(|tx| format!("{} pays {} {:.2}", tx.from, tx.to, tx.amount))
        .collect()
}

pub fn render_balances(balances: &BalanceMap) -> Vec<String> {
    balances
        .iter()
        .map(|(member, &balance)| {
            if balance > SETTLE_TOLERANCE {
                format!("{} owes {:.2}", member, balance)
            } else if balance < -SETTLE_TOLERANCE {
                format!("{} is owed {:.2}", member, -balance)
            } else {
                format!("{} is settled", member)
            }
        })
        .collect()
}

/// Summary shown after an even split: the total, then each member's share.
pub fn render_split(selected: &[Member], payer: &Member, total: f64) -> String {
    let share = if selected.is_empty() {
        0.0
    } else {
        total / selected.len() as f64
    };

    let mut text = format!("Total Amount: {:.2}\n", total);
    for member in selected {
        if member == payer {
            text.push_str(&format!("{} (Payer): 0.00 (Already Paid)\n", member));
        } else {
            text.push_str(&format!("{}: {:.2}\n", member, share));
        }
    }
    text
}
