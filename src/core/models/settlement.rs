use super::balance::BalanceMap;
use super::member::Member;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single payment from a debtor to a creditor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    pub from: Member,
    pub to: Member,
    pub amount: f64,
}

impl Transaction {
    pub fn new(from: Member, to: Member, amount: f64) -> Self {
        Transaction { from, to, amount }
    }
}

/// Ordered list of payments that zeroes a set of balances.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct SettlementPlan(Vec<Transaction>);

impl SettlementPlan {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        SettlementPlan(transactions)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.0.iter()
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|t| t.amount).sum()
    }

    /// Applies every payment: the payer's balance drops, the receiver's rises.
    pub fn apply(&self, balances: &mut BalanceMap) {
        for tx in &self.0 {
            *balances.entry(tx.from.clone()).or_insert(0.0) -= tx.amount;
            *balances.entry(tx.to.clone()).or_insert(0.0) += tx.amount;
        }
    }
}

impl IntoIterator for SettlementPlan {
    type Item = Transaction;
    type IntoIter = std::vec::IntoIter<Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SettlementPlan {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Result of recording one round: its balances and the plan that settles them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub balances: BalanceMap,
    pub plan: SettlementPlan,
}
