use super::member::Member;
use std::collections::BTreeMap;

/// Amount each member paid toward one round.
pub type Expenses = BTreeMap<Member, f64>;

/// Signed net balance per member: positive owes money, negative is owed money.
pub type BalanceMap = BTreeMap<Member, f64>;
