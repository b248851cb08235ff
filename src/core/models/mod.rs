pub mod balance;
pub mod member;
pub mod settlement;

pub use balance::{BalanceMap, Expenses};
pub use member::{Member, MemberRecord};
pub use settlement::{RoundOutcome, SettlementPlan, Transaction};
