pub mod api;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::calculator::{compute_balances, split_evenly};
pub use crate::core::errors::DangError;
pub use crate::core::models::{BalanceMap, Expenses, Member, MemberRecord, RoundOutcome, SettlementPlan, Transaction};
pub use crate::core::optimizer::optimize_transactions;
pub use crate::core::services::DangService;
pub use infrastructure::storage::{Storage, in_memory::InMemoryStorage, json_file::JsonFileStorage};

#[cfg(test)]
mod tests;
