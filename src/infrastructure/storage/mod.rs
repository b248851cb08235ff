use crate::core::errors::DangError;
use crate::core::models::{BalanceMap, Member, MemberRecord};
use async_trait::async_trait;

/// Persistent registry of members and their cumulative balances.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Registers a member with a zero balance.
    async fn add_member(&self, name: Member) -> Result<MemberRecord, DangError>;
    /// Removes a member together with its balance record.
    async fn delete_member(&self, name: &Member) -> Result<(), DangError>;
    /// Adds `delta` to the member's stored balance.
    async fn update_balance(&self, name: &Member, delta: f64) -> Result<(), DangError>;
    /// Adds every delta in one step. Either all members are updated or none are.
    async fn apply_deltas(&self, deltas: &BalanceMap) -> Result<(), DangError>;
    async fn get_member(&self, name: &Member) -> Result<Option<MemberRecord>, DangError>;
    /// Members in registration order.
    async fn get_members(&self) -> Result<Vec<MemberRecord>, DangError>;
    async fn get_balances(&self) -> Result<BalanceMap, DangError>;
}

#[async_trait]
impl<T: Storage + ?Sized> Storage for Box<T> {
    async fn add_member(&self, name: Member) -> Result<MemberRecord, DangError> {
        (**self).add_member(name).await
    }

    async fn delete_member(&self, name: &Member) -> Result<(), DangError> {
        (**self).delete_member(name).await
    }

    async fn update_balance(&self, name: &Member, delta: f64) -> Result<(), DangError> {
        (**self).update_balance(name, delta).await
    }

    async fn apply_deltas(&self, deltas: &BalanceMap) -> Result<(), DangError> {
        (**self).apply_deltas(deltas).await
    }

    async fn get_member(&self, name: &Member) -> Result<Option<MemberRecord>, DangError> {
        (**self).get_member(name).await
    }

    async fn get_members(&self) -> Result<Vec<MemberRecord>, DangError> {
        (**self).get_members().await
    }

    async fn get_balances(&self) -> Result<BalanceMap, DangError> {
        (**self).get_balances().await
    }
}

pub mod in_memory;
pub mod json_file;
