use crate::core::errors::DangError;
use crate::core::models::{BalanceMap, Member, MemberRecord};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct InMemoryStorage {
    members: Arc<RwLock<Vec<MemberRecord>>>,
    balances: Arc<RwLock<BalanceMap>>,
    next_id: Arc<RwLock<u64>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            members: Arc::new(RwLock::new(Vec::new())),
            balances: Arc::new(RwLock::new(BalanceMap::new())),
            next_id: Arc::new(RwLock::new(1)),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn add_member(&self, name: Member) -> Result<MemberRecord, DangError> {
        let mut members = self.members.write().await;
        if members.iter().any(|m| m.name == name) {
            return Err(DangError::MemberAlreadyExists(name.to_string()));
        }
        let mut next_id = self.next_id.write().await;
        let record = MemberRecord {
            id: *next_id,
            name: name.clone(),
            joined_at: Utc::now(),
        };
        *next_id += 1;
        members.push(record.clone());
        self.balances.write().await.insert(name, 0.0);
        Ok(record)
    }

    async fn delete_member(&self, name: &Member) -> Result<(), DangError> {
        let mut members = self.members.write().await;
        let before = members.len();
        members.retain(|m| &m.name != name);
        if members.len() == before {
            return Err(DangError::MemberNotFound(name.to_string()));
        }
        self.balances.write().await.remove(name);
        Ok(())
    }

    async fn update_balance(&self, name: &Member, delta: f64) -> Result<(), DangError> {
        let mut balances = self.balances.write().await;
        let balance = balances
            .get_mut(name)
            .ok_or_else(|| DangError::MemberNotFound(name.to_string()))?;
        *balance += delta;
        Ok(())
    }

    async fn apply_deltas(&self, deltas: &BalanceMap) -> Result<(), DangError> {
        let mut balances = self.balances.write().await;
        if let Some(missing) = deltas.keys().find(|m| !balances.contains_key(*m)) {
            return Err(DangError::MemberNotFound(missing.to_string()));
        }
        for (member, delta) in deltas {
            if let Some(balance) = balances.get_mut(member) {
                *balance += delta;
            }
        }
        Ok(())
    }

    async fn get_member(&self, name: &Member) -> Result<Option<MemberRecord>, DangError> {
        Ok(self.members.read().await.iter().find(|m| &m.name == name).cloned())
    }

    async fn get_members(&self) -> Result<Vec<MemberRecord>, DangError> {
        Ok(self.members.read().await.clone())
    }

    async fn get_balances(&self) -> Result<BalanceMap, DangError> {
        Ok(self.balances.read().await.clone())
    }
}
