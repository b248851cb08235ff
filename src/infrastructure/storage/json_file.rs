//! JSON-file backed store.
//!
//! The whole store is one snapshot file. Each mutation writes a fresh snapshot
//! to a temp file and renames it over the old one before the in-memory copy is
//! updated, so the file is never half written and a dropped handle has nothing
//! left to flush.

use crate::core::errors::DangError;
use crate::core::models::{BalanceMap, Member, MemberRecord};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Snapshot {
    next_id: u64,
    members: Vec<MemberRecord>,
    balances: BalanceMap,
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot {
            next_id: 1,
            members: Vec::new(),
            balances: BalanceMap::new(),
        }
    }
}

pub struct JsonFileStorage {
    path: PathBuf,
    state: RwLock<Snapshot>,
}

impl JsonFileStorage {
    /// Opens the store at `path`, creating an empty one if the file does not exist.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DangError> {
        let path = path.as_ref().to_path_buf();
        let snapshot = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| DangError::StorageError(format!("Failed to parse {}: {}", path.display(), e)))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No store at {}, starting empty", path.display());
                let snapshot = Snapshot::default();
                write_atomic(&path, &snapshot).await?;
                snapshot
            }
            Err(e) => {
                return Err(DangError::StorageError(format!("Failed to open {}: {}", path.display(), e)));
            }
        };

        info!(
            "Opened store {} with {} members",
            path.display(), snapshot.members.len()
        );
        Ok(JsonFileStorage {
            path,
            state: RwLock::new(snapshot),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy of the snapshot, persists it, then commits it.
    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut Snapshot) -> Result<T, DangError>,
    ) -> Result<T, DangError> {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        let out = change(&mut next)?;
        write_atomic(&self.path, &next).await?;
        *state = next;
        Ok(out)
    }
}

async fn write_atomic(path: &Path, snapshot: &Snapshot) -> Result<(), DangError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(|e| {
            DangError::StorageError(format!("Failed to create directory {}: {}", parent.display(), e))
        })?;
    }

    let bytes = serde_json::to_vec_pretty(snapshot)
        .map_err(|e| DangError::StorageError(format!("Failed to serialize store: {}", e)))?;

    // Temp file must sit next to the target for the rename to be atomic.
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, &bytes)
        .await
        .map_err(|e| DangError::StorageError(format!("Failed to write temp file: {}", e)))?;

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(DangError::StorageError(format!("Failed to rename temp file: {}", e)));
    }

    debug!("Wrote store snapshot to {}", path.display());
    Ok(())
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn add_member(&self, name: Member) -> Result<MemberRecord, DangError> {
        self.mutate(|snapshot| {
            if snapshot.members.iter().any(|m| m.name == name) {
                return Err(DangError::MemberAlreadyExists(name.to_string()));
            }
            let record = MemberRecord {
                id: snapshot.next_id,
                name: name.clone(),
                joined_at: Utc::now(),
            };
            snapshot.next_id += 1;
            snapshot.members.push(record.clone());
            snapshot.balances.insert(name, 0.0);
            Ok(record)
        })
        .await
    }

    async fn delete_member(&self, name: &Member) -> Result<(), DangError> {
        self.mutate(|snapshot| {
            let before = snapshot.members.len();
            snapshot.members.retain(|m| &m.name != name);
            if snapshot.members.len() == before {
                return Err(DangError::MemberNotFound(name.to_string()));
            }
            snapshot.balances.remove(name);
            Ok(())
        })
        .await
    }

    async fn update_balance(&self, name: &Member, delta: f64) -> Result<(), DangError> {
        self.mutate(|snapshot| {
            let balance = snapshot
                .balances
                .get_mut(name)
                .ok_or_else(|| DangError::MemberNotFound(name.to_string()))?;
            *balance += delta;
            Ok(())
        })
        .await
    }

    async fn apply_deltas(&self, deltas: &BalanceMap) -> Result<(), DangError> {
        self.mutate(|snapshot| {
            for (member, delta) in deltas {
                let balance = snapshot
                    .balances
                    .get_mut(member)
                    .ok_or_else(|| DangError::MemberNotFound(member.to_string()))?;
                *balance += delta;
            }
            Ok(())
        })
        .await
    }

    async fn get_member(&self, name: &Member) -> Result<Option<MemberRecord>, DangError> {
        Ok(self
            .state
            .read()
            .await
            .members
            .iter()
            .find(|m| &m.name == name)
            .cloned())
    }

    async fn get_members(&self) -> Result<Vec<MemberRecord>, DangError> {
        Ok(self.state.read().await.members.clone())
    }

    async fn get_balances(&self) -> Result<BalanceMap, DangError> {
        Ok(self.state.read().await.balances.clone())
    }
}
