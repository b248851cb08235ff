use crate::constants::MAX_MEMBER_NAME_LEN;
use crate::core::calculator::{compute_balances, split_evenly};
use crate::core::errors::DangError;
use crate::core::models::{BalanceMap, Expenses, Member, MemberRecord, RoundOutcome, SettlementPlan};
use crate::core::optimizer::{consistency_tolerance, optimize_transactions};
use crate::infrastructure::storage::Storage;
use log::{debug, info, warn};
use tokio::sync::Mutex;

/// Controller between the presentation layer and the store.
///
/// Owns the single storage handle for the session; all calculation is
/// delegated to the pure calculator and optimizer.
///
/// Every read-plan-write sequence on balances runs under `write_lock`, and its
/// changes reach the store through one `apply_deltas` call.
pub struct DangService<S: Storage> {
    storage: S,
    write_lock: Mutex<()>,
}

impl<S: Storage> DangService<S> {
    pub fn new(storage: S) -> Self {
        info!("Initializing DangService");
        DangService {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn validate_member_name(&self, name: &str) -> Result<(), DangError> {
        if name.is_empty() {
            return Err(DangError::invalid_field("name", "Invalid name", "name cannot be empty"));
        }
        if name.chars().count() > MAX_MEMBER_NAME_LEN {
            return Err(DangError::invalid_field(
                "name",
                "name Too Long",
                format!("name cannot exceed {} characters", MAX_MEMBER_NAME_LEN),
            ));
        }
        if name.chars().any(|c| c.is_control()) {
            return Err(DangError::invalid_field(
                "name",
                "Invalid name",
                "name contains invalid characters",
            ));
        }
        Ok(())
    }

    async fn validate_registered<'a>(&self, members: impl IntoIterator<Item = &'a Member>) -> Result<(), DangError> {
        for member in members {
            if self.storage.get_member(member).await?.is_none() {
                warn!("Member {} is not registered", member);
                return Err(DangError::MemberNotFound(member.to_string()));
            }
        }
        Ok(())
    }

    // MEMBERS

    pub async fn add_member(&self, name: &str) -> Result<MemberRecord, DangError> {
        let name = name.trim();
        self.validate_member_name(name)?;
        let record = self.storage.add_member(Member::from(name)).await?;
        info!("Added member {} with id {}", record.name, record.id);
        Ok(record)
    }

    /// Removes a member whose balance is settled.
    pub async fn remove_member(&self, name: &str) -> Result<(), DangError> {
        let member = Member::from(name.trim());
        let _guard = self.write_lock.lock().await;
        let balances = self.storage.get_balances().await?;
        let tolerance = consistency_tolerance(&balances);
        if let Some(balance) = balances.get(&member).copied().filter(|b| b.abs() > tolerance) {
            warn!("Refusing to remove {} with balance {}", member, balance);
            return Err(DangError::UnsettledBalance {
                member: member.to_string(),
                balance,
            });
        }
        self.storage.delete_member(&member).await?;
        info!("Removed member {}", member);
        Ok(())
    }

    pub async fn list_members(&self) -> Result<Vec<MemberRecord>, DangError> {
        self.storage.get_members().await
    }

    // ROUNDS

    /// Records a round given what each member paid and who fronted the total.
    ///
    /// Rounds whose balances do not net to zero are rejected and nothing is stored.
    pub async fn record_round(&self, expenses: &Expenses, payer: &Member) -> Result<RoundOutcome, DangError> {
        info!("Recording round of {} members paid by {}", expenses.len(), payer);
        let balances = compute_balances(expenses, payer)?;
        self.commit_round(balances).await
    }

    /// Records a round where `payer` fronted `total`, split evenly across `selected`.
    pub async fn split_expense(
        &self,
        selected: &[Member],
        payer: &Member,
        total: f64,
    ) -> Result<RoundOutcome, DangError> {
        info!(
            "Splitting {} paid by {} across {} members",
            total, payer, selected.len()
        );
        let balances = split_evenly(selected, payer, total)?;
        self.commit_round(balances).await
    }

    async fn commit_round(&self, balances: BalanceMap) -> Result<RoundOutcome, DangError> {
        let _guard = self.write_lock.lock().await;
        self.validate_registered(balances.keys()).await?;
        let net: f64 = balances.values().sum();
        if net.abs() > consistency_tolerance(&balances) {
            warn!("Round balances net to {} instead of zero", net);
            return Err(DangError::Consistency { residual: net });
        }
        let plan = optimize_transactions(&balances)?;

        self.storage.apply_deltas(&balances).await?;
        debug!("Merged round balances into store: {:?}", balances);

        Ok(RoundOutcome { balances, plan })
    }

    // SETTLEMENT

    pub async fn balances(&self) -> Result<BalanceMap, DangError> {
        self.storage.get_balances().await
    }

    /// Plan that settles the cumulative stored balances.
    pub async fn settlement_plan(&self) -> Result<SettlementPlan, DangError> {
        let balances = self.storage.get_balances().await?;
        optimize_transactions(&balances)
    }

    /// Settles the stored balances by applying the plan to the store.
    pub async fn record_settlement(&self) -> Result<SettlementPlan, DangError> {
        let _guard = self.write_lock.lock().await;
        let balances = self.storage.get_balances().await?;
        let plan = optimize_transactions(&balances)?;

        let mut deltas = BalanceMap::new();
        plan.apply(&mut deltas);
        self.storage.apply_deltas(&deltas).await?;
        info!("Recorded settlement of {} payments totalling {}", plan.len(), plan.total());
        Ok(plan)
    }
}
