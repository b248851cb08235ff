/// Balances within this distance of zero count as settled.
pub const SETTLE_TOLERANCE: f64 = 1e-9;

/// Residue left after a settlement sweep above this means the input did not sum to zero.
pub const CONSISTENCY_TOLERANCE: f64 = 1e-6;

/// Share of the largest balance allowed as residue, for amounts where `CONSISTENCY_TOLERANCE` is below float precision.
pub const RELATIVE_TOLERANCE: f64 = 1e-12;

pub const MAX_MEMBER_NAME_LEN: usize = 64;

pub const MAX_AMOUNT: f64 = 1_000_000.0;

/// Store path value that selects the in-memory store.
pub const IN_MEMORY_STORE: &str = ":memory:";
