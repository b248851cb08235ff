mod optimizer_tests;
mod storage_tests;

use crate::core::models::{BalanceMap, Member};
use crate::core::services::DangService;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub fn create_test_service() -> DangService<InMemoryStorage> {
    let _ = env_logger::builder().is_test(true).try_init();
    DangService::new(InMemoryStorage::new())
}

pub fn members(names: &[&str]) -> Vec<Member> {
    names.iter().map(|n| Member::from(*n)).collect()
}

pub fn balance_map(entries: &[(&str, f64)]) -> BalanceMap {
    entries.iter().map(|(n, b)| (Member::from(*n), *b)).collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {} but got {}",
        expected,
        actual
    );
}
