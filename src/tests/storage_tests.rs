use crate::core::errors::DangError;
use crate::core::models::{BalanceMap, Member};
use crate::infrastructure::storage::Storage;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use crate::infrastructure::storage::json_file::JsonFileStorage;
use tempfile::TempDir;

async fn exercise_store(store: &dyn Storage) {
    let ali = Member::from("Ali");
    let sara = Member::from("Sara");

    let first = store.add_member(ali.clone()).await.unwrap();
    let second = store.add_member(sara.clone()).await.unwrap();
    assert_eq!(first.id + 1, second.id);
    assert_eq!(
        store.add_member(ali.clone()).await.unwrap_err(),
        DangError::MemberAlreadyExists("Ali".to_string())
    );

    store.update_balance(&ali, 12.5).await.unwrap();
    store.update_balance(&ali, -2.5).await.unwrap();
    store.update_balance(&sara, -10.0).await.unwrap();
    let balances = store.get_balances().await.unwrap();
    assert_eq!(balances[&ali], 10.0);
    assert_eq!(balances[&sara], -10.0);

    let ghost = Member::from("Ghost");
    assert_eq!(
        store.update_balance(&ghost, 1.0).await.unwrap_err(),
        DangError::MemberNotFound("Ghost".to_string())
    );
    assert!(store.get_member(&ghost).await.unwrap().is_none());

    let deltas: BalanceMap = [(ali.clone(), -10.0), (sara.clone(), 10.0)].into_iter().collect();
    store.apply_deltas(&deltas).await.unwrap();
    let balances = store.get_balances().await.unwrap();
    assert_eq!(balances[&ali], 0.0);
    assert_eq!(balances[&sara], 0.0);

    // One unknown member rejects the whole batch.
    let deltas: BalanceMap = [(ali.clone(), 5.0), (ghost.clone(), -5.0)].into_iter().collect();
    assert_eq!(
        store.apply_deltas(&deltas).await.unwrap_err(),
        DangError::MemberNotFound("Ghost".to_string())
    );
    assert_eq!(store.get_balances().await.unwrap()[&ali], 0.0);

    store.delete_member(&ali).await.unwrap();
    assert!(store.get_member(&ali).await.unwrap().is_none());
    assert!(!store.get_balances().await.unwrap().contains_key(&ali));
    assert!(store.delete_member(&ali).await.is_err());
}

#[tokio::test]
async fn test_in_memory_store() {
    let store = InMemoryStorage::new();
    exercise_store(&store).await;
}

#[tokio::test]
async fn test_json_file_store() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStorage::open(dir.path().join("danghub.json")).await.unwrap();
    exercise_store(&store).await;
}

#[tokio::test]
async fn test_json_file_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("danghub.json");

    {
        let store = JsonFileStorage::open(&path).await.unwrap();
        store.add_member(Member::from("Ali")).await.unwrap();
        store.add_member(Member::from("Sara")).await.unwrap();
        store.update_balance(&Member::from("Sara"), 7.25).await.unwrap();
    }
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());

    let reopened = JsonFileStorage::open(&path).await.unwrap();
    let names: Vec<String> = reopened
        .get_members()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.name.to_string())
        .collect();
    assert_eq!(names, vec!["Ali", "Sara"]);
    assert_eq!(reopened.get_balances().await.unwrap()[&Member::from("Sara")], 7.25);

    let third = reopened.add_member(Member::from("Reza")).await.unwrap();
    assert_eq!(third.id, 3);
}

#[tokio::test]
async fn test_json_file_store_rejects_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("danghub.json");
    std::fs::write(&path, b"not json").unwrap();

    let result = JsonFileStorage::open(&path).await;
    assert!(matches!(result, Err(DangError::StorageError(_))));
}

#[tokio::test]
async fn test_failed_mutation_leaves_state_unchanged() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStorage::open(dir.path().join("danghub.json")).await.unwrap();
    store.add_member(Member::from("Ali")).await.unwrap();

    assert!(store.delete_member(&Member::from("Nobody")).await.is_err());
    assert_eq!(store.get_members().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_json_file_apply_deltas_persists_in_one_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("danghub.json");
    let store = JsonFileStorage::open(&path).await.unwrap();
    store.add_member(Member::from("Ali")).await.unwrap();
    store.add_member(Member::from("Sara")).await.unwrap();

    let deltas: BalanceMap = [(Member::from("Ali"), -4.5), (Member::from("Sara"), 4.5)].into_iter().collect();
    store.apply_deltas(&deltas).await.unwrap();
    drop(store);

    let reopened = JsonFileStorage::open(&path).await.unwrap();
    let balances = reopened.get_balances().await.unwrap();
    assert_eq!(balances[&Member::from("Ali")], -4.5);
    assert_eq!(balances[&Member::from("Sara")], 4.5);
}
