use std::fs;

use galaga_next::error::GameError;
use galaga_next::score_store::*;

#[test]
fn missing_file_means_zero() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileScoreStore::new(dir.path().join("score"));
    assert_eq!(store.load().unwrap(), 0);
}

#[test]
fn file_store_keeps_only_the_best() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score");
    let mut store = FileScoreStore::new(&path);

    assert!(record_high_score(&mut store, 1500).unwrap());
    assert!(!record_high_score(&mut store, 900).unwrap());
    assert_eq!(store.load().unwrap(), 1500);

    assert!(record_high_score(&mut store, 2100).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "2100");

    // A fresh handle sees the persisted value.
    assert_eq!(FileScoreStore::new(&path).load().unwrap(), 2100);
}

#[test]
fn save_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("score");
    let mut store = FileScoreStore::new(&path);
    store.save(42).unwrap();
    assert_eq!(store.load().unwrap(), 42);
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score");
    fs::write(&path, "  777\n").unwrap();
    assert_eq!(FileScoreStore::new(&path).load().unwrap(), 777);
}

#[test]
fn corrupt_file_is_an_error_but_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score");
    fs::write(&path, "lots").unwrap();
    let store = FileScoreStore::new(&path);

    match store.load() {
        Err(GameError::ScoreFormat { contents, .. }) => assert_eq!(contents, "lots"),
        other => panic!("expected ScoreFormat, got {other:?}"),
    }
    assert_eq!(load_or_zero(&store), 0);
}

#[test]
fn memory_store_round_trip() {
    let mut store = MemoryScoreStore::default();
    assert_eq!(store.load().unwrap(), 0);
    assert!(record_high_score(&mut store, 10).unwrap());
    assert!(!record_high_score(&mut store, 10).unwrap());
    assert_eq!(load_or_zero(&store), 10);
}

#[test]
fn works_through_a_trait_object() {
    let mut boxed: Box<dyn HighScoreStore> = Box::new(MemoryScoreStore::default());
    record_high_score(boxed.as_mut(), 99).unwrap();
    assert_eq!(load_or_zero(boxed.as_ref()), 99);
}

#[test]
fn higher_score_replaces_a_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score");
    fs::write(&path, "garbage").unwrap();
    let mut store = FileScoreStore::new(&path);

    assert!(record_high_score(&mut store, 5000).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "5000");
    assert_eq!(store.load().unwrap(), 5000);
}
