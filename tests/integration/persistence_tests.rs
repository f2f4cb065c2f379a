//! Snapshot persistence: round trips, missing files, corrupt files

use std::fs;

use chrono::NaiveDate;
use elidune_desk::{
    config::{AppConfig, StorageConfig},
    models::{MemberKind, MemberRole, NewBook, NewMember},
    repository::{JsonFileStore, Snapshot, Store},
    AppState, CatalogService,
};
use tempfile::TempDir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
}

fn populate(catalog: &mut CatalogService) {
    let dune = catalog
        .add_book(NewBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "9780441013593".to_string(),
            total_copies: 2,
            category: "Fiction".to_string(),
        })
        .unwrap();
    let ada = catalog
        .add_member(NewMember {
            role: MemberRole::Student,
            name: "Ada".to_string(),
            email: "ada@example.org".to_string(),
            phone: "555-0101".to_string(),
            roll_number: Some("R100".to_string()),
        })
        .unwrap();
    catalog
        .add_member(NewMember {
            role: MemberRole::Librarian,
            name: "Grace".to_string(),
            email: "grace@example.org".to_string(),
            phone: "555-0102".to_string(),
            roll_number: None,
        })
        .unwrap();

    let first = catalog.issue_book(dune.id, ada.id, day(1), day(15)).unwrap();
    catalog.issue_book(dune.id, ada.id, day(2), day(16)).unwrap();
    catalog.return_book(first.id, day(5)).unwrap();
}

#[test]
fn test_round_trip_through_files() {
    let dir = TempDir::new().unwrap();
    let mut catalog = CatalogService::open(JsonFileStore::in_dir(dir.path()));
    populate(&mut catalog);
    let saved = catalog.snapshot().clone();

    let reopened = CatalogService::open(JsonFileStore::in_dir(dir.path()));

    assert_eq!(reopened.snapshot(), &saved);
    assert_eq!(reopened.books()[0].available_copies, 1);
    assert_eq!(
        reopened.members()[0].kind,
        MemberKind::Student {
            roll_number: "R100".to_string()
        }
    );
    assert_eq!(reopened.members()[1].kind, MemberKind::Librarian);
    assert_eq!(reopened.loans()[0].return_date, Some(day(5)));
    assert_eq!(reopened.loans()[1].return_date, None);
}

#[test]
fn test_each_collection_has_its_own_file() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::in_dir(dir.path().join("nested"));
    let mut catalog = CatalogService::open(store.clone());
    populate(&mut catalog);

    for path in [store.books_path(), store.members_path(), store.loans_path()] {
        assert!(path.exists(), "{} missing", path.display());
    }
    let leftovers: Vec<_> = fs::read_dir(dir.path().join("nested"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_missing_files_load_empty() {
    let dir = TempDir::new().unwrap();
    let snapshot = JsonFileStore::in_dir(dir.path()).load_all();
    assert_eq!(snapshot, Snapshot::default());
}

#[test]
fn test_corrupt_collection_loads_empty_and_others_survive() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::in_dir(dir.path());
    let mut catalog = CatalogService::open(store.clone());
    populate(&mut catalog);

    fs::write(store.books_path(), b"{ not json").unwrap();

    let snapshot = store.load_all();
    assert!(snapshot.books.is_empty());
    assert_eq!(snapshot.members.len(), 2);
    assert_eq!(snapshot.loans.len(), 2);
}

#[test]
fn test_save_failure_is_swallowed() {
    let dir = TempDir::new().unwrap();
    // A regular file where the data directory should be
    let blocker = dir.path().join("blocked");
    fs::write(&blocker, b"").unwrap();

    let mut catalog = CatalogService::open(JsonFileStore::in_dir(&blocker));
    let book = catalog
        .add_book(NewBook {
            title: "Dune".to_string(),
            total_copies: 1,
            ..Default::default()
        })
        .unwrap();

    assert_eq!(catalog.find_book(book.id).unwrap().title, "Dune");
}

#[test]
fn test_app_state_uses_configured_files() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        storage: StorageConfig {
            data_dir: dir.path().to_path_buf(),
            books_file: "catalogue.json".to_string(),
            ..StorageConfig::default()
        },
        ..AppConfig::default()
    };

    let mut state = AppState::open(config);
    populate(&mut state.catalog);

    assert!(dir.path().join("catalogue.json").exists());
    assert!(dir.path().join("members.json").exists());
    assert!(!dir.path().join("books.json").exists());
}
