//! Lending rules observed through a file-backed catalog

use chrono::NaiveDate;
use elidune_desk::{
    error::{Entity, ErrorCode},
    models::{BookEdit, MemberEdit, MemberRole, NewBook, NewMember},
    repository::JsonFileStore,
    AppError, CatalogService,
};
use tempfile::TempDir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
}

fn student(name: &str, roll: &str) -> NewMember {
    NewMember {
        role: MemberRole::Student,
        name: name.to_string(),
        email: format!("{}@example.org", name.to_lowercase()),
        phone: String::new(),
        roll_number: Some(roll.to_string()),
    }
}

#[test]
fn test_dune_scenario_survives_restart() {
    let dir = TempDir::new().unwrap();
    let mut catalog = CatalogService::open(JsonFileStore::in_dir(dir.path()));

    let dune = catalog
        .add_book(NewBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "9780441013593".to_string(),
            total_copies: 2,
            category: "Fiction".to_string(),
        })
        .unwrap();
    assert_eq!(dune.available_copies, 2);

    let a = catalog.add_member(student("A", "R1")).unwrap();
    let b = catalog.add_member(student("B", "R2")).unwrap();

    let loan_a = catalog.issue_book(dune.id, a.id, day(1), day(15)).unwrap();
    catalog.issue_book(dune.id, b.id, day(1), day(15)).unwrap();

    let err = catalog.issue_book(dune.id, a.id, day(2), day(16)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ItemNotAvailable);

    // Continue in a fresh session
    drop(catalog);
    let mut catalog = CatalogService::open(JsonFileStore::in_dir(dir.path()));
    assert_eq!(catalog.find_book(dune.id).unwrap().available_copies, 0);
    assert_eq!(catalog.active_loans().len(), 2);

    catalog.return_book(loan_a.id, day(4)).unwrap();
    assert_eq!(catalog.find_book(dune.id).unwrap().available_copies, 1);

    let err = catalog.return_book(loan_a.id, day(5)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyReturned);
    assert_eq!(catalog.find_book(dune.id).unwrap().available_copies, 1);
}

#[test]
fn test_student_roll_number_kept_on_email_edit() {
    let dir = TempDir::new().unwrap();
    let mut catalog = CatalogService::open(JsonFileStore::in_dir(dir.path()));
    let ada = catalog.add_member(student("Ada", "R100")).unwrap();

    catalog
        .edit_member(
            ada.id,
            MemberEdit {
                email: Some("countess@example.org".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let catalog = CatalogService::open(JsonFileStore::in_dir(dir.path()));
    let stored = catalog.find_member(ada.id).unwrap();
    assert_eq!(stored.email, "countess@example.org");
    assert_eq!(stored.roll_number(), Some("R100"));
}

#[test]
fn test_delete_book_removes_returned_history_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut catalog = CatalogService::open(JsonFileStore::in_dir(dir.path()));
    let book = catalog
        .add_book(NewBook {
            title: "Emma".to_string(),
            total_copies: 1,
            ..Default::default()
        })
        .unwrap();
    let ada = catalog.add_member(student("Ada", "R1")).unwrap();
    let loan = catalog.issue_book(book.id, ada.id, day(1), day(2)).unwrap();
    catalog.return_book(loan.id, day(2)).unwrap();

    catalog.delete_book(book.id).unwrap();

    let catalog = CatalogService::open(JsonFileStore::in_dir(dir.path()));
    assert!(catalog.books().is_empty());
    assert!(catalog.loans().is_empty());
    assert_eq!(catalog.members().len(), 1);
}

#[test]
fn test_not_found_errors_carry_entity() {
    let dir = TempDir::new().unwrap();
    let mut catalog = CatalogService::open(JsonFileStore::in_dir(dir.path()));

    assert_eq!(
        catalog.edit_book(5, BookEdit::default()),
        Err(AppError::not_found(Entity::Book, 5))
    );
    assert_eq!(
        catalog.delete_member(6).unwrap_err().code(),
        ErrorCode::NoSuchUser
    );
    assert_eq!(
        catalog.find_loan(7).unwrap_err().to_string(),
        "Loan with id 7 not found"
    );
}
