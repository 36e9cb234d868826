//! Persistence Tests
//!
//! Save and load through the repository against real files:
//! - Quoted fields survive a save/load cycle
//! - The id generator resumes after the largest stored id
//! - Malformed rows are skipped, never fatal
//! - A failed load leaves the collection untouched

use std::fs;

use itemvault::model::{ItemDraft, ItemKind, ItemSize, Maker, Rarity};
use itemvault::repository::{Repository, RepositoryError};
use itemvault::storage::HEADER;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn draft(name: &str) -> ItemDraft {
    ItemDraft {
        name: name.to_string(),
        description: "plain".to_string(),
        rarity: Rarity::Epic,
        kind: ItemKind::Armor,
        size: ItemSize {
            weight: 12.5,
            length: 0.75,
            slots: 4,
        },
        maker: Maker::new("Dwarf", "Deep Hall"),
        required_level: 30,
        price: 999.99,
        durability: 100,
    }
}

fn row(id: u32, name: &str) -> String {
    format!(
        "{};{};;Common;Misc;1;1;1;Smith;;1;1;50;2026-10-19T08:00:00+00:00",
        id, name
    )
}

fn write_data_file(path: &std::path::Path, rows: &[String]) {
    let mut content = format!("{}\n", HEADER);
    for r in rows {
        content.push_str(r);
        content.push('\n');
    }
    fs::write(path, content).unwrap();
}

// =============================================================================
// Save / Load
// =============================================================================

#[test]
fn test_save_then_load_restores_items() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("items.csv");

    let mut repo = Repository::new();
    let a = repo.insert(draft("Helm")).unwrap();
    let b = repo.insert(draft("Greaves")).unwrap();
    assert_eq!(repo.save(&path).unwrap(), 2);

    let (loaded, report) = Repository::open(&path).unwrap();
    assert!(report.found);
    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped, 0);

    for id in [a, b] {
        let before = repo.get(id).unwrap();
        let after = loaded.get(id).unwrap();
        assert_eq!(after.to_draft(), before.to_draft());
        assert_eq!(after.created_at(), before.created_at());
    }
}

#[test]
fn test_name_with_separator_and_quote() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("items.csv");

    let mut repo = Repository::new();
    let mut d = draft(r#"Blade; "the" edge"#);
    d.description = "tab\there".to_string();
    let id = repo.insert(d).unwrap();
    repo.save(&path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains(r#";"Blade; ""the"" edge";"#));

    let (loaded, _) = Repository::open(&path).unwrap();
    let item = loaded.get(id).unwrap();
    assert_eq!(item.name, r#"Blade; "the" edge"#);
    assert_eq!(item.description, "tab\there");
}

#[test]
fn test_empty_collection_saves_header_only() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("items.csv");

    Repository::new().save(&path).unwrap();

    let (loaded, report) = Repository::open(&path).unwrap();
    assert!(report.found);
    assert!(loaded.is_empty());
    assert_eq!(loaded.next_id(), Some(1));
}

// =============================================================================
// Id Generator After Load
// =============================================================================

#[test]
fn test_next_id_follows_largest_loaded_id() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("items.csv");
    write_data_file(&path, &[row(3, "a"), row(7, "b"), row(1, "c")]);

    let (mut repo, _) = Repository::open(&path).unwrap();
    assert_eq!(repo.next_id(), Some(8));

    let id = repo.insert(draft("new")).unwrap();
    assert_eq!(id, 8);
}

#[test]
fn test_insert_after_largest_possible_id_is_refused() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("items.csv");
    write_data_file(&path, &[row(u32::MAX, "last")]);

    let (mut repo, _) = Repository::open(&path).unwrap();
    assert_eq!(repo.next_id(), None);

    let err = repo.insert(draft("new")).unwrap_err();
    assert!(matches!(err, RepositoryError::IdsExhausted));
    assert_eq!(repo.count(), 1);
    assert_eq!(repo.get(u32::MAX).unwrap().name, "last");
}

#[test]
fn test_last_free_id_is_used_once() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("items.csv");
    write_data_file(&path, &[row(u32::MAX - 1, "almost")]);

    let (mut repo, _) = Repository::open(&path).unwrap();
    assert_eq!(repo.insert(draft("final")).unwrap(), u32::MAX);
    assert!(repo.insert(draft("one more")).is_err());
    assert_eq!(repo.count(), 2);
    assert_eq!(repo.get(u32::MAX - 1).unwrap().name, "almost");
}

#[test]
fn test_duplicate_ids_last_row_wins() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("items.csv");
    write_data_file(&path, &[row(2, "first"), row(2, "second")]);

    let (repo, report) = Repository::open(&path).unwrap();
    assert_eq!(report.loaded, 2);
    assert_eq!(repo.count(), 1);
    assert_eq!(repo.get(2).unwrap().name, "second");
}

// =============================================================================
// Malformed Input
// =============================================================================

#[test]
fn test_short_row_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("items.csv");
    write_data_file(
        &path,
        &[
            row(1, "a"),
            row(2, "b"),
            "4;short;;Rare;Weapon;1;1;1;Bob;Town".to_string(),
            row(3, "c"),
        ],
    );

    let (repo, report) = Repository::open(&path).unwrap();
    assert_eq!(report.loaded, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(repo.count(), 3);
    assert!(repo.get(4).is_none());
}

#[test]
fn test_bad_values_fall_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("items.csv");
    write_data_file(
        &path,
        &["5;Odd;;Mythic;Wand;heavy;1;1;;;1;cheap;50;yesterday".to_string()],
    );

    let (repo, _) = Repository::open(&path).unwrap();
    let item = repo.get(5).unwrap();
    assert_eq!(item.rarity, Rarity::Common);
    assert_eq!(item.kind, ItemKind::Misc);
    assert_eq!(item.size.weight, 0.0);
    assert_eq!(item.price, 0.0);
    assert_eq!(item.maker.name, "Unknown");
}

#[test]
fn test_missing_file_empties_collection() {
    let temp_dir = TempDir::new().unwrap();
    let mut repo = Repository::new();
    repo.insert(draft("kept?")).unwrap();

    let report = repo.load(&temp_dir.path().join("none.csv")).unwrap();
    assert!(!report.found);
    assert!(repo.is_empty());
    assert_eq!(repo.next_id(), Some(1));
}

#[test]
fn test_unreadable_path_keeps_collection() {
    let temp_dir = TempDir::new().unwrap();
    let mut repo = Repository::new();
    repo.insert(draft("kept")).unwrap();

    // A directory opens on some platforms but never reads as a file.
    let result = repo.load(temp_dir.path());
    assert!(result.is_err());
    assert_eq!(repo.count(), 1);
    assert_eq!(repo.get(1).unwrap().name, "kept");
}

#[test]
fn test_failed_save_keeps_collection() {
    let temp_dir = TempDir::new().unwrap();
    let mut repo = Repository::new();
    repo.insert(draft("kept")).unwrap();

    let result = repo.save(&temp_dir.path().join("no_dir").join("items.csv"));
    assert!(result.is_err());
    assert_eq!(repo.count(), 1);
}
