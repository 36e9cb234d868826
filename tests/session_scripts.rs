//! Session Tests
//!
//! Drive a full session over in-memory input and output:
//! - Insert, save, and reload through a fresh repository
//! - Scripts run with console prompts and cannot nest
//! - No command failure ends the session

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use itemvault::cli::{Config, Console, Flow, RunMode, Session};
use itemvault::repository::Repository;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

type TestSession = Session<Cursor<Vec<u8>>, Vec<u8>>;

const POTION_FIELDS: &str = "Elixir\nHeals\n3\n3\nAlchemist\nPort\n10\n25\n100\n0.5\n0.1\n1\n";

fn session_with(input: &str, data_path: PathBuf, repository: Repository) -> TestSession {
    let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    Session::new(repository, data_path, Config::default(), console)
}

fn run_all(input: &str, data_path: PathBuf) -> String {
    let mut session = session_with(input, data_path, Repository::new());
    session.run_interactive().unwrap();
    String::from_utf8(session.into_output()).unwrap()
}

// =============================================================================
// End To End
// =============================================================================

#[test]
fn test_insert_save_reload() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("items.csv");

    let input = format!("insert\n{}save\nexit\n", POTION_FIELDS);
    let out = run_all(&input, path.clone());
    assert!(out.contains("Added item #1."));
    assert!(out.contains(&format!("Saved 1 items to {}", path.display())));

    let (reloaded, report) = Repository::open(&path).unwrap();
    assert_eq!(report.loaded, 1);

    let mut session = session_with("", path, reloaded);
    session.execute_line("show", RunMode::Interactive).unwrap();
    let shown = String::from_utf8(session.into_output()).unwrap();
    assert!(shown.starts_with("#1: Elixir (Potion, Epic), price 25, level 10, durability 100"));
    assert!(shown.contains("size [weight=0.5, length=0.1, slots=1]"));
    assert!(shown.trim_end().ends_with("maker: Alchemist (Port), description: Heals"));
}

#[test]
fn test_sword_round_trips_through_save_and_show() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("path.csv");
    let sword = "Sword\n\n2\n1\nBob\nTown\n5\n10.5\n80\n2.0\n1.0\n1\n";

    let mut first = session_with(sword, temp_dir.path().join("items.csv"), Repository::new());
    first.execute_line("insert", RunMode::Interactive).unwrap();
    first
        .execute_line(&format!("save {}", path.display()), RunMode::Interactive)
        .unwrap();
    let before_save = first.repository().get(1).unwrap().to_string();

    let (reloaded, report) = Repository::open(&path).unwrap();
    assert_eq!(report.loaded, 1);

    let mut second = session_with("", path, reloaded);
    second.execute_line("show", RunMode::Interactive).unwrap();
    let shown = String::from_utf8(second.into_output()).unwrap();

    assert_eq!(shown, format!("{}\n", before_save));
    assert!(before_save.starts_with(
        "#1: Sword (Weapon, Rare), price 10.5, level 5, durability 80, created "
    ));
    assert!(before_save.ends_with("size [weight=2, length=1, slots=1], maker: Bob (Town)"));
}

#[test]
fn test_exit_stops_reading() {
    let temp_dir = TempDir::new().unwrap();
    let out = run_all("count\nexit\ncount\n", temp_dir.path().join("items.csv"));
    assert_eq!(out.matches("0\n").count(), 1);
}

#[test]
fn test_errors_do_not_end_session() {
    let temp_dir = TempDir::new().unwrap();
    let input = "fly\nremove_key 3\nupdate\nfilter_kind\ncount\n";
    let out = run_all(input, temp_dir.path().join("items.csv"));

    assert!(out.contains("[error] unknown command 'fly'"));
    assert!(out.contains("[error] no item with id 3"));
    assert!(out.contains("[usage] update <id>"));
    assert!(out.contains("[usage] filter_kind"));
    assert!(out.trim_end().ends_with("0\n\n>"));
}

#[test]
fn test_ids_stay_unique_across_mixed_operations() {
    let temp_dir = TempDir::new().unwrap();
    let input = format!(
        "insert\n{p}insert\n{p}remove_key 1\ninsert\n{p}clear\ninsert\n{p}",
        p = POTION_FIELDS
    );
    let mut session = session_with(&input, temp_dir.path().join("items.csv"), Repository::new());
    session.run_interactive().unwrap();

    let ids: Vec<u32> = session.repository().iter().map(|item| item.id()).collect();
    assert_eq!(ids, vec![4]);
    assert_eq!(session.repository().next_id(), Some(5));
}

// =============================================================================
// Scripts
// =============================================================================

#[test]
fn test_script_prompts_read_console() {
    let temp_dir = TempDir::new().unwrap();
    let script = temp_dir.path().join("add.txt");
    fs::write(&script, "insert\ncount\n").unwrap();

    let mut session = session_with(
        POTION_FIELDS,
        temp_dir.path().join("items.csv"),
        Repository::new(),
    );
    let flow = session
        .execute_line(&format!("execute_script {}", script.display()), RunMode::Interactive)
        .unwrap();
    assert_eq!(flow, Flow::Continue);
    assert_eq!(session.repository().count(), 1);

    let out = String::from_utf8(session.into_output()).unwrap();
    assert!(out.contains("> insert\n"));
    assert!(out.contains("> count\n1\n"));
}

#[test]
fn test_nested_script_is_skipped_and_rest_runs() {
    let temp_dir = TempDir::new().unwrap();
    let inner = temp_dir.path().join("inner.txt");
    let outer = temp_dir.path().join("outer.txt");
    fs::write(&inner, "clear\n").unwrap();
    fs::write(
        &outer,
        format!("count\nexecute_script {}\n\nCOUNT\n", inner.display()),
    )
    .unwrap();

    let mut session = session_with("", temp_dir.path().join("items.csv"), Repository::new());
    session
        .execute_line(&format!("execute_script {}", outer.display()), RunMode::Interactive)
        .unwrap();

    let out = String::from_utf8(session.into_output()).unwrap();
    assert!(out.contains(": 4 lines"));
    assert!(out.contains("[skip] execute_script is not allowed inside a script"));
    assert!(out.contains("> COUNT\n0\n"));
    assert!(!out.contains("Cleared"));
}

#[test]
fn test_echo_can_be_disabled() {
    let temp_dir = TempDir::new().unwrap();
    let script = temp_dir.path().join("quiet.txt");
    fs::write(&script, "count\n").unwrap();

    let config = Config {
        echo_script_commands: false,
        ..Config::default()
    };
    let console = Console::new(Cursor::new(Vec::new()), Vec::new());
    let mut session = Session::new(
        Repository::new(),
        temp_dir.path().join("items.csv"),
        config,
        console,
    );
    session
        .execute_line(&format!("execute_script {}", script.display()), RunMode::Interactive)
        .unwrap();

    let out = String::from_utf8(session.into_output()).unwrap();
    assert!(!out.contains("> count"));
    assert!(out.ends_with(": 1 lines\n0\n"));
}
