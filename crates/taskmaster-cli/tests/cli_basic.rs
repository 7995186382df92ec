//! Basic CLI E2E tests.
//!
//! Each test drives the `taskmaster` binary against its own temporary data
//! directory and checks outputs across invocations.

mod common;

use common::{assert_contains, parse_json, run_cli, run_cli_failure, run_cli_success};
use serde_json::Value;
use tempfile::TempDir;

fn add_json(dir: &TempDir, args: &[&str]) -> Value {
    let mut full = vec!["task", "add", "--json"];
    full.extend_from_slice(args);
    parse_json(&run_cli_success(dir.path(), &full))
}

fn list_json(dir: &TempDir) -> Vec<Value> {
    parse_json(&run_cli_success(dir.path(), &["task", "list", "--json"]))
}

#[test]
fn test_task_add_uses_suggested_priority() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &["task", "add", "--json", "urgente:", "pagar", "conta"],
    );
    assert_eq!(code, 0, "task add failed: {stderr}");

    let task: Value = parse_json(&stdout);
    assert_eq!(task["text"], "urgente: pagar conta");
    assert_eq!(task["priority"], "high");
    assert_eq!(task["done"], false);
    assert_contains(&stderr, "[TaskMaster] Nova tarefa: urgente: pagar conta");
}

#[test]
fn test_task_add_manual_priority_wins() {
    let dir = TempDir::new().unwrap();
    let task = add_json(&dir, &["--priority", "low", "urgente"]);
    assert_eq!(task["priority"], "low");
}

#[test]
fn test_task_add_blank_is_ignored() {
    let dir = TempDir::new().unwrap();
    let stdout = run_cli_success(dir.path(), &["task", "add", "   "]);
    assert_contains(&stdout, "nothing to add");
    assert!(list_json(&dir).is_empty());
}

#[test]
fn test_task_lifecycle_with_undo() {
    let dir = TempDir::new().unwrap();
    let task = add_json(&dir, &["ler", "amanhã"]);
    assert_eq!(task["priority"], "medium");
    let id = task["id"].to_string();

    let stdout = run_cli_success(dir.path(), &["task", "toggle", &id]);
    assert_contains(&stdout, "Task done");

    run_cli_success(dir.path(), &["task", "remove", &id]);
    assert!(list_json(&dir).is_empty());

    let stdout = run_cli_success(dir.path(), &["task", "undo"]);
    assert_contains(&stdout, "Task restored");
    let tasks = list_json(&dir);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["done"], true);

    let stdout = run_cli_success(dir.path(), &["task", "undo"]);
    assert_contains(&stdout, "nothing to undo");
}

#[test]
fn test_task_unknown_id_is_noop() {
    let dir = TempDir::new().unwrap();
    let stdout = run_cli_success(dir.path(), &["task", "toggle", "12345"]);
    assert_contains(&stdout, "Task not found: 12345");
}

#[test]
fn test_task_list_board_view() {
    let dir = TempDir::new().unwrap();
    add_json(&dir, &["prazo", "do", "imposto"]);
    let low = add_json(&dir, &["arrumar", "quando", "der"]);
    run_cli_success(dir.path(), &["task", "toggle", &low["id"].to_string()]);

    let stdout = run_cli_success(dir.path(), &["task", "list"]);
    assert_contains(&stdout, "HIGH (1)");
    assert_contains(&stdout, "MEDIUM (0)");
    assert_contains(&stdout, "LOW (1)");
    assert_contains(&stdout, "[x]");
    assert_contains(&stdout, "Completed: 1 / 2");

    let filtered: Vec<Value> = parse_json(&run_cli_success(
        dir.path(),
        &["task", "list", "--priority", "low", "--json"],
    ));
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["text"], "arrumar quando der");
}

#[test]
fn test_task_move_and_reorder() {
    let dir = TempDir::new().unwrap();
    let a = add_json(&dir, &["--priority", "high", "a"]);
    let b = add_json(&dir, &["--priority", "high", "b"]);
    let c = add_json(&dir, &["--priority", "low", "c"]);
    let (a, b, c) = (a["id"].to_string(), b["id"].to_string(), c["id"].to_string());

    let stdout = run_cli_success(dir.path(), &["task", "move", &c, "high"]);
    assert_contains(&stdout, "-> high");

    // Board is newest first: b, a, then c appended by the move.
    run_cli_success(dir.path(), &["task", "reorder", "high", &c, &a, &b]);
    let ids: Vec<String> = list_json(&dir).iter().map(|t| t["id"].to_string()).collect();
    assert_eq!(ids, vec![c.clone(), a.clone(), b.clone()]);

    let (_, stderr, _) = run_cli_failure(dir.path(), &["task", "reorder", "high", &a, &b]);
    assert_contains(&stderr, "exactly once");
}

#[test]
fn test_suggest_and_history() {
    let dir = TempDir::new().unwrap();
    let stdout = run_cli_success(dir.path(), &["suggest", "--explain", "URGENTE", "hoje"]);
    assert_contains(&stdout, "high (keyword: urgente)");
    assert_contains(&stdout, "high   5");

    // The keyword shown belongs to the suggested tier.
    let stdout = run_cli_success(dir.path(), &["suggest", "hoje", "importante", "importante"]);
    assert_contains(&stdout, "medium (keyword: importante)");

    let stdout = run_cli_success(dir.path(), &["suggest", "comprar", "pão"]);
    assert_contains(&stdout, "none");

    let output: Value = parse_json(&run_cli_success(
        dir.path(),
        &["suggest", "--json", "revisar", "amanha"],
    ));
    assert_eq!(output["suggestion"], "medium");
    assert_eq!(output["keyword"], "amanhã");

    let history: Vec<Value> =
        parse_json(&run_cli_success(dir.path(), &["history", "show", "--json"]));
    assert_eq!(history.len(), 3);
    assert_eq!(history[0]["text"], "revisar amanha");

    run_cli_success(dir.path(), &["history", "clear"]);
    let stdout = run_cli_success(dir.path(), &["history", "show"]);
    assert_contains(&stdout, "no suggestions recorded");
}

#[test]
fn test_theme_toggle_persists() {
    let dir = TempDir::new().unwrap();
    assert_eq!(run_cli_success(dir.path(), &["theme", "get"]).trim(), "light");
    assert_eq!(run_cli_success(dir.path(), &["theme", "toggle"]).trim(), "dark");
    assert_eq!(run_cli_success(dir.path(), &["theme", "get"]).trim(), "dark");
    run_cli_success(dir.path(), &["theme", "set", "light"]);
    assert_eq!(run_cli_success(dir.path(), &["theme", "get"]).trim(), "light");
    run_cli_failure(dir.path(), &["theme", "set", "sepia"]);
}

#[test]
fn test_config_disabling_notifications_falls_back_to_alert() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["config", "set", "notifications.enabled", "false"]);
    assert_eq!(
        run_cli_success(dir.path(), &["config", "get", "notifications.enabled"]).trim(),
        "false"
    );

    let (_, stderr, code) = run_cli(dir.path(), &["task", "add", "agora"]);
    assert_eq!(code, 0);
    assert_contains(&stderr, "ALERT: TaskMaster: Nova tarefa: agora");

    run_cli_failure(dir.path(), &["config", "get", "nope.nothing"]);
}

#[test]
fn test_malformed_store_starts_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("todos.json"), "{ broken").unwrap();
    assert!(list_json(&dir).is_empty());

    add_json(&dir, &["depois"]);
    assert_eq!(list_json(&dir).len(), 1);
}
