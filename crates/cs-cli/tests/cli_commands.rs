//! Integration tests for the cs-cli commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Create a temp directory with a small, valid content set.
fn test_content() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("npcs.json"),
        r#"[
  {"id": "npc_silas", "name": "Silas Blackwood", "alignment": "neutral"},
  {"id": "npc_mara", "name": "Mara"}
]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("dialogues.json"),
        r#"{
  "npc_silas": {
    "silas_intro": {
      "npcText": "Ahoy. Care for a riddle?",
      "playerChoices": [
        {"text": "Tell me a riddle", "effects": [{"type": "TRIGGER_PUZZLE", "puzzleId": "RIDDLE_01"}]},
        {"text": "Strong folk only",
         "condition": {"type": "playerStat", "stat": "strength", "operator": ">=", "value": 10},
         "nextNodeId": "again"},
        {"text": "Bye", "nextNodeId": "END"}
      ]
    },
    "again": {"npcText": "Back so soon?", "playerChoices": [{"text": "Bye"}]},
    "solved": {"npcText": "Clever one.", "playerChoices": [{"text": "Thanks"}]},
    "failed": {"npcText": "Hah! Wrong."}
  }
}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("puzzles.json"),
        r#"[
  {"id": "RIDDLE_01", "description": "What has keys but opens no locks?",
   "successDialogNodeId": "solved", "failureDialogNodeId": "failed",
   "successEffects": [{"type": "UPDATE_PLAYER_STAT", "stat": "gold", "change": 5}]}
]"#,
    )
    .unwrap();
    dir
}

fn corsair() -> Command {
    Command::cargo_bin("corsair").unwrap()
}

fn data_arg(dir: &TempDir) -> String {
    dir.path().to_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_valid_content() {
    let dir = test_content();
    corsair()
        .args(["check", "--data", &data_arg(&dir)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("All checks passed")
                .and(predicate::str::contains("2 NPCs"))
                .and(predicate::str::contains("1 puzzles")),
        );
}

#[test]
fn check_fails_on_dangling_node() {
    let dir = test_content();
    fs::write(
        dir.path().join("dialogues.json"),
        r#"{"npc_silas": {"start": {"npcText": "Hm?", "playerChoices": [{"text": "Where?", "nextNodeId": "nowhere"}]}}}"#,
    )
    .unwrap();

    corsair()
        .args(["check", "--data", &data_arg(&dir)])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("next node 'nowhere' does not exist")
                .and(predicate::str::contains("error: 1 error")),
        );
}

#[test]
fn check_reports_malformed_file() {
    let dir = test_content();
    fs::write(dir.path().join("puzzles.json"), "[{not json").unwrap();

    corsair()
        .args(["check", "--data", &data_arg(&dir)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed puzzles.json"));
}

// ---------------------------------------------------------------------------
// npcs
// ---------------------------------------------------------------------------

#[test]
fn npcs_lists_every_npc() {
    let dir = test_content();
    corsair()
        .args(["npcs", "--data", &data_arg(&dir)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Silas Blackwood")
                .and(predicate::str::contains("neutral"))
                .and(predicate::str::contains("Mara"))
                .and(predicate::str::contains("2 NPCs")),
        );
}

#[test]
fn npcs_empty_dir() {
    let dir = TempDir::new().unwrap();
    corsair()
        .args(["npcs", "--data", &data_arg(&dir)])
        .assert()
        .success()
        .stdout(predicate::str::contains("No NPCs found"));
}

// ---------------------------------------------------------------------------
// tree
// ---------------------------------------------------------------------------

#[test]
fn tree_keeps_source_order() {
    let dir = test_content();
    let output = corsair()
        .args(["tree", "npc_silas", "--data", &data_arg(&dir)])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let order: Vec<usize> = ["silas_intro", "again", "solved", "failed"]
        .iter()
        .map(|id| stdout.find(id).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]), "{stdout}");
    assert!(stdout.contains("puzzle RIDDLE_01"));
    assert!(stdout.contains("stat strength >= 10"));
}

#[test]
fn tree_unknown_npc() {
    let dir = test_content();
    corsair()
        .args(["tree", "npc_ghost", "--data", &data_arg(&dir)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no dialogue tree for \"npc_ghost\""));
}

// ---------------------------------------------------------------------------
// talk
// ---------------------------------------------------------------------------

#[test]
fn talk_hides_unmet_choices() {
    let dir = test_content();
    corsair()
        .args(["talk", "npc_silas", "--data", &data_arg(&dir)])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Ahoy. Care for a riddle?")
                .and(predicate::str::contains("Strong folk only").not())
                .and(predicate::str::contains("2. Bye")),
        );
}

#[test]
fn talk_with_stats_shows_choice() {
    let dir = test_content();
    corsair()
        .args([
            "talk",
            "npc_silas",
            "--data",
            &data_arg(&dir),
            "--stat",
            "strength=12",
        ])
        .write_stdin("2\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("2. Strong folk only")
                .and(predicate::str::contains("Back so soon?")),
        );
}

#[test]
fn talk_through_a_puzzle() {
    let dir = test_content();
    corsair()
        .args(["talk", "npc_silas", "--data", &data_arg(&dir)])
        .write_stdin("1\ns\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("What has keys but opens no locks?")
                .and(predicate::str::contains("Clever one."))
                .and(predicate::str::contains("gold 5")),
        );
}

#[test]
fn talk_failed_puzzle() {
    let dir = test_content();
    corsair()
        .args(["talk", "npc_silas", "--data", &data_arg(&dir)])
        .write_stdin("1\nf\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Hah! Wrong.")
                .and(predicate::str::contains("gold 0"))
                .and(predicate::str::contains("(conversation over)")),
        );
}

#[test]
fn talk_to_stranger() {
    let dir = test_content();
    corsair()
        .args(["talk", "npc_nobody", "--data", &data_arg(&dir)])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Mysterious Figure has nothing to say.",
        ));
}

#[test]
fn talk_rejects_malformed_stat() {
    let dir = test_content();
    corsair()
        .args([
            "talk",
            "npc_silas",
            "--data",
            &data_arg(&dir),
            "--stat",
            "strength",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected NAME=VALUE"));
}
