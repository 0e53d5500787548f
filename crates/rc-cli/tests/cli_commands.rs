#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

//! End-to-end tests for the `rollcall` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `rollcall` against `dir`, seeded and without real-time pacing.
fn rollcall(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rollcall").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(dir.path())
        .args(["--instant", "--seed", "1"]);
    cmd
}

/// A data directory with three students on the roster.
fn class() -> TempDir {
    let dir = TempDir::new().unwrap();
    rollcall(&dir)
        .args(["roster", "set", "Amy", "Bo", "Cy"])
        .assert()
        .success();
    dir
}

// ---------------------------------------------------------------------------
// roster
// ---------------------------------------------------------------------------

#[test]
fn roster_set_and_show() {
    let dir = TempDir::new().unwrap();
    rollcall(&dir)
        .args(["roster", "set", "Amy", "Bo", "Amy", "Cy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 3 students"));

    rollcall(&dir)
        .args(["roster", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amy"))
        .stdout(predicate::str::contains("Cy"))
        .stdout(predicate::str::contains("3 students"));

    assert!(dir.path().join("students.json").exists());
}

#[test]
fn roster_show_empty() {
    let dir = TempDir::new().unwrap();
    rollcall(&dir)
        .args(["roster", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No students yet."));
}

#[test]
fn roster_add_skips_duplicates() {
    let dir = class();
    rollcall(&dir)
        .args(["roster", "add", "Bo", "Di"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1 students (4 total)"));
}

#[test]
fn roster_import_from_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("class.txt");
    fs::write(&file, "Amy\nBo\nCy\n").unwrap();

    rollcall(&dir)
        .args(["roster", "import"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported"));

    rollcall(&dir)
        .args(["roster", "export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amy\nBo\nCy"));
}

#[test]
fn roster_import_missing_file() {
    let dir = TempDir::new().unwrap();
    rollcall(&dir)
        .args(["roster", "import", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn roster_export_to_file() {
    let dir = class();
    let out = dir.path().join("out.txt");
    rollcall(&dir)
        .args(["roster", "export", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "Amy\nBo\nCy");
}

#[test]
fn roster_clear() {
    let dir = class();
    rollcall(&dir)
        .args(["roster", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Roster cleared"));
    rollcall(&dir)
        .args(["roster", "show"])
        .assert()
        .stdout(predicate::str::contains("No students yet."));
}

// ---------------------------------------------------------------------------
// draws
// ---------------------------------------------------------------------------

#[test]
fn random_needs_students() {
    let dir = TempDir::new().unwrap();
    rollcall(&dir)
        .arg("random")
        .assert()
        .failure()
        .stderr(predicate::str::contains("请先添加学生名单"));
}

#[test]
fn random_records_history() {
    let dir = class();
    rollcall(&dir)
        .arg("random")
        .assert()
        .success()
        .stdout(predicate::str::contains("🔊"));

    rollcall(&dir)
        .args(["history", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("随机点名"))
        .stdout(predicate::str::contains("1 records"));
}

#[test]
fn question_records_history() {
    let dir = class();
    rollcall(&dir).arg("question").assert().success();
    rollcall(&dir)
        .args(["history", "show"])
        .assert()
        .stdout(predicate::str::contains("上课提问"));
}

#[test]
fn random_with_speech_off_is_quiet() {
    let dir = class();
    rollcall(&dir)
        .args(["--speech", "off", "random"])
        .assert()
        .success()
        .stdout(predicate::str::contains("🔊").not());
}

#[test]
fn quick_draw_records_each_name() {
    let dir = class();
    rollcall(&dir)
        .args(["quick", "--count", "2"])
        .assert()
        .success();
    rollcall(&dir)
        .args(["history", "show"])
        .assert()
        .stdout(predicate::str::contains("快速连抽"))
        .stdout(predicate::str::contains("2 records"));
}

#[test]
fn quick_draw_too_many() {
    let dir = class();
    rollcall(&dir)
        .args(["quick", "--count", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("学生总数不足"));
}

// ---------------------------------------------------------------------------
// sequence
// ---------------------------------------------------------------------------

#[test]
fn sequence_continues_from_saved_cursor() {
    let dir = class();
    rollcall(&dir)
        .args(["sequence", "--calls", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amy"))
        .stdout(predicate::str::contains("Bo"))
        .stdout(predicate::str::contains("Cy").not());

    rollcall(&dir)
        .arg("sequence")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cy"));
}

#[test]
fn sequence_rejects_zero_calls() {
    let dir = class();
    rollcall(&dir)
        .args(["sequence", "--calls", "0"])
        .assert()
        .failure();
}

#[test]
fn next_and_prev_move_cursor() {
    let dir = class();
    rollcall(&dir)
        .arg("next")
        .assert()
        .success()
        .stdout(predicate::str::contains("→ Bo"));
    rollcall(&dir)
        .arg("next")
        .assert()
        .stdout(predicate::str::contains("→ Cy"));
    rollcall(&dir)
        .arg("next")
        .assert()
        .stdout(predicate::str::contains("→ Amy"));
    rollcall(&dir)
        .arg("prev")
        .assert()
        .stdout(predicate::str::contains("→ Cy"));
}

#[test]
fn next_on_empty_roster() {
    let dir = TempDir::new().unwrap();
    rollcall(&dir)
        .arg("next")
        .assert()
        .success()
        .stdout(predicate::str::contains("No students yet."));
}

// ---------------------------------------------------------------------------
// call
// ---------------------------------------------------------------------------

#[test]
fn call_resolves_case_insensitively() {
    let dir = class();
    rollcall(&dir)
        .args(["call", "amy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("请 Amy 到办公室"));
    rollcall(&dir)
        .args(["history", "show"])
        .assert()
        .stdout(predicate::str::contains("手动叫号"));
}

#[test]
fn call_unknown_name() {
    let dir = class();
    rollcall(&dir)
        .args(["call", "Zed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("名单中没有 \"Zed\""));
}

// ---------------------------------------------------------------------------
// timer
// ---------------------------------------------------------------------------

#[test]
fn timer_runs_to_the_end() {
    let dir = TempDir::new().unwrap();
    rollcall(&dir)
        .args(["timer", "--duration", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("计时结束"))
        .stdout(predicate::str::contains("时间到！"));
}

#[test]
fn timer_rejects_zero() {
    let dir = TempDir::new().unwrap();
    rollcall(&dir)
        .args(["timer", "--duration", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("请输入有效的时间"));
}

// ---------------------------------------------------------------------------
// history
// ---------------------------------------------------------------------------

#[test]
fn history_empty() {
    let dir = TempDir::new().unwrap();
    rollcall(&dir)
        .args(["history", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No history yet."));
}

#[test]
fn history_export_csv() {
    let dir = class();
    rollcall(&dir).args(["call", "Bo"]).assert().success();
    rollcall(&dir)
        .args(["history", "export"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("时间,姓名,模式\n"))
        .stdout(predicate::str::contains(",Bo,手动叫号"));
}

#[test]
fn history_file_over_capacity_is_truncated() {
    let dir = TempDir::new().unwrap();
    let records: Vec<String> = (0..150)
        .map(|i| {
            format!(
                r#"{{"name":"s{i}","mode":"随机点名","timestamp":"2024-03-05T01:07:02Z"}}"#
            )
        })
        .collect();
    let json = format!("[{}]", records.join(","));
    fs::write(dir.path().join("history.json"), json).unwrap();

    rollcall(&dir)
        .args(["history", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100 records"));
}

#[test]
fn history_clear() {
    let dir = class();
    rollcall(&dir).args(["call", "Bo"]).assert().success();
    rollcall(&dir)
        .args(["history", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("History cleared"));
    rollcall(&dir)
        .args(["history", "show"])
        .assert()
        .stdout(predicate::str::contains("No history yet."));
}

// ---------------------------------------------------------------------------
// settings
// ---------------------------------------------------------------------------

#[test]
fn settings_show_defaults() {
    let dir = TempDir::new().unwrap();
    rollcall(&dir)
        .arg("settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("Speech rate"))
        .stdout(predicate::str::contains("30s"));
}

#[test]
fn settings_rate_is_clamped() {
    let dir = TempDir::new().unwrap();
    rollcall(&dir)
        .args(["settings", "rate", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Speech rate set to 10"));

    let saved = fs::read_to_string(dir.path().join("settings.json")).unwrap();
    assert!(saved.contains("\"speechRate\": 10"));
}

#[test]
fn settings_rate_nan_keeps_data_readable() {
    let dir = TempDir::new().unwrap();
    rollcall(&dir)
        .args(["settings", "rate", "NaN"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Speech rate set to 1"));
    rollcall(&dir)
        .arg("settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("Speech rate"));
}

#[test]
fn settings_count_and_interval() {
    let dir = TempDir::new().unwrap();
    rollcall(&dir)
        .args(["settings", "count", "20"])
        .assert()
        .stdout(predicate::str::contains("Quick-draw count set to 10"));
    rollcall(&dir)
        .args(["settings", "interval", "0"])
        .assert()
        .stdout(predicate::str::contains("Sequence interval set to 1s"));
}

#[test]
fn settings_speech_off() {
    let dir = TempDir::new().unwrap();
    rollcall(&dir)
        .args(["settings", "speech", "off"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Speech off"));
}

// ---------------------------------------------------------------------------
// reset
// ---------------------------------------------------------------------------

#[test]
fn reset_requires_confirmation() {
    let dir = class();
    rollcall(&dir)
        .arg("reset")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn reset_clears_everything() {
    let dir = class();
    rollcall(&dir).args(["call", "Amy"]).assert().success();
    rollcall(&dir)
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All data reset"));
    rollcall(&dir)
        .args(["roster", "show"])
        .assert()
        .stdout(predicate::str::contains("No students yet."));
    rollcall(&dir)
        .args(["history", "show"])
        .assert()
        .stdout(predicate::str::contains("No history yet."));
}

// ---------------------------------------------------------------------------
// shell
// ---------------------------------------------------------------------------

#[test]
fn shell_draws_and_quits() {
    let dir = class();
    rollcall(&dir)
        .arg("shell")
        .write_stdin("mode random\n\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 students"))
        .stdout(predicate::str::contains("🔊"));

    rollcall(&dir)
        .args(["history", "show"])
        .assert()
        .stdout(predicate::str::contains("随机点名"));
}

#[test]
fn shell_reports_unknown_commands() {
    let dir = class();
    rollcall(&dir)
        .arg("shell")
        .write_stdin("dance\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("未知命令: dance"));
}

#[test]
fn shell_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    rollcall(&dir)
        .arg("shell")
        .write_stdin("help\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("quit"))
        .stdout(predicate::str::contains("modes: sequence (顺序点名)"));
}
