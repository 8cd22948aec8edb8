//! CLI integration tests
//!
//! Run the built binary and check what reaches the log file.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn test_demo_replays_queued_entries_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("demo.log");

    let output = Command::new(env!("CARGO_BIN_EXE_deferlog"))
        .args(["demo", "--no-console", "--delay-ms", "10", "--level", "debug", "--file"])
        .arg(&log_path)
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "demo failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let content = fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    let position = |needle: &str| {
        lines
            .iter()
            .position(|l| l.contains(needle))
            .unwrap_or_else(|| panic!("missing line with {:?} in {:#?}", needle, lines))
    };

    assert!(position("starting") < position("opening pool"));
    assert!(position("opening pool") < position("slow handshake"));
    assert!(position("replica unavailable") < position("sink ready"));
    assert!(lines[position("replica unavailable")].contains("connection refused"));
    assert!(lines[position("credentials loaded")].contains("***REDACTED***"));
    assert!(!content.contains("hunter2"));
    assert!(!content.contains("shutting down"));
}

#[test]
fn test_demo_without_file_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_deferlog"))
        .args(["demo", "--no-console", "--delay-ms", "0"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Filename is required"));
}

#[test]
fn test_check_config_prints_resolved_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("log.toml");
    fs::write(
        &config_path,
        "[file]\nfilename = \"app.log\"\n\n[console]\nstderr_levels = [\"error\"]\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_deferlog"))
        .args(["check-config", "--level", "warn", "--config"])
        .arg(&config_path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("level = \"warn\""));
    assert!(stdout.contains("max_size = 5242880"));
    assert!(stdout.contains("max_files = 5"));
    assert!(stdout.contains("stderr_levels = [\"error\"]"));
}

#[test]
fn test_check_config_panic_hook_flag() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("app.log");

    let output = Command::new(env!("CARGO_BIN_EXE_deferlog"))
        .args(["check-config", "--file"])
        .arg(&log_path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("handle_panics = true"));
    assert!(!stdout.contains("handle_panics = false"));

    let output = Command::new(env!("CARGO_BIN_EXE_deferlog"))
        .args(["check-config", "--no-panic-hook", "--file"])
        .arg(&log_path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("handle_panics = false"));
    assert!(!stdout.contains("handle_panics = true"));
}
