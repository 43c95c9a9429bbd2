//! Tests for the `weekgantt` binary

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn weekgantt_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_weekgantt"))
}

#[test]
fn writes_svg_to_output_path() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("chart.svg");

    let output = Command::new(weekgantt_binary())
        .arg("-o")
        .arg(&out)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("<svg"), "Should be an SVG document");
    assert!(content.contains("Full-Width Yearly Gantt Chart"));
    assert_eq!(content.matches("data-week=").count(), 47);
}

#[test]
fn json_layout_to_stdout() {
    let output = Command::new(weekgantt_binary())
        .args(["-o", "-", "--format", "json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(layout["rows"].as_array().unwrap().len(), 8);
    assert_eq!(layout["separators"].as_array().unwrap().len(), 5);
    assert_eq!(layout["segments"].as_array().unwrap().len(), 47);
}

#[test]
fn title_flag_overrides_config() {
    let output = Command::new(weekgantt_binary())
        .args(["-o", "-", "--title", "Roadmap 2024"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Roadmap 2024"));
    assert!(!stdout.contains("Full-Width Yearly Gantt Chart"));
}

#[test]
fn config_file_sets_palette() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("gantt.toml");
    fs::write(
        &config,
        r##"
title = "From config"

[[categories]]
name = "Release"
color = "#ffab91"
"##,
    )
    .unwrap();

    let output = Command::new(weekgantt_binary())
        .arg("-c")
        .arg(&config)
        .args(["-o", "-"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("From config"));
    assert!(stdout.contains("fill=\"#ffab91\""));
}

#[test]
fn invalid_config_fails() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("broken.toml");
    fs::write(&config, "title = [unterminated").unwrap();

    let output = Command::new(weekgantt_binary())
        .arg("--config")
        .arg(&config)
        .args(["-o", "-"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config"), "Should mention the config file");
}

#[test]
fn tasks_subcommand_lists_resolved_dates() {
    let output = Command::new(weekgantt_binary())
        .arg("tasks")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Core Module Development"));
    assert!(stdout.contains("2024-02-05"));
    assert!(stdout.contains("2024-05-13"));
    assert_eq!(stdout.lines().count(), 9, "Header plus one line per task");
}

#[test]
fn iso_week_convention_is_accepted() {
    let output = Command::new(weekgantt_binary())
        .args(["--week-convention", "iso", "tasks"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Project Kickoff"));
}

#[test]
fn unknown_week_convention_is_rejected() {
    let output = Command::new(weekgantt_binary())
        .args(["--week-convention", "friday", "-o", "-"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "Nothing should be rendered");
}
