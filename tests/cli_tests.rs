use std::io::Write;

use clap::Parser;
use screen_narration::cli::commands::{
    OutputFormat, cmd_catalog, cmd_replay, format_events, write_events,
};
use screen_narration::cli::config::{AppConfig, Cli, Commands, build_narrator_config, load_config};
use screen_narration::{AccessibilityEvent, NarrationError, NarratorConfig};

use crate::common::utils::focused;

mod common;

fn sample_events() -> Vec<AccessibilityEvent> {
    vec![
        AccessibilityEvent::Status {
            text: "UI accessibility monitor active".into(),
        },
        focused("Settings", 2, 3, "Main Menu"),
        AccessibilityEvent::MenuClosed,
    ]
}

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_replay_minimal() {
    let cli = Cli::parse_from(["screen-narration", "replay", "--scenario", "menu.yaml"]);
    match cli.command {
        Commands::Replay {
            scenario,
            format,
            output,
            poll_interval_ms,
            debounce_ms,
            disabled,
        } => {
            assert_eq!(scenario, "menu.yaml");
            assert!(format.is_none());
            assert!(output.is_none());
            assert!(poll_interval_ms.is_none());
            assert!(debounce_ms.is_none());
            assert!(!disabled);
        }
        _ => panic!("Expected Replay command"),
    }
    assert_eq!(cli.verbose, 0);
    assert!(cli.config.is_none());
}

#[test]
fn cli_parse_replay_all_args() {
    let cli = Cli::parse_from([
        "screen-narration",
        "replay",
        "--scenario",
        "menu.yaml",
        "--format",
        "speech",
        "-o",
        "out.txt",
        "--poll-interval-ms",
        "250",
        "--debounce-ms",
        "0",
        "--disabled",
    ]);
    match cli.command {
        Commands::Replay {
            format,
            output,
            poll_interval_ms,
            debounce_ms,
            disabled,
            ..
        } => {
            assert_eq!(format.as_deref(), Some("speech"));
            assert_eq!(output.as_deref(), Some("out.txt"));
            assert_eq!(poll_interval_ms, Some(250));
            assert_eq!(debounce_ms, Some(0));
            assert!(disabled);
        }
        _ => panic!("Expected Replay command"),
    }
}

#[test]
fn cli_parse_catalog_with_global_flags() {
    let cli = Cli::parse_from(["screen-narration", "catalog", "-vv", "--config", "alt.yaml"]);
    assert!(matches!(cli.command, Commands::Catalog));
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config.as_deref(), Some("alt.yaml"));
}

#[test]
fn cli_replay_requires_scenario() {
    assert!(Cli::try_parse_from(["screen-narration", "replay"]).is_err());
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn config_load_missing_file() {
    let config = load_config(Some("nonexistent_file_that_does_not_exist.yaml"));
    assert_eq!(config, AppConfig::default());
}

#[test]
fn config_default_values() {
    let config = AppConfig::default();
    assert!(config.narrator.enabled);
    assert_eq!(config.narrator.poll_interval_ms, 100);
    assert_eq!(config.narrator.debounce_ms, 50);
    assert_eq!(config.output.format, "json");
    assert!(config.output.path.is_none());
}

#[test]
fn config_partial_yaml() {
    let yaml = r#"
narrator:
  debounce_ms: 120
output:
  path: events.jsonl
"#;
    let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.narrator.debounce_ms, 120);
    // Other narrator fields get defaults
    assert!(config.narrator.enabled);
    assert_eq!(config.narrator.poll_interval_ms, 100);
    assert_eq!(config.output.format, "json");
    assert_eq!(config.output.path.as_deref(), Some("events.jsonl"));
}

#[test]
fn config_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "narrator:\n  enabled: false\n  poll_interval_ms: 40").unwrap();

    let config = load_config(file.path().to_str());
    assert!(!config.narrator.enabled);
    assert_eq!(config.narrator.poll_interval_ms, 40);
}

#[test]
fn config_malformed_file_falls_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "narrator: [not, a, mapping").unwrap();

    let config = load_config(file.path().to_str());
    assert_eq!(config, AppConfig::default());
}

// ============================================================================
// Builder / Helper Tests
// ============================================================================

#[test]
fn cli_flags_override_config_file() {
    let file = NarratorConfig {
        enabled: true,
        poll_interval_ms: 100,
        debounce_ms: 50,
    };

    let config = build_narrator_config(&file, Some(20), None, false);
    assert_eq!(config.poll_interval_ms, 20);
    assert_eq!(config.debounce_ms, 50);
    assert!(config.enabled);

    let config = build_narrator_config(&file, None, Some(0), true);
    assert_eq!(config.debounce_ms, 0);
    assert!(!config.enabled);
}

#[test]
fn disabled_in_file_cannot_be_reenabled_by_flags() {
    let file = NarratorConfig {
        enabled: false,
        ..NarratorConfig::default()
    };
    assert!(!build_narrator_config(&file, None, None, false).enabled);
}

#[test]
fn output_format_names() {
    assert_eq!(OutputFormat::parse("speech"), OutputFormat::Speech);
    assert_eq!(OutputFormat::parse("text"), OutputFormat::Speech);
    assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
    assert_eq!(OutputFormat::parse("yaml"), OutputFormat::Json, "Unknown falls back to JSON");
}

// ============================================================================
// Output Tests
// ============================================================================

#[test]
fn format_events_as_json_lines() {
    let out = format_events(&sample_events(), OutputFormat::Json).unwrap();
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[1],
        r#"{"type":"menuItemFocused","text":"Settings","index":2,"total":3,"menuName":"Main Menu"}"#
    );
    assert_eq!(lines[2], r#"{"type":"menuClosed"}"#);
}

#[test]
fn format_events_as_speech() {
    let out = format_events(&sample_events(), OutputFormat::Speech).unwrap();
    assert_eq!(
        out,
        "UI accessibility monitor active\nSettings, 2 of 3\nMenu closed\n"
    );
}

#[test]
fn write_events_appends_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");
    let path = path.to_str().unwrap();

    write_events(&sample_events(), OutputFormat::Json, path).unwrap();
    write_events(&sample_events()[..1], OutputFormat::Json, path).unwrap();

    let content = std::fs::read_to_string(path).unwrap();
    let parsed: Vec<AccessibilityEvent> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(parsed.len(), 4, "Event log is appended to, not truncated");
    assert_eq!(parsed[1], focused("Settings", 2, 3, "Main Menu"));
}

#[test]
fn write_events_as_speech_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("speech.txt");
    let path = path.to_str().unwrap();

    write_events(&sample_events(), OutputFormat::Speech, path).unwrap();
    write_events(&sample_events()[2..], OutputFormat::Speech, path).unwrap();

    assert_eq!(std::fs::read_to_string(path).unwrap(), "Menu closed\n");
}

#[test]
fn write_events_to_missing_directory_fails_for_speech() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("speech.txt");
    assert!(write_events(&sample_events(), OutputFormat::Speech, path.to_str().unwrap()).is_err());
}

#[test]
fn write_events_to_missing_directory_fails_for_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("events.jsonl");

    let err = write_events(&sample_events(), OutputFormat::Json, path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, NarrationError::Io { .. }));
    assert!(!path.exists());
}

// ============================================================================
// Command Tests
// ============================================================================

#[test]
fn replay_sample_scenario_to_file() {
    let scenario = format!("{}/scenarios/main_menu.yaml", env!("CARGO_MANIFEST_DIR"));
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("speech.txt");

    let passed = cmd_replay(
        &scenario,
        Some("speech"),
        out.to_str(),
        None,
        None,
        false,
        &AppConfig::default(),
    )
    .unwrap();

    assert!(passed);
    let speech = std::fs::read_to_string(&out).unwrap();
    assert!(speech.contains("Start Race, 1 of 3\n"));
    assert!(speech.contains("Dialog: Confirm Exit. Are you sure?\n"));
    assert!(speech.ends_with("Menu closed\n"));
}

#[test]
fn replay_disabled_fails_expectations() {
    let scenario = format!("{}/scenarios/main_menu.yaml", env!("CARGO_MANIFEST_DIR"));
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("events.jsonl");

    let passed = cmd_replay(&scenario, None, out.to_str(), None, None, true, &AppConfig::default())
        .unwrap();
    assert!(!passed);
}

#[test]
fn replay_to_unwritable_json_output_is_an_error() {
    let scenario = format!("{}/scenarios/main_menu.yaml", env!("CARGO_MANIFEST_DIR"));
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing").join("events.jsonl");

    let result = cmd_replay(
        &scenario,
        Some("json"),
        out.to_str(),
        None,
        None,
        false,
        &AppConfig::default(),
    );
    assert!(result.is_err(), "A replay whose output is lost must not pass");
}

#[test]
fn replay_missing_scenario_is_an_error() {
    let result = cmd_replay("missing.yaml", None, None, None, None, false, &AppConfig::default());
    assert!(result.is_err());
}

#[test]
fn catalog_lists_patterns_in_priority_order() {
    let out = cmd_catalog();
    assert!(out.starts_with("=== Context surfaces ===\n   1. .modal-dialog\n"));

    let dialog = out.find("[role=\"dialog\"]").unwrap();
    let mainmenu = out.find(".mainmenu").unwrap();
    assert!(dialog < mainmenu, "Dialogs are listed ahead of menus");

    assert!(out.contains("=== Active item markers ===\n  .selected\n"));
    assert!(out.contains("  [aria-label]\n"));
    assert!(out.trim_end().ends_with("(text content)"));
}
