use std::fs::File;

use tracing::info;

use crate::cli::config::{AppConfig, build_narrator_config};
use crate::detect::patterns::{
    ACTIVE_CLASSES, CONTEXT_PATTERNS, DIALOG_BODY_PATTERNS, DIALOG_PATTERNS, DIALOG_TITLE_PATTERNS,
    ITEM_PATTERNS, MENU_PATTERNS, StructuralPattern,
};
use crate::detect::label::LABEL_ATTRIBUTES;
use crate::dispatch::event::AccessibilityEvent;
use crate::dispatch::sink::{AnnouncementSink, EventSink, JsonlSink};
use crate::error::{NarrationError, Result};
use crate::scenario::runner::run_scenario;
use crate::scenario::scenario_model::load_scenario;

/// Output rendering for replayed events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON object per line
    Json,
    /// One spoken announcement per line
    Speech,
}

impl OutputFormat {
    /// Unknown names fall back to JSON.
    pub fn parse(name: &str) -> OutputFormat {
        match name {
            "speech" | "text" => OutputFormat::Speech,
            _ => OutputFormat::Json,
        }
    }
}

// ============================================================================
// replay subcommand
// ============================================================================

/// Replay a scenario file and return whether its expectations held.
pub fn cmd_replay(
    scenario_path: &str,
    format: Option<&str>,
    output: Option<&str>,
    poll_interval_ms: Option<u64>,
    debounce_ms: Option<u64>,
    disabled: bool,
    app_config: &AppConfig,
) -> std::result::Result<bool, Box<dyn std::error::Error>> {
    let scenario = load_scenario(scenario_path)?;
    let config = build_narrator_config(&app_config.narrator, poll_interval_ms, debounce_ms, disabled);
    let format = OutputFormat::parse(format.unwrap_or(&app_config.output.format));
    let output = output.or(app_config.output.path.as_deref());

    let report = run_scenario(&scenario, &config)?;
    info!(
        name = %report.name,
        steps = report.steps_run,
        events = report.events.len(),
        "replay finished"
    );

    match output {
        Some(path) => write_events(&report.events, format, path)?,
        None => print!("{}", format_events(&report.events, format)?),
    }

    if let Some(mismatch) = report.mismatch() {
        eprintln!("FAIL  {}: {}", report.name, mismatch);
    } else if report.expected.is_some() {
        eprintln!("PASS  {} ({} events)", report.name, report.events.len());
    }

    Ok(report.passed())
}

/// Render events for stdout.
pub fn format_events(events: &[AccessibilityEvent], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut out = String::new();
            for event in events {
                let line = serde_json::to_string(event).map_err(|source| NarrationError::Json {
                    context: "replay output".to_string(),
                    source,
                })?;
                out.push_str(&line);
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Speech => {
            let mut sink = AnnouncementSink::new(Vec::new());
            for event in events {
                sink.publish(event);
            }
            Ok(String::from_utf8_lossy(&sink.into_inner()).into_owned())
        }
    }
}

/// Hand events to a file-backed sink. JSON output appends to an event log.
pub fn write_events(events: &[AccessibilityEvent], format: OutputFormat, path: &str) -> Result<()> {
    let mut sink: Box<dyn EventSink> = match format {
        OutputFormat::Json => Box::new(JsonlSink::open(path)?),
        OutputFormat::Speech => {
            let file = File::create(path).map_err(|source| NarrationError::Io {
                path: path.to_string(),
                source,
            })?;
            Box::new(AnnouncementSink::new(file))
        }
    };

    for event in events {
        sink.publish(event);
    }
    Ok(())
}

// ============================================================================
// catalog subcommand
// ============================================================================

/// Human-readable listing of every pattern catalog, highest priority first.
pub fn cmd_catalog() -> String {
    let mut out = String::new();

    let sections: [(&str, &[StructuralPattern]); 6] = [
        ("Context surfaces", CONTEXT_PATTERNS),
        ("Items", ITEM_PATTERNS),
        ("Inserted dialogs", DIALOG_PATTERNS),
        ("Dialog titles", DIALOG_TITLE_PATTERNS),
        ("Dialog bodies", DIALOG_BODY_PATTERNS),
        ("Inserted menus", MENU_PATTERNS),
    ];

    for (title, patterns) in sections {
        out.push_str(&format!("=== {} ===\n", title));
        for (i, pattern) in patterns.iter().enumerate() {
            out.push_str(&format!("  {:>2}. {}\n", i + 1, pattern));
        }
    }

    out.push_str("=== Active item markers ===\n");
    for class in ACTIVE_CLASSES {
        out.push_str(&format!("  .{}\n", class));
    }
    out.push_str("  [aria-selected=\"true\"]\n  (input focus)\n");

    out.push_str("=== Label sources ===\n");
    for attr in LABEL_ATTRIBUTES {
        out.push_str(&format!("  [{}]\n", attr));
    }
    out.push_str("  (text content)\n");

    out
}
