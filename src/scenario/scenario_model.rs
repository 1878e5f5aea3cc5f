use serde::{Deserialize, Serialize};

use crate::{
    dispatch::event::AccessibilityEvent,
    dom::memory::NodeSpec,
    error::{NarrationError, Result},
};

/// A scripted UI session: an initial document plus a timeline of host
/// notifications. Written by hand in YAML to reproduce what a live UI does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    /// Human-readable name for this scenario
    pub name: String,

    /// Initial document; its root plays the part of `<body>`
    pub document: NodeSpec,

    /// Ordered host notifications and clock advances
    #[serde(default)]
    pub steps: Vec<ScenarioStep>,

    /// Events the narrator must emit, in order, for the replay to pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<Vec<AccessibilityEvent>>,
}

/// One step of a scenario. Node references use the `key` given in the
/// document or in an inserted node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Let the clock run; timers fire along the way
    Wait { duration_ms: u64 },

    /// Move input focus and deliver a focus notification
    Focus { target: String },

    /// Drop input focus without a notification
    Blur,

    /// Deliver a key-down notification
    Key { key: String },

    /// Insert a subtree and deliver a mutation notification
    Insert {
        #[serde(default)]
        parent: Option<String>,
        node: NodeSpec,
    },

    /// Remove a subtree and deliver a mutation notification
    Remove { target: String },

    AddClass { target: String, class: String },

    RemoveClass { target: String, class: String },

    SetAttribute {
        target: String,
        name: String,
        value: String,
    },

    RemoveAttribute { target: String, name: String },

    SetText { target: String, text: String },

    Show { target: String },

    Hide { target: String },

    /// Flip the kill switch
    SetEnabled { enabled: bool },

    /// Tear the narrator down
    Teardown,
}

impl Scenario {
    /// Reject steps that parse but cannot be replayed in reasonable time.
    pub fn validate(&self, context: &str) -> Result<()> {
        for (i, step) in self.steps.iter().enumerate() {
            if let ScenarioStep::Wait { duration_ms } = step {
                if *duration_ms > MAX_WAIT_MS {
                    return Err(NarrationError::InvalidStep {
                        context: format!("{}, step {} ({})", context, i + 1, step.action()),
                        reason: format!(
                            "wait of {} ms exceeds the {} ms limit",
                            duration_ms, MAX_WAIT_MS
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

impl ScenarioStep {
    /// Name of the step as written in YAML.
    pub fn action(&self) -> &'static str {
        match self {
            ScenarioStep::Wait { .. } => "wait",
            ScenarioStep::Focus { .. } => "focus",
            ScenarioStep::Blur => "blur",
            ScenarioStep::Key { .. } => "key",
            ScenarioStep::Insert { .. } => "insert",
            ScenarioStep::Remove { .. } => "remove",
            ScenarioStep::AddClass { .. } => "add_class",
            ScenarioStep::RemoveClass { .. } => "remove_class",
            ScenarioStep::SetAttribute { .. } => "set_attribute",
            ScenarioStep::RemoveAttribute { .. } => "remove_attribute",
            ScenarioStep::SetText { .. } => "set_text",
            ScenarioStep::Show { .. } => "show",
            ScenarioStep::Hide { .. } => "hide",
            ScenarioStep::SetEnabled { .. } => "set_enabled",
            ScenarioStep::Teardown => "teardown",
        }
    }
}

/// Longest single `wait` a scenario may ask for: one hour of virtual time.
pub const MAX_WAIT_MS: u64 = 60 * 60 * 1000;

pub fn parse_scenario(yaml: &str, context: &str) -> Result<Scenario> {
    let scenario: Scenario = serde_yaml::from_str(yaml).map_err(|source| NarrationError::Yaml {
        context: context.to_string(),
        source,
    })?;
    scenario.validate(context)?;
    Ok(scenario)
}

pub fn load_scenario(path: &str) -> Result<Scenario> {
    let content = std::fs::read_to_string(path).map_err(|source| NarrationError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_scenario(&content, path)
}
