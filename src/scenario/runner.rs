use std::time::Duration;

use tracing::{debug, info};

use crate::{
    dispatch::event::AccessibilityEvent,
    dom::{
        memory::MemoryTree,
        tree::{ElementRef, MutationRecord, UiTree},
    },
    error::{NarrationError, Result},
    lifecycle::{
        config::NarratorConfig,
        narrator::{MENU_CLOSED_DELAY, Narrator},
    },
    scenario::scenario_model::{Scenario, ScenarioStep},
};

/// Outcome of replaying one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    pub name: String,
    pub steps_run: usize,
    pub events: Vec<AccessibilityEvent>,
    pub expected: Option<Vec<AccessibilityEvent>>,
}

impl ReplayReport {
    /// True when no expectation was given or the events match it exactly.
    pub fn passed(&self) -> bool {
        self.expected
            .as_ref()
            .map(|expected| *expected == self.events)
            .unwrap_or(true)
    }

    /// First divergence between expected and emitted events, if any.
    pub fn mismatch(&self) -> Option<String> {
        let expected = self.expected.as_ref()?;
        if *expected == self.events {
            return None;
        }

        let position = expected
            .iter()
            .zip(&self.events)
            .position(|(e, a)| e != a)
            .unwrap_or_else(|| expected.len().min(self.events.len()));

        Some(format!(
            "event {}: expected {:?}, got {:?} ({} expected, {} emitted)",
            position + 1,
            expected.get(position),
            self.events.get(position),
            expected.len(),
            self.events.len()
        ))
    }
}

/// Replay `scenario` against a fresh narrator and collect what it emits.
///
/// After the last step the clock runs a little longer so debounced sends
/// and deferred checks still pending get the chance to fire.
pub fn run_scenario(scenario: &Scenario, config: &NarratorConfig) -> Result<ReplayReport> {
    scenario.validate(&scenario.name)?;
    let mut tree = MemoryTree::from_spec(&scenario.document)?;
    let mut narrator = Narrator::new(Vec::new(), config.clone());

    info!(name = %scenario.name, steps = scenario.steps.len(), "replaying scenario");

    for (i, step) in scenario.steps.iter().enumerate() {
        debug!(step = i + 1, action = step.action(), "applying step");
        apply_step(&mut tree, &mut narrator, i, step)?;
    }

    narrator.advance(&tree, settle_time(config));

    Ok(ReplayReport {
        name: scenario.name.clone(),
        steps_run: scenario.steps.len(),
        events: narrator.into_sink(),
        expected: scenario.expect.clone(),
    })
}

fn settle_time(config: &NarratorConfig) -> Duration {
    config.debounce().max(MENU_CLOSED_DELAY)
}

fn apply_step(
    tree: &mut MemoryTree,
    narrator: &mut Narrator<Vec<AccessibilityEvent>>,
    index: usize,
    step: &ScenarioStep,
) -> Result<()> {
    let resolve = |tree: &MemoryTree, key: &str| lookup(tree, key, index, step);

    match step {
        ScenarioStep::Wait { duration_ms } => {
            narrator.advance(&*tree, Duration::from_millis(*duration_ms));
        }

        ScenarioStep::Focus { target } => {
            let el = resolve(&*tree, target)?;
            tree.focus(el);
            narrator.on_focus_in(&*tree, Some(el));
        }

        ScenarioStep::Blur => tree.blur(),

        ScenarioStep::Key { key } => narrator.on_key_down(key),

        ScenarioStep::Insert { parent, node } => {
            let parent = match parent {
                Some(key) => resolve(&*tree, key)?,
                None => tree.root(),
            };
            let el = tree.append(parent, node)?;
            narrator.on_mutation(&*tree, &MutationRecord::added([el]));
        }

        ScenarioStep::Remove { target } => {
            let el = resolve(&*tree, target)?;
            tree.remove(el);
            narrator.on_mutation(&*tree, &MutationRecord::removed([el]));
        }

        ScenarioStep::AddClass { target, class } => {
            let el = resolve(&*tree, target)?;
            tree.add_class(el, class);
        }

        ScenarioStep::RemoveClass { target, class } => {
            let el = resolve(&*tree, target)?;
            tree.remove_class(el, class);
        }

        ScenarioStep::SetAttribute {
            target,
            name,
            value,
        } => {
            let el = resolve(&*tree, target)?;
            tree.set_attribute(el, name, value);
        }

        ScenarioStep::RemoveAttribute { target, name } => {
            let el = resolve(&*tree, target)?;
            tree.remove_attribute(el, name);
        }

        ScenarioStep::SetText { target, text } => {
            let el = resolve(&*tree, target)?;
            tree.set_text(el, text);
        }

        ScenarioStep::Show { target } => {
            let el = resolve(&*tree, target)?;
            tree.show(el);
        }

        ScenarioStep::Hide { target } => {
            let el = resolve(&*tree, target)?;
            tree.hide(el);
        }

        ScenarioStep::SetEnabled { enabled } => narrator.set_enabled(*enabled),

        ScenarioStep::Teardown => narrator.teardown(),
    }

    Ok(())
}

fn lookup(tree: &MemoryTree, key: &str, index: usize, step: &ScenarioStep) -> Result<ElementRef> {
    tree.lookup(key).ok_or_else(|| NarrationError::UnknownNode {
        key: key.to_string(),
        context: format!("step {} ({})", index + 1, step.action()),
    })
}
