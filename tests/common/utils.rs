use std::time::Duration;

use screen_narration::{
    AccessibilityEvent, Narrator, NarratorConfig, dom::memory::MemoryTree,
    lifecycle::narrator::INIT_DELAY,
};

pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Narrator with default config that has already run its initialization.
pub fn started(tree: &MemoryTree) -> Narrator<Vec<AccessibilityEvent>> {
    started_with(tree, NarratorConfig::default())
}

pub fn started_with(tree: &MemoryTree, config: NarratorConfig) -> Narrator<Vec<AccessibilityEvent>> {
    let mut narrator = Narrator::new(Vec::new(), config);
    narrator.advance(tree, INIT_DELAY);
    narrator
}

pub fn focused_events(events: &[AccessibilityEvent]) -> Vec<AccessibilityEvent> {
    events
        .iter()
        .filter(|e| matches!(e, AccessibilityEvent::MenuItemFocused { .. }))
        .cloned()
        .collect()
}

pub fn focused(label: &str, index: usize, total: usize, context: &str) -> AccessibilityEvent {
    AccessibilityEvent::MenuItemFocused {
        label: label.to_string(),
        index,
        total,
        context_name: context.to_string(),
    }
}
