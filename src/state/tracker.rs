use tracing::debug;

use crate::{
    detect::{
        context::detect_context,
        items::{collect_items, find_active_index},
        label::extract_label,
    },
    dispatch::event::AccessibilityEvent,
    dom::tree::{ElementRef, UiTree},
    state::selection::SelectionState,
};

/// Focus path: decide whether a focus change deserves an announcement.
///
/// Returns the event to route through debounce. On success `focused` and
/// `pending` are updated; a suppressed change leaves the state untouched.
pub fn track_focus<T: UiTree + ?Sized>(
    state: &mut SelectionState,
    tree: &T,
    focused: Option<ElementRef>,
) -> Option<AccessibilityEvent> {
    if focused == state.focused {
        return None;
    }

    let Some(el) = focused else {
        state.focused = None;
        return None;
    };

    let label = extract_label(tree, el);
    if label.is_empty() {
        debug!(element = ?el, "focus change suppressed: no label");
        return None;
    }
    if state.is_duplicate(&label) {
        debug!(element = ?el, label = %label, "focus change suppressed: duplicate label");
        return None;
    }

    let context = detect_context(tree);
    let items = context
        .as_ref()
        .map(|c| collect_items(tree, c))
        .unwrap_or_default();
    let active = find_active_index(tree, &items);

    state.focused = Some(el);
    state.pending = Some(label.clone());

    Some(AccessibilityEvent::MenuItemFocused {
        label,
        index: active.map(|i| i + 1).unwrap_or(0),
        total: items.len(),
        context_name: context.map(|c| c.name).unwrap_or_default(),
    })
}

/// Poll path: announce a selection that moved without a focus change.
///
/// Updates `selected_index` whenever the active item moved; the returned
/// event is dispatched immediately.
pub fn track_poll<T: UiTree + ?Sized>(
    state: &mut SelectionState,
    tree: &T,
) -> Option<AccessibilityEvent> {
    let context = detect_context(tree)?;
    let items = collect_items(tree, &context);
    let active = find_active_index(tree, &items)?;

    if state.selected_index == Some(active) {
        return None;
    }
    state.selected_index = Some(active);

    let item = items.get(active)?;
    if state.is_duplicate(&item.label) {
        debug!(label = %item.label, index = item.index, "selection change suppressed: duplicate label");
        return None;
    }

    Some(AccessibilityEvent::MenuItemFocused {
        label: item.label.clone(),
        index: item.index,
        total: items.len(),
        context_name: context.name,
    })
}

/// Record that `event` reached the sink.
pub fn record_dispatch(state: &mut SelectionState, event: &AccessibilityEvent) {
    if let AccessibilityEvent::MenuItemFocused { label, .. } = event {
        state.last_announced = label.clone();
        if state.pending.as_deref() == Some(label.as_str()) {
            state.pending = None;
        }
    }
}

/// Forget a debounced event that will never be sent.
pub fn abandon_pending(state: &mut SelectionState) {
    state.pending = None;
}
