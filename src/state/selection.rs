use crate::dom::tree::ElementRef;

/// Everything the engine remembers between detection passes.
///
/// `last_announced` changes only when an event for that label actually
/// reached the sink. `pending` holds the label of a focus-path event still
/// inside the debounce window; while it is set it is the label duplicates
/// are compared against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub focused: Option<ElementRef>,
    /// 0-based index of the item last seen active by the poll path
    pub selected_index: Option<usize>,
    pub last_announced: String,
    pub pending: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label the de-duplication check compares against.
    pub fn gate_label(&self) -> &str {
        self.pending.as_deref().unwrap_or(&self.last_announced)
    }

    pub fn is_duplicate(&self, label: &str) -> bool {
        self.gate_label() == label
    }
}
