use crate::dom::tree::{ElementRef, UiTree};

/// Attributes consulted for an accessible label, in priority order.
pub const LABEL_ATTRIBUTES: &[&str] = &["aria-label", "title", "data-label", "ng-bind"];

/// Human-readable label for an element.
///
/// Tries the label attributes in order, then the rendered text content.
/// Each candidate is whitespace-collapsed and trimmed; the first non-empty
/// one wins. Stale handles and unlabeled elements yield `""`.
pub fn extract_label<T: UiTree + ?Sized>(tree: &T, el: ElementRef) -> String {
    if !tree.is_valid(el) {
        return String::new();
    }

    LABEL_ATTRIBUTES
        .iter()
        .filter_map(|name| tree.attribute(el, name).map(collapse_whitespace))
        .chain(tree.text_content(el).map(|t| collapse_whitespace(&t)))
        .find(|candidate| !candidate.is_empty())
        .unwrap_or_default()
}

/// Collapse whitespace runs to a single space and trim the edges.
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
