use std::fmt;

/// Opaque handle to a node in the host's live UI tree.
///
/// The handle is borrowed: the node may be removed between two observations,
/// so every field access goes through [`UiTree`], which answers `None` (or
/// `false`) for handles that no longer resolve.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef(u64);

impl ElementRef {
    pub const fn from_raw(raw: u64) -> Self {
        ElementRef(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "el#{}", self.0)
    }
}

/// Read-only query surface of the host document.
///
/// Implementations must never panic on a stale handle.
pub trait UiTree {
    /// The document body. Never reported as a focus target.
    fn root(&self) -> ElementRef;

    /// Whether the handle still resolves to a node attached to the document.
    fn is_valid(&self, el: ElementRef) -> bool;

    fn tag_name(&self, el: ElementRef) -> Option<&str>;

    fn attribute(&self, el: ElementRef, name: &str) -> Option<&str>;

    /// Text directly owned by the node, excluding descendants.
    fn own_text(&self, el: ElementRef) -> Option<&str>;

    /// Element children in document order.
    fn children(&self, el: ElementRef) -> Vec<ElementRef>;

    /// Rendered and laid out: not hidden itself, no hidden ancestor.
    fn is_displayed(&self, el: ElementRef) -> bool;

    /// Element currently holding input focus.
    fn active_element(&self) -> Option<ElementRef>;

    /// Concatenated text of the node and all of its descendants, like the
    /// DOM `textContent` property.
    fn text_content(&self, el: ElementRef) -> Option<String> {
        if !self.is_valid(el) {
            return None;
        }

        let mut out = String::new();
        for node in std::iter::once(el).chain(descendants(self, el)) {
            if let Some(text) = self.own_text(node) {
                out.push_str(text);
            }
        }
        Some(out)
    }
}

/// All descendants of `el` in document (pre-)order, excluding `el` itself.
pub fn descendants<T: UiTree + ?Sized>(tree: &T, el: ElementRef) -> Vec<ElementRef> {
    let mut out = Vec::new();
    if !tree.is_valid(el) {
        return out;
    }

    let mut stack: Vec<ElementRef> = tree.children(el).into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(tree.children(node).into_iter().rev());
    }
    out
}

/// Class tokens of the element, in attribute order.
pub fn class_tokens<T: UiTree + ?Sized>(tree: &T, el: ElementRef) -> Vec<&str> {
    tree.attribute(el, "class")
        .map(|c| c.split_whitespace().collect())
        .unwrap_or_default()
}

pub fn has_class<T: UiTree + ?Sized>(tree: &T, el: ElementRef, class: &str) -> bool {
    class_tokens(tree, el).iter().any(|c| *c == class)
}

/// Batch of structural changes delivered by the host's mutation observer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationRecord {
    pub added: Vec<ElementRef>,
    pub removed: Vec<ElementRef>,
}

impl MutationRecord {
    pub fn added(nodes: impl IntoIterator<Item = ElementRef>) -> Self {
        MutationRecord {
            added: nodes.into_iter().collect(),
            removed: vec![],
        }
    }

    pub fn removed(nodes: impl IntoIterator<Item = ElementRef>) -> Self {
        MutationRecord {
            added: vec![],
            removed: nodes.into_iter().collect(),
        }
    }
}
