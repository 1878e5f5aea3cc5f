use crate::{
    detect::patterns::CONTEXT_PATTERNS,
    dom::tree::{ElementRef, UiTree, class_tokens, descendants},
};

pub const FALLBACK_CONTEXT_NAME: &str = "Menu";

/// The interactive surface currently in front of the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub surface: ElementRef,
    pub name: String,
}

/// Find the topmost visible interactive surface: walk the context catalog
/// in priority order and return the first pattern that has a displayed
/// match anywhere in the document.
pub fn detect_context<T: UiTree + ?Sized>(tree: &T) -> Option<Context> {
    let root = tree.root();
    let candidates: Vec<ElementRef> = std::iter::once(root)
        .chain(descendants(tree, root))
        .collect();

    CONTEXT_PATTERNS.iter().find_map(|pattern| {
        candidates
            .iter()
            .copied()
            .find(|el| pattern.matches(tree, *el) && tree.is_displayed(*el))
            .map(|surface| Context {
                surface,
                name: context_name(tree, surface),
            })
    })
}

/// Display name of a surface: explicit name attribute, accessible name,
/// first class token, then a generic fallback.
pub fn context_name<T: UiTree + ?Sized>(tree: &T, surface: ElementRef) -> String {
    tree.attribute(surface, "data-menu-name")
        .filter(|s| !s.is_empty())
        .or_else(|| tree.attribute(surface, "aria-label").filter(|s| !s.is_empty()))
        .or_else(|| class_tokens(tree, surface).first().copied())
        .unwrap_or(FALLBACK_CONTEXT_NAME)
        .to_string()
}
