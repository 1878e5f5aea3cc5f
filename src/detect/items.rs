use crate::{
    detect::{
        context::Context,
        label::extract_label,
        patterns::{ACTIVE_CLASSES, ITEM_PATTERNS, all_descendants_matching},
    },
    dom::tree::{ElementRef, UiTree, has_class},
};

/// One labeled, selectable entry of a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// 1-based position among the labeled items
    pub index: usize,
    pub label: String,
    pub element: ElementRef,
}

/// Enumerate the labeled items of `context` in document order.
///
/// Unlabeled matches are dropped before numbering, so indices run 1..=n
/// and n is the count of labeled items.
pub fn collect_items<T: UiTree + ?Sized>(tree: &T, context: &Context) -> Vec<Item> {
    all_descendants_matching(tree, context.surface, ITEM_PATTERNS)
        .into_iter()
        .filter_map(|element| {
            let label = extract_label(tree, element);
            (!label.is_empty()).then_some((element, label))
        })
        .enumerate()
        .map(|(i, (element, label))| Item {
            index: i + 1,
            label,
            element,
        })
        .collect()
}

/// Position (0-based) of the first active item, if any.
pub fn find_active_index<T: UiTree + ?Sized>(tree: &T, items: &[Item]) -> Option<usize> {
    let focused = tree.active_element();
    items
        .iter()
        .position(|item| is_active(tree, item.element, focused))
}

fn is_active<T: UiTree + ?Sized>(tree: &T, el: ElementRef, focused: Option<ElementRef>) -> bool {
    if !tree.is_valid(el) {
        return false;
    }

    ACTIVE_CLASSES.iter().any(|c| has_class(tree, el, c))
        || tree.attribute(el, "aria-selected") == Some("true")
        || focused == Some(el)
}
