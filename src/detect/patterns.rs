use std::fmt;

use crate::dom::tree::{ElementRef, UiTree, descendants, has_class};

/// One structural shape an element can have. Catalogs are ordered slices of
/// these; earlier entries win when several match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralPattern {
    /// `.token` in the class list
    Class(&'static str),
    /// `[role="value"]`
    Role(&'static str),
    /// bare tag name
    Tag(&'static str),
}

impl StructuralPattern {
    pub fn matches<T: UiTree + ?Sized>(&self, tree: &T, el: ElementRef) -> bool {
        if !tree.is_valid(el) {
            return false;
        }

        match self {
            StructuralPattern::Class(class) => has_class(tree, el, class),
            StructuralPattern::Role(role) => tree.attribute(el, "role") == Some(*role),
            StructuralPattern::Tag(tag) => tree
                .tag_name(el)
                .map(|t| t.eq_ignore_ascii_case(tag))
                .unwrap_or(false),
        }
    }
}

impl fmt::Display for StructuralPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralPattern::Class(class) => write!(f, ".{}", class),
            StructuralPattern::Role(role) => write!(f, "[role=\"{}\"]", role),
            StructuralPattern::Tag(tag) => write!(f, "{}", tag),
        }
    }
}

use StructuralPattern::{Class, Role, Tag};

/// Interactive surfaces, highest priority first. Dialogs precede menus so a
/// modal opened on top of a menu is the reported context.
pub const CONTEXT_PATTERNS: &[StructuralPattern] = &[
    Class("modal-dialog"),
    Class("dialog-container"),
    Class("bng-modal"),
    Role("dialog"),
    Class("mainmenu"),
    Class("menu-container"),
    Class("vehicle-selector"),
    Class("level-selector"),
    Class("options-menu"),
    Role("menu"),
];

/// Selectable entries inside a context.
pub const ITEM_PATTERNS: &[StructuralPattern] = &[
    Class("menu-item"),
    Class("list-item"),
    Role("menuitem"),
    Role("option"),
    Class("bng-button"),
    Class("vehicle-item"),
    Class("level-item"),
    Tag("li"),
];

/// Class tokens marking an item as the current one.
pub const ACTIVE_CLASSES: &[&str] = &["selected", "focused", "active", "highlight", "highlighted"];

/// Newly inserted nodes announced as dialogs.
pub const DIALOG_PATTERNS: &[StructuralPattern] = &[Class("modal"), Class("dialog"), Role("dialog")];

pub const DIALOG_TITLE_PATTERNS: &[StructuralPattern] = &[
    Class("modal-title"),
    Class("dialog-title"),
    Tag("h1"),
    Tag("h2"),
];

pub const DIALOG_BODY_PATTERNS: &[StructuralPattern] = &[
    Class("modal-body"),
    Class("dialog-content"),
    Tag("p"),
];

/// Newly inserted nodes announced as opened menus.
pub const MENU_PATTERNS: &[StructuralPattern] = &[Class("menu"), Role("menu")];

pub fn matches_any<T: UiTree + ?Sized>(
    tree: &T,
    el: ElementRef,
    patterns: &[StructuralPattern],
) -> bool {
    patterns.iter().any(|p| p.matches(tree, el))
}

/// First descendant of `root` in document order matching any pattern,
/// like `querySelector` with a selector list.
pub fn first_descendant_matching<T: UiTree + ?Sized>(
    tree: &T,
    root: ElementRef,
    patterns: &[StructuralPattern],
) -> Option<ElementRef> {
    descendants(tree, root)
        .into_iter()
        .find(|el| matches_any(tree, *el, patterns))
}

/// Every descendant of `root` matching any pattern, in document order,
/// each element at most once.
pub fn all_descendants_matching<T: UiTree + ?Sized>(
    tree: &T,
    root: ElementRef,
    patterns: &[StructuralPattern],
) -> Vec<ElementRef> {
    descendants(tree, root)
        .into_iter()
        .filter(|el| matches_any(tree, *el, patterns))
        .collect()
}
