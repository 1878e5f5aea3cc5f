use screen_narration::dom::memory::{MemoryTree, NodeSpec};

/// `body > .mainmenu[data-menu-name="Main Menu"] > 3 × .menu-item`
pub fn main_menu_spec() -> NodeSpec {
    NodeSpec::new("body").child(
        NodeSpec::new("div")
            .key("menu")
            .class("mainmenu")
            .attr("data-menu-name", "Main Menu")
            .children([
                NodeSpec::new("div").key("start").class("menu-item").text("Start Race"),
                NodeSpec::new("div").key("settings").class("menu-item").text("Settings"),
                NodeSpec::new("div").key("quit").class("menu-item").text("Quit"),
            ]),
    )
}

pub fn main_menu() -> MemoryTree {
    MemoryTree::from_spec(&main_menu_spec()).unwrap()
}

/// A page with a single button and no menu-like surface.
pub fn bare_page() -> MemoryTree {
    let spec = NodeSpec::new("body").child(
        NodeSpec::new("button").key("play").text("Play"),
    );
    MemoryTree::from_spec(&spec).unwrap()
}

/// Modal as a UI framework would insert it.
pub fn confirm_exit_dialog() -> NodeSpec {
    NodeSpec::new("div")
        .key("confirm")
        .class("modal fade")
        .attr("role", "dialog")
        .child(NodeSpec::new("h2").class("modal-title").text("Confirm Exit"))
        .child(NodeSpec::new("p").class("modal-body").text("  Are you\n sure? "))
}

pub fn node(tree: &MemoryTree, key: &str) -> screen_narration::ElementRef {
    tree.lookup(key)
        .unwrap_or_else(|| panic!("fixture has no node keyed '{}'", key))
}
