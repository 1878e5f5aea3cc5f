use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::dom::tree::{ElementRef, UiTree};
use crate::error::{NarrationError, Result};

/// Declarative description of a node and its subtree.
///
/// Used by scenarios (YAML) and by tests to build documents. `key` is a
/// scenario-local name used to refer to the node later; it is not an
/// attribute of the element.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeSpec {
    pub tag: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn new(tag: &str) -> Self {
        NodeSpec {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.children.extend(children);
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attrs: BTreeMap<String, String>,
    text: Option<String>,
    parent: Option<ElementRef>,
    children: Vec<ElementRef>,
    alive: bool,
}

/// In-memory document used for scenario replay and tests.
///
/// Handles are never reused: a removed node stays in the arena marked dead,
/// so stale handles resolve to nothing instead of to a different node.
#[derive(Debug, Clone)]
pub struct MemoryTree {
    nodes: Vec<Node>,
    keys: HashMap<String, ElementRef>,
    active: Option<ElementRef>,
}

impl MemoryTree {
    /// Empty document with a bare `body` root.
    pub fn new() -> Self {
        MemoryTree {
            nodes: vec![Node {
                tag: "body".to_string(),
                attrs: BTreeMap::new(),
                text: None,
                parent: None,
                children: vec![],
                alive: true,
            }],
            keys: HashMap::new(),
            active: None,
        }
    }

    /// Build a document whose root is described by `spec`.
    pub fn from_spec(spec: &NodeSpec) -> Result<Self> {
        let mut tree = MemoryTree::new();
        let root = tree.root();
        {
            let node = &mut tree.nodes[0];
            node.tag = spec.tag.clone();
            node.attrs = spec.attrs.clone();
            if let Some(class) = &spec.class {
                node.attrs.insert("class".to_string(), class.clone());
            }
            node.text = spec.text.clone();
        }
        if let Some(key) = &spec.key {
            tree.keys.insert(key.clone(), root);
        }
        for child in &spec.children {
            tree.append(root, child)?;
        }
        Ok(tree)
    }

    /// Insert `spec` as the last child of `parent`. Returns the new node.
    pub fn append(&mut self, parent: ElementRef, spec: &NodeSpec) -> Result<ElementRef> {
        if !self.is_valid(parent) {
            return Err(NarrationError::UnknownNode {
                key: format!("{:?}", parent),
                context: "append parent".to_string(),
            });
        }

        if let Some(key) = &spec.key {
            if self.keys.get(key).is_some_and(|el| self.is_valid(*el)) {
                return Err(NarrationError::DuplicateNode(key.clone()));
            }
        }

        let el = ElementRef::from_raw(self.nodes.len() as u64);
        let mut attrs = spec.attrs.clone();
        if let Some(class) = &spec.class {
            attrs.insert("class".to_string(), class.clone());
        }
        self.nodes.push(Node {
            tag: spec.tag.clone(),
            attrs,
            text: spec.text.clone(),
            parent: Some(parent),
            children: vec![],
            alive: true,
        });
        self.nodes[parent.raw() as usize].children.push(el);

        if let Some(key) = &spec.key {
            self.keys.insert(key.clone(), el);
        }

        for child in &spec.children {
            self.append(el, child)?;
        }
        Ok(el)
    }

    /// Detach `el` and its subtree. Handles into it become invalid.
    /// Returns false if the node was already gone or is the root.
    pub fn remove(&mut self, el: ElementRef) -> bool {
        if !self.is_valid(el) || el == self.root() {
            return false;
        }

        if let Some(parent) = self.node(el).and_then(|n| n.parent) {
            self.nodes[parent.raw() as usize].children.retain(|c| *c != el);
        }

        let mut stack = vec![el];
        while let Some(node) = stack.pop() {
            let n = &mut self.nodes[node.raw() as usize];
            n.alive = false;
            n.parent = None;
            stack.extend(n.children.iter().copied());
        }

        if self.active.is_some_and(|a| !self.is_valid(a)) {
            self.active = None;
        }
        true
    }

    /// Look up a node by its scenario key.
    pub fn lookup(&self, key: &str) -> Option<ElementRef> {
        self.keys.get(key).copied().filter(|el| self.is_valid(*el))
    }

    pub fn focus(&mut self, el: ElementRef) -> bool {
        if !self.is_valid(el) {
            return false;
        }
        self.active = Some(el);
        true
    }

    pub fn blur(&mut self) {
        self.active = None;
    }

    pub fn set_attribute(&mut self, el: ElementRef, name: &str, value: &str) -> bool {
        match self.node_mut(el) {
            Some(node) => {
                node.attrs.insert(name.to_string(), value.to_string());
                true
            }
            None => false,
        }
    }

    pub fn remove_attribute(&mut self, el: ElementRef, name: &str) -> bool {
        self.node_mut(el)
            .map(|node| node.attrs.remove(name).is_some())
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, el: ElementRef, class: &str) -> bool {
        let Some(node) = self.node_mut(el) else {
            return false;
        };
        let current = node.attrs.entry("class".to_string()).or_default();
        if !current.split_whitespace().any(|c| c == class) {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(class);
        }
        true
    }

    pub fn remove_class(&mut self, el: ElementRef, class: &str) -> bool {
        let Some(node) = self.node_mut(el) else {
            return false;
        };
        if let Some(current) = node.attrs.get_mut("class") {
            *current = current
                .split_whitespace()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ");
        }
        true
    }

    pub fn set_text(&mut self, el: ElementRef, text: &str) -> bool {
        match self.node_mut(el) {
            Some(node) => {
                node.text = Some(text.to_string());
                true
            }
            None => false,
        }
    }

    /// Hide via inline style, the way UI frameworks toggle panels.
    pub fn hide(&mut self, el: ElementRef) -> bool {
        self.set_attribute(el, "style", "display: none")
    }

    pub fn show(&mut self, el: ElementRef) -> bool {
        self.remove_attribute(el, "style");
        self.remove_attribute(el, "hidden");
        self.is_valid(el)
    }

    fn node(&self, el: ElementRef) -> Option<&Node> {
        self.nodes.get(el.raw() as usize).filter(|n| n.alive)
    }

    fn node_mut(&mut self, el: ElementRef) -> Option<&mut Node> {
        self.nodes.get_mut(el.raw() as usize).filter(|n| n.alive)
    }

    fn hides_itself(node: &Node) -> bool {
        if node.attrs.contains_key("hidden") {
            return true;
        }
        node.attrs
            .get("style")
            .map(|s| s.replace(' ', "").to_lowercase().contains("display:none"))
            .unwrap_or(false)
    }
}

impl Default for MemoryTree {
    fn default() -> Self {
        MemoryTree::new()
    }
}

impl UiTree for MemoryTree {
    fn root(&self) -> ElementRef {
        ElementRef::from_raw(0)
    }

    fn is_valid(&self, el: ElementRef) -> bool {
        self.node(el).is_some()
    }

    fn tag_name(&self, el: ElementRef) -> Option<&str> {
        self.node(el).map(|n| n.tag.as_str())
    }

    fn attribute(&self, el: ElementRef, name: &str) -> Option<&str> {
        self.node(el)
            .and_then(|n| n.attrs.get(name))
            .map(String::as_str)
    }

    fn own_text(&self, el: ElementRef) -> Option<&str> {
        self.node(el).and_then(|n| n.text.as_deref())
    }

    fn children(&self, el: ElementRef) -> Vec<ElementRef> {
        self.node(el).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn is_displayed(&self, el: ElementRef) -> bool {
        let mut cursor = Some(el);
        while let Some(current) = cursor {
            let Some(node) = self.node(current) else {
                return false;
            };
            if Self::hides_itself(node) {
                return false;
            }
            cursor = node.parent;
        }
        true
    }

    fn active_element(&self) -> Option<ElementRef> {
        self.active.filter(|el| self.is_valid(*el))
    }
}
