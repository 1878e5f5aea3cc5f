use serde::{Deserialize, Serialize};

/// Normalized accessibility event handed to the narration sink.
///
/// Only plain data crosses this boundary; element handles never do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AccessibilityEvent {
    MenuItemFocused {
        #[serde(rename = "text")]
        label: String,
        /// 1-based; 0 when no item of the context is active
        index: usize,
        total: usize,
        #[serde(rename = "menuName")]
        context_name: String,
    },
    MenuOpened {
        name: String,
    },
    MenuClosed,
    Dialog {
        title: String,
        content: String,
    },
    Status {
        text: String,
    },
}

impl AccessibilityEvent {
    /// Text a screen reader would speak for this event.
    pub fn announcement(&self) -> String {
        match self {
            AccessibilityEvent::MenuItemFocused {
                label,
                index,
                total,
                ..
            } => {
                if *total > 0 && *index > 0 {
                    format!("{}, {} of {}", label, index, total)
                } else {
                    label.clone()
                }
            }
            AccessibilityEvent::MenuOpened { name } => format!("{} opened", name),
            AccessibilityEvent::MenuClosed => "Menu closed".to_string(),
            AccessibilityEvent::Dialog { title, content } => {
                let mut out = String::new();
                if !title.is_empty() {
                    out.push_str(&format!("Dialog: {}. ", title));
                }
                if !content.is_empty() {
                    out.push_str(content);
                }
                out.trim().to_string()
            }
            AccessibilityEvent::Status { text } => text.clone(),
        }
    }

    /// Short tag used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AccessibilityEvent::MenuItemFocused { .. } => "menuItemFocused",
            AccessibilityEvent::MenuOpened { .. } => "menuOpened",
            AccessibilityEvent::MenuClosed => "menuClosed",
            AccessibilityEvent::Dialog { .. } => "dialog",
            AccessibilityEvent::Status { .. } => "status",
        }
    }
}
