pub mod cli;
pub mod detect;
pub mod dispatch;
pub mod dom;
pub mod error;
pub mod lifecycle;
pub mod scenario;
pub mod schedule;
pub mod state;

pub use dispatch::event::AccessibilityEvent;
pub use dispatch::sink::EventSink;
pub use dom::tree::{ElementRef, MutationRecord, UiTree};
pub use error::NarrationError;
pub use lifecycle::config::NarratorConfig;
pub use lifecycle::narrator::{LifecycleState, Narrator};
