use std::time::Duration;

use tracing::{debug, info, trace};

use crate::{
    detect::{
        context::{FALLBACK_CONTEXT_NAME, detect_context},
        label::extract_label,
        patterns::{
            DIALOG_BODY_PATTERNS, DIALOG_PATTERNS, DIALOG_TITLE_PATTERNS, MENU_PATTERNS,
            first_descendant_matching, matches_any,
        },
    },
    dispatch::{dispatcher::Dispatcher, event::AccessibilityEvent, sink::EventSink},
    dom::tree::{ElementRef, MutationRecord, UiTree},
    lifecycle::{
        config::NarratorConfig,
        listeners::{Listener, ListenerRegistry},
    },
    schedule::{
        debounce::Debouncer,
        keys::NavKey,
        timers::{TaskId, TaskQueue},
    },
    state::{
        selection::SelectionState,
        tracker::{abandon_pending, record_dispatch, track_focus, track_poll},
    },
};

/// Wait after construction before hooking into the UI.
pub const INIT_DELAY: Duration = Duration::from_millis(500);
/// Wait after a navigation key before re-reading focus.
pub const NAV_RECHECK_DELAY: Duration = Duration::from_millis(50);
/// Wait after a dismissal key before checking that the surface is gone.
pub const MENU_CLOSED_DELAY: Duration = Duration::from_millis(100);

pub const READY_STATUS: &str = "UI accessibility monitor active";
pub const FALLBACK_DIALOG_TITLE: &str = "Dialog";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Active,
    /// Terminal: nothing is ever emitted again
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Task {
    Initialize,
    Poll,
    SendFocused(AccessibilityEvent),
    RecheckFocus,
    CheckMenuClosed,
}

/// Owns the inference engine: selection state, timers, listeners and the
/// dispatcher.
///
/// The narrator never owns the UI tree. The host passes it in with every
/// notification and every clock advance, and the narrator only reads it
/// for the duration of that call.
pub struct Narrator<S: EventSink> {
    config: NarratorConfig,
    lifecycle: LifecycleState,
    listeners: ListenerRegistry,
    selection: SelectionState,
    tasks: TaskQueue<Task>,
    debouncer: Debouncer,
    poll_task: Option<TaskId>,
    dispatcher: Dispatcher<S>,
}

impl<S: EventSink> Narrator<S> {
    /// Create a narrator; it initializes itself once [`INIT_DELAY`] has
    /// elapsed on its clock.
    pub fn new(sink: S, config: NarratorConfig) -> Self {
        let mut tasks = TaskQueue::new();
        tasks.schedule(INIT_DELAY, Task::Initialize);

        Narrator {
            debouncer: Debouncer::new(config.debounce()),
            dispatcher: Dispatcher::new(sink, config.enabled),
            config,
            lifecycle: LifecycleState::Uninitialized,
            listeners: ListenerRegistry::default(),
            selection: SelectionState::new(),
            tasks,
            poll_task: None,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn config(&self) -> &NarratorConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Current time on the narrator's clock.
    pub fn now(&self) -> Duration {
        self.tasks.now()
    }

    /// Number of timers still pending (poll, debounce, re-checks).
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn sink(&self) -> &S {
        self.dispatcher.sink()
    }

    pub fn into_sink(self) -> S {
        self.dispatcher.into_sink()
    }

    /// Flip the kill switch. Disabling drops any pending focus send and lets
    /// the poll loop lapse; enabling an active narrator restarts it.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.lifecycle == LifecycleState::Disabled {
            return;
        }

        self.config.enabled = enabled;
        self.dispatcher.set_enabled(enabled);

        if enabled {
            if self.lifecycle == LifecycleState::Active && self.poll_task.is_none() {
                self.schedule_poll();
            }
        } else {
            self.debouncer.cancel(&mut self.tasks);
            abandon_pending(&mut self.selection);
        }
        info!(enabled, "narration switched");
    }

    /// Input focus moved to `target`.
    pub fn on_focus_in<T: UiTree + ?Sized>(&mut self, tree: &T, target: Option<ElementRef>) {
        if !self.listens(Listener::FocusIn) {
            return;
        }
        self.focus_path(tree, target);
    }

    /// A key went down. Only navigation keys matter; the identifier may
    /// also be a legacy numeric key code.
    pub fn on_key_down(&mut self, key: &str) {
        match NavKey::parse(key) {
            Some(nav) => self.on_nav_key(nav),
            None => trace!(key, "ignoring non-navigation key"),
        }
    }

    pub fn on_nav_key(&mut self, key: NavKey) {
        if !self.listens(Listener::KeyDown) {
            return;
        }

        self.tasks.schedule(NAV_RECHECK_DELAY, Task::RecheckFocus);
        if key.is_dismissal() {
            self.tasks.schedule(MENU_CLOSED_DELAY, Task::CheckMenuClosed);
        }
    }

    /// Nodes were inserted into or removed from the document.
    pub fn on_mutation<T: UiTree + ?Sized>(&mut self, tree: &T, record: &MutationRecord) {
        if !self.listens(Listener::Mutation) {
            return;
        }

        for &node in &record.added {
            if !tree.is_valid(node) {
                continue;
            }

            if matches_any(tree, node, DIALOG_PATTERNS) {
                let title = first_descendant_matching(tree, node, DIALOG_TITLE_PATTERNS)
                    .map(|el| extract_label(tree, el))
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| FALLBACK_DIALOG_TITLE.to_string());
                let content = first_descendant_matching(tree, node, DIALOG_BODY_PATTERNS)
                    .map(|el| extract_label(tree, el))
                    .unwrap_or_default();
                self.emit_now(AccessibilityEvent::Dialog { title, content });
            }

            if matches_any(tree, node, MENU_PATTERNS) {
                let name = Some(extract_label(tree, node))
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| FALLBACK_CONTEXT_NAME.to_string());
                self.emit_now(AccessibilityEvent::MenuOpened { name });
            }
        }
    }

    /// Move the clock forward by `elapsed`, running every task that falls
    /// due, in deadline order.
    pub fn advance<T: UiTree + ?Sized>(&mut self, tree: &T, elapsed: Duration) {
        let target = self.tasks.now() + elapsed;
        while let Some((id, task)) = self.tasks.pop_due(target) {
            self.run_task(tree, id, task);
        }
        self.tasks.set_now(target);
    }

    /// Unhook from the UI for good. Idempotent.
    pub fn teardown(&mut self) {
        if self.lifecycle == LifecycleState::Disabled {
            return;
        }

        let listeners = self.listeners.unregister_all();
        self.debouncer.cancel(&mut self.tasks);
        let cancelled = self.tasks.clear();
        self.poll_task = None;
        abandon_pending(&mut self.selection);

        self.config.enabled = false;
        self.dispatcher.set_enabled(false);
        self.lifecycle = LifecycleState::Disabled;

        info!(listeners, cancelled, "UI monitor destroyed");
    }

    fn listens(&self, listener: Listener) -> bool {
        self.lifecycle == LifecycleState::Active
            && self.config.enabled
            && self.listeners.is_registered(listener)
    }

    fn run_task<T: UiTree + ?Sized>(&mut self, tree: &T, id: TaskId, task: Task) {
        if self.lifecycle == LifecycleState::Disabled {
            return;
        }

        match task {
            Task::Initialize => self.initialize(tree),

            Task::Poll => {
                self.poll_task = None;
                self.poll(tree);
            }

            Task::SendFocused(event) => {
                if !self.debouncer.fired(id) {
                    return;
                }
                if self.dispatcher.publish(&event) {
                    record_dispatch(&mut self.selection, &event);
                } else {
                    abandon_pending(&mut self.selection);
                }
            }

            Task::RecheckFocus => {
                if self.listens(Listener::KeyDown) {
                    self.focus_path(tree, tree.active_element());
                }
            }

            Task::CheckMenuClosed => {
                if self.listens(Listener::KeyDown) && detect_context(tree).is_none() {
                    self.emit_now(AccessibilityEvent::MenuClosed);
                }
            }
        }
    }

    fn initialize<T: UiTree + ?Sized>(&mut self, tree: &T) {
        if self.lifecycle != LifecycleState::Uninitialized {
            return;
        }
        info!("UI monitor initializing");

        self.listeners.register_all();
        self.lifecycle = LifecycleState::Active;

        // An item already selected is reported ahead of the status
        self.poll(tree);
        self.emit_now(AccessibilityEvent::Status {
            text: READY_STATUS.to_string(),
        });

        info!(
            poll_interval_ms = self.config.poll_interval_ms,
            debounce_ms = self.config.debounce_ms,
            "UI monitor initialized"
        );
    }

    /// One poll tick. Reschedules itself while enabled.
    fn poll<T: UiTree + ?Sized>(&mut self, tree: &T) {
        if !self.config.enabled {
            debug!("poll loop paused: narration disabled");
            return;
        }

        if let Some(active) = tree.active_element() {
            self.focus_path(tree, Some(active));
        }

        if let Some(event) = track_poll(&mut self.selection, tree) {
            self.emit_now(event);
        }

        self.schedule_poll();
    }

    fn schedule_poll(&mut self) {
        if let Some(id) = self.poll_task.take() {
            self.tasks.cancel(id);
        }
        self.poll_task = Some(self.tasks.schedule(self.config.poll_interval(), Task::Poll));
    }

    fn focus_path<T: UiTree + ?Sized>(&mut self, tree: &T, target: Option<ElementRef>) {
        if !self.config.enabled || target == Some(tree.root()) {
            return;
        }

        if let Some(event) = track_focus(&mut self.selection, tree, target) {
            self.debouncer
                .submit(&mut self.tasks, Task::SendFocused(event));
        }
    }

    /// Dispatch without debounce.
    fn emit_now(&mut self, event: AccessibilityEvent) {
        if self.dispatcher.publish(&event) {
            record_dispatch(&mut self.selection, &event);
        }
    }
}
