use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Runtime options of a [`Narrator`](crate::lifecycle::narrator::Narrator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarratorConfig {
    /// Global kill switch, checked before every emission and poll tick
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_ms: 100,
            debounce_ms: 50,
        }
    }
}

impl NarratorConfig {
    /// Poll period; never zero so a tick cannot reschedule itself forever
    /// within one clock advance.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn default_true() -> bool { true }
fn default_poll_interval_ms() -> u64 { 100 }
fn default_debounce_ms() -> u64 { 50 }
