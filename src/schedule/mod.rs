pub mod debounce;
pub mod keys;
pub mod timers;
