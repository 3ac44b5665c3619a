//! Trailing-edge debounce of the search term
//!
//! The debouncer owns no timer. Callers feed it raw input with the current
//! instant and poll it later; the raw value becomes stable once a full quiet
//! period has passed without further input. Each input restarts the quiet
//! period and supersedes the pending value.

use std::time::{Duration, Instant};

/// Whether a value is waiting to stabilize
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Pending { deadline: Instant, value: String },
}

/// Raw/stable pair for one debounced text input
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    raw: String,
    stable: String,
    state: DebounceState,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            raw: String::new(),
            stable: String::new(),
            state: DebounceState::Idle,
        }
    }

    /// Record new raw input and restart the quiet period
    ///
    /// Never emits immediately, even when the value equals the stable one.
    pub fn input(&mut self, value: impl Into<String>, now: Instant) {
        let value = value.into();
        self.raw.clone_from(&value);
        self.state = DebounceState::Pending {
            deadline: now + self.delay,
            value,
        };
    }

    /// Stabilize the pending value if its deadline has passed
    ///
    /// Returns the newly stable value, or `None` when nothing changed.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        match &self.state {
            DebounceState::Pending { deadline, .. } if now >= *deadline => {}
            _ => return None,
        }
        let DebounceState::Pending { value, .. } =
            std::mem::replace(&mut self.state, DebounceState::Idle)
        else {
            return None;
        };
        self.stable = value;
        Some(self.stable.as_str())
    }

    /// Drop any pending value; returns whether one was pending
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        self.state = DebounceState::Idle;
        was_pending
    }

    /// Latest input, as typed
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Value the projection filters by
    pub fn stable(&self) -> &str {
        &self.stable
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }

    /// When the pending value will stabilize, if any
    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            DebounceState::Pending { deadline, .. } => Some(*deadline),
            DebounceState::Idle => None,
        }
    }

    pub fn state(&self) -> &DebounceState {
        &self.state
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
