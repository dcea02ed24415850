//! Load-more state machine.
//!
//! Governs when the host is asked for more items: at most one load in
//! flight, and once the host reports exhaustion nothing fires again
//! until the next reset.

use crate::error::ListError;
use crate::geometry::DEFAULT_LOAD_TRIGGER_DISTANCE;

/// Loading phase of a list generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    /// No request in flight; triggers may fire.
    #[default]
    Idle,
    /// Waiting for the host to finish loading more items.
    AwaitingMore,
    /// The host reported exhaustion. Terminal until reset.
    NoMoreAvailable,
}

/// Decides when to ask the host for more items.
#[derive(Clone, Debug)]
pub struct LoadMoreController {
    state: LoadState,
    trigger_distance: f32,
}

impl Default for LoadMoreController {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_TRIGGER_DISTANCE)
    }
}

impl LoadMoreController {
    pub fn new(trigger_distance: f32) -> Self {
        Self {
            state: LoadState::Idle,
            trigger_distance,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn trigger_distance(&self) -> f32 {
        self.trigger_distance
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::AwaitingMore
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == LoadState::NoMoreAvailable
    }

    /// Whether the shortest column's end is within the trigger
    /// distance of the scroll window's lower bound. Only meaningful
    /// while Idle; the fill pass checks the state separately.
    pub fn within_trigger(&self, shortest_bottom: f32, window_end: f32) -> bool {
        shortest_bottom - window_end <= self.trigger_distance
    }

    /// Idle -> AwaitingMore.
    pub fn begin(&mut self) {
        debug_assert_eq!(self.state, LoadState::Idle);
        self.state = LoadState::AwaitingMore;
    }

    /// Idle -> NoMoreAvailable.
    pub fn exhaust(&mut self) {
        debug_assert_eq!(self.state, LoadState::Idle);
        self.state = LoadState::NoMoreAvailable;
    }

    /// AwaitingMore -> Idle. In any other state the call is ignored
    /// and reported; the state is left untouched.
    pub fn complete(&mut self) -> Result<(), ListError> {
        if self.state != LoadState::AwaitingMore {
            log::debug!("ignoring load completion while {:?}", self.state);
            return Err(ListError::InvalidStateTransition { state: self.state });
        }
        self.state = LoadState::Idle;
        Ok(())
    }

    /// Back to Idle, clearing a terminal NoMoreAvailable.
    pub fn reset(&mut self) {
        self.state = LoadState::Idle;
    }
}
