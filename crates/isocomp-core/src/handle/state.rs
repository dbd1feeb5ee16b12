use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of a task handle.
///
/// `Idle -> Starting -> Armed -> {Completed | Failed | Canceled}`. Terminal states absorb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HandleState {
    /// Created, start not yet dispatched.
    Idle = 0,
    /// Worker is locating the service or waiting on the start call.
    Starting = 1,
    /// Remote task reference stored and liveness watch registered.
    Armed = 2,
    Completed = 3,
    Failed = 4,
    /// Cancelled locally; any later outcome is suppressed.
    Canceled = 5,
}

impl HandleState {
    /// Returns `true` if no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            HandleState::Completed | HandleState::Failed | HandleState::Canceled
        )
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => HandleState::Idle,
            1 => HandleState::Starting,
            2 => HandleState::Armed,
            3 => HandleState::Completed,
            4 => HandleState::Failed,
            5 => HandleState::Canceled,
            // Only values written through `AtomicState` are ever stored.
            _ => unreachable!("invalid handle state {raw}"),
        }
    }
}

/// Lock-free cell holding a [`HandleState`].
pub(crate) struct AtomicState(AtomicU8);

impl AtomicState {
    pub(crate) fn new(state: HandleState) -> Self {
        Self(AtomicU8::new(state as u8))
    }

    #[inline]
    pub(crate) fn load(&self) -> HandleState {
        HandleState::from_u8(self.0.load(Ordering::SeqCst))
    }

    /// Move `from -> to`; `false` if the current state is not `from`.
    pub(crate) fn transition(&self, from: HandleState, to: HandleState) -> bool {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Enter terminal state `to` unless a terminal state was already reached.
    pub(crate) fn finish(&self, to: HandleState) -> bool {
        self.0
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |raw| {
                if HandleState::from_u8(raw).is_terminal() {
                    None
                } else {
                    Some(to as u8)
                }
            })
            .is_ok()
    }
}
