use std::mem;
use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;
use tracing::trace;

use crate::config::QualifierConfig;
use crate::types::State;

/// A free list of reusable evaluation states.
///
/// States handed out are always empty. Each one is owned by exactly one
/// [`PooledState`] guard until that guard drops, at which point it is reset
/// and returned to the list, or dropped if the list is full.
#[derive(Debug)]
pub(crate) struct StatePool {
    free: Mutex<Vec<State>>,
    config: QualifierConfig,
}

impl StatePool {
    pub(crate) fn new(config: QualifierConfig) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            config,
        }
    }

    pub(crate) fn acquire(&self) -> PooledState<'_> {
        let pooled = self.free.lock().pop();
        let state = pooled.unwrap_or_else(|| {
            trace!(event = "state_alloc", "pool empty, allocating state");
            State::with_config(&self.config)
        });
        PooledState { pool: self, state }
    }

    fn release(&self, mut state: State) {
        state.reset();
        let mut free = self.free.lock();
        if free.len() < self.config.max_pooled_states {
            free.push(state);
        } else {
            trace!(
                event = "state_drop",
                max = self.config.max_pooled_states,
                "pool full, dropping state"
            );
        }
    }

    /// Number of idle states.
    pub(crate) fn idle(&self) -> usize {
        self.free.lock().len()
    }
}

/// Exclusive use of a pooled [`State`]. Returns it to the pool on drop.
#[derive(Debug)]
pub(crate) struct PooledState<'a> {
    pool: &'a StatePool,
    state: State,
}

impl Deref for PooledState<'_> {
    type Target = State;

    fn deref(&self) -> &State {
        &self.state
    }
}

impl DerefMut for PooledState<'_> {
    fn deref_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

impl Drop for PooledState<'_> {
    fn drop(&mut self) {
        self.pool.release(mem::take(&mut self.state));
    }
}
