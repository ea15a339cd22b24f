//! In-memory storage

use super::{Storage, StoreState};
use crate::error::Result;

/// Storage that keeps the committed document in memory and counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: StoreState,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed document
    pub fn state(&self) -> &StoreState {
        &self.state
    }

    /// Number of successful writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<StoreState> {
        Ok(self.state.clone())
    }

    fn write(&mut self, state: &StoreState) -> Result<()> {
        self.state = state.clone();
        self.writes += 1;
        Ok(())
    }
}
