/// Where a column's orbit stood after the last completed stage.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ColumnState {
    /// Never iterated: outside the safety band, or escaped during the transient.
    Skipped,
    /// Escaped while plotting; nothing left to add.
    Escaped,
    /// Still bounded; the next stage picks up from this iterate.
    Resumable(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnCheckpoints {
    states: Vec<ColumnState>,
}

impl ColumnCheckpoints {
    #[must_use]
    pub fn new(width: u32) -> Self {
        Self {
            states: vec![ColumnState::Skipped; width as usize],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn get(&self, column: u32) -> ColumnState {
        self.states[column as usize]
    }

    pub fn set(&mut self, column: u32, state: ColumnState) {
        self.states[column as usize] = state;
    }

    #[must_use]
    pub fn resumable_count(&self) -> usize {
        self.states
            .iter()
            .filter(|state| matches!(state, ColumnState::Resumable(_)))
            .count()
    }
}
