//! Context window — the bounded, ordered history of recent turns.

use parley_core::turn::Turn;
use std::collections::VecDeque;

/// Holds at most `capacity` turns, evicting the oldest first.
#[derive(Debug, Clone)]
pub struct ContextWindow {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl ContextWindow {
    /// Create an empty window. A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a turn, evicting the oldest one if the window is full.
    pub fn record(&mut self, turn: Turn) {
        self.turns.push_back(turn);
        while self.turns.len() > self.capacity {
            self.turns.pop_front();
        }
    }

    /// An independent copy of the current turns, oldest first.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self::new(10)
    }
}
