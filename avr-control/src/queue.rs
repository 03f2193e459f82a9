//! Rate-limited query queue
//!
//! Receivers drop commands that arrive back to back, so status queries are
//! spaced out by [`QUERY_COMMAND_DELAY`]. The queue keeps FIFO order and
//! silently drops commands that are already waiting.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

/// Minimum spacing between two queued query commands
pub const QUERY_COMMAND_DELAY: Duration = Duration::from_millis(75);

/// Deduplicating FIFO of pending query commands
#[derive(Debug, Default)]
pub struct QueryQueue {
    order: VecDeque<String>,
    pending: HashSet<String>,
}

impl QueryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command unless it is already waiting
    pub fn push(&mut self, command: impl Into<String>) {
        let command = command.into();
        if self.pending.insert(command.clone()) {
            self.order.push_back(command);
        }
    }

    /// Take the oldest pending command
    pub fn pop(&mut self) -> Option<String> {
        let command = self.order.pop_front()?;
        self.pending.remove(&command);
        Some(command)
    }

    /// Drop all pending commands
    pub fn clear(&mut self) {
        self.order.clear();
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut q = QueryQueue::new();
        q.push("?P");
        q.push("?V");
        q.push("?M");

        assert_eq!(q.pop().as_deref(), Some("?P"));
        assert_eq!(q.pop().as_deref(), Some("?V"));
        assert_eq!(q.pop().as_deref(), Some("?M"));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn test_duplicates_dropped() {
        let mut q = QueryQueue::new();
        q.push("?V");
        q.push("?P");
        q.push("?V");
        q.push("?V");

        assert_eq!(q.len(), 2);
        assert_eq!(q.pop().as_deref(), Some("?V"));
        assert_eq!(q.pop().as_deref(), Some("?P"));
    }

    #[test]
    fn test_requeue_after_pop() {
        let mut q = QueryQueue::new();
        q.push("?V");
        assert_eq!(q.pop().as_deref(), Some("?V"));

        // Once drained the same command may be queued again.
        q.push("?V");
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut q = QueryQueue::new();
        q.push("?P");
        q.push("?V");
        q.clear();

        assert!(q.is_empty());
        q.push("?P");
        assert_eq!(q.len(), 1);
    }
}
