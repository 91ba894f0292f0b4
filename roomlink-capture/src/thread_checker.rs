use std::cell::Cell;
use std::thread::{self, ThreadId};

/// Thread-affinity token with detach-then-claim semantics.
///
/// Captures the constructing thread's id, which `detach` clears so that the
/// next thread to call [`is_current`](Self::is_current) becomes the owner.
/// The adapter detaches immediately after construction because it is built
/// on one thread and driven from another.
#[derive(Debug)]
pub struct ThreadChecker {
    owner: Cell<Option<ThreadId>>,
}

impl ThreadChecker {
    pub fn new() -> Self {
        Self {
            owner: Cell::new(Some(thread::current().id())),
        }
    }

    /// Releases ownership; the next `is_current` call claims it.
    pub fn detach(&self) {
        self.owner.set(None);
    }

    pub fn is_current(&self) -> bool {
        let current = thread::current().id();
        match self.owner.get() {
            Some(owner) => owner == current,
            None => {
                self.owner.set(Some(current));
                true
            }
        }
    }
}

impl Default for ThreadChecker {
    fn default() -> Self {
        Self::new()
    }
}
