/// Progress of a merge or translation run.
///
/// Emitted once per processed file or key and handed straight to the
/// caller's callback; nothing retains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressReport {
    pub completed: usize,
    pub total: usize,
}

impl ProgressReport {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Completed share in `0.0..=1.0`; an empty run counts as finished
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (self.completed as f64 / self.total as f64).min(1.0)
        }
    }

    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }
}
