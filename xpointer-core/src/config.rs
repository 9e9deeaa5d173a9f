//! Processor configuration.

/// Initial capacity of an `element()` position stack.
pub const DEFAULT_DEPTH_CAPACITY: usize = 16;

/// Upper bound on the pre-sized stack; deeper documents grow it on demand.
pub const MAX_INITIAL_DEPTH_CAPACITY: usize = 1024;

/// How the processor arbitrates between several pointer parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WinnerPolicy {
    /// The leftmost part that resolves first becomes the only part fed
    /// for the rest of the traversal.
    #[default]
    FirstMatchWins,
    /// Every part sees every event; the leftmost part resolved by the
    /// current event answers the predicates.
    ReevaluateAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorConfig {
    pub winner_policy: WinnerPolicy,
    /// Pre-sized depth of each `element()` position stack; it still grows
    /// on demand.
    pub initial_depth_capacity: usize,
}

impl ProcessorConfig {
    pub fn new() -> Self {
        Self {
            winner_policy: WinnerPolicy::FirstMatchWins,
            initial_depth_capacity: DEFAULT_DEPTH_CAPACITY,
        }
    }

    pub fn with_winner_policy(mut self, policy: WinnerPolicy) -> Self {
        self.winner_policy = policy;
        self
    }

    /// Pre-size position stacks; clamped to [`MAX_INITIAL_DEPTH_CAPACITY`].
    pub fn with_initial_depth_capacity(mut self, capacity: usize) -> Self {
        self.initial_depth_capacity = capacity.min(MAX_INITIAL_DEPTH_CAPACITY);
        self
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::new()
    }
}
