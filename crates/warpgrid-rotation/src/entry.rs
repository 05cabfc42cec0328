//! Per-entry repeat-count bookkeeping.

/// Weight given to entries added without an explicit weight.
pub const DEFAULT_WEIGHT: u32 = 0;

/// Step used by callers that bump a weight by "one notch".
pub const DEFAULT_AMOUNT: u32 = 1;

/// Value the usage counter returns to whenever the cursor leaves an entry.
pub const DEFAULT_COUNTER: u64 = 0;

/// One slot in the rotation.
///
/// `weight` is the number of *extra* selections the entry receives each
/// time the cursor reaches it; `usage` counts re-selections since it last
/// became current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedEntry<T> {
    value: T,
    weight: u32,
    usage: u64,
}

impl<T> WeightedEntry<T> {
    pub fn new(value: T, weight: u32) -> Self {
        Self {
            value,
            weight,
            usage: DEFAULT_COUNTER,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn usage(&self) -> u64 {
        self.usage
    }

    /// Count one more selection and report whether the budget is spent.
    ///
    /// Call at most once per selection decision: the increment sticks even
    /// if the caller ignores the answer.
    pub fn must_advance(&mut self) -> bool {
        self.usage = self.usage.saturating_add(1);
        self.usage > u64::from(self.weight)
    }

    pub fn reset_usage(&mut self) {
        self.usage = DEFAULT_COUNTER;
    }

    pub fn set_weight(&mut self, weight: u32) {
        self.weight = weight;
    }

    pub fn increase_weight(&mut self, amount: u32) {
        self.weight = self.weight.saturating_add(amount);
    }

    /// Lower the weight, stopping at zero.
    pub fn decrease_weight(&mut self, amount: u32) {
        self.weight = self.weight.saturating_sub(amount);
    }
}
