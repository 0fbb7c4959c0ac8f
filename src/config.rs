//! Tuning knobs for the sort kernel.

/// Partitions at or below this length are insertion-sorted.
pub const DEFAULT_INSERTION_THRESHOLD: usize = 16;

/// How deep quicksort partitioning may go before the kernel switches to heapsort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DepthLimit {
    /// `2 * floor(log2(len))`, computed per call from the input length.
    #[default]
    Auto,
    /// A fixed number of partition levels. `Fixed(0)` heap-sorts anything above the
    /// insertion threshold.
    Fixed(u32),
}

impl DepthLimit {
    /// Resolves the limit for an input of `len` elements.
    pub fn resolve(self, len: usize) -> u32 {
        match self {
            DepthLimit::Auto => 2 * len.checked_ilog2().unwrap_or(0),
            DepthLimit::Fixed(limit) => limit,
        }
    }
}

/// Configuration for a sort call.
///
/// ```
/// use numsort::{DepthLimit, SortConfig};
///
/// let config = SortConfig::default()
///     .with_insertion_threshold(24)
///     .with_depth_limit(DepthLimit::Fixed(8));
///
/// assert_eq!(config.insertion_threshold(), 24);
/// assert_eq!(config.depth_limit(), DepthLimit::Fixed(8));
///
/// // A zero threshold is clamped to one.
/// assert_eq!(SortConfig::default().with_insertion_threshold(0).insertion_threshold(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortConfig {
    insertion_threshold: usize,
    depth_limit: DepthLimit,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            insertion_threshold: DEFAULT_INSERTION_THRESHOLD,
            depth_limit: DepthLimit::Auto,
        }
    }
}

impl SortConfig {
    /// Sets the insertion sort cutoff. Zero is treated as one.
    pub fn with_insertion_threshold(mut self, threshold: usize) -> Self {
        self.insertion_threshold = threshold.max(1);
        self
    }

    /// Sets the depth guard policy.
    pub fn with_depth_limit(mut self, depth_limit: DepthLimit) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    /// Largest partition handed to insertion sort.
    pub fn insertion_threshold(&self) -> usize {
        self.insertion_threshold
    }

    /// The depth guard policy.
    pub fn depth_limit(&self) -> DepthLimit {
        self.depth_limit
    }
}
