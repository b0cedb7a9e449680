//! Slotmap configuration parameters.

/// Configuration for [`Slotmap::with_config`](crate::slotmap::Slotmap::with_config).
///
/// Controls initial capacity and the starting generation counter. Validated
/// at construction; both values are fixed for the slotmap's lifetime except
/// as the allocator advances `generation` on its own.
#[derive(Clone, Copy, Debug)]
pub struct SlotmapConfig {
    /// Number of slots to pre-size the backing storage to.
    ///
    /// Clamped to the chosen handle width's `INDEX_MAX` by the slotmap
    /// constructor.
    pub capacity: u64,

    /// The generation value stamped onto the first slot allocated.
    ///
    /// Default: 1. Must be in `[1, GENERATION_MAX]` for the chosen handle
    /// width — spec.md §4.4 mandates this default for determinism and
    /// testability, with the randomized variant offered as an explicit
    /// opt-in constructor rather than the default.
    pub initial_generation: u64,
}

impl SlotmapConfig {
    /// Default initial generation: 1.
    pub const DEFAULT_INITIAL_GENERATION: u64 = 1;

    /// Build a config for the given capacity, using the default initial
    /// generation.
    #[must_use]
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            initial_generation: Self::DEFAULT_INITIAL_GENERATION,
        }
    }

    /// Override the initial generation.
    #[must_use]
    pub fn with_initial_generation(mut self, generation: u64) -> Self {
        self.initial_generation = generation;
        self
    }
}

impl Default for SlotmapConfig {
    fn default() -> Self {
        Self::new(0)
    }
}
