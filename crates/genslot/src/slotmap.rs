//! The slotmap: orchestrates allocation, the free list, the generation
//! clock, and (optionally) capacity growth over a [`Storage`] and a
//! [`SkipField`].

use crate::config::SlotmapConfig;
use crate::error::SlotMapError;
use crate::handle::Handle;
use crate::iter::{FilterIter, FilterIterMut, Iter, IterMut};
use crate::skipfield::{NullSkipField, SkipField};
use crate::storage::Storage;
use crate::word::Word;

/// A generational slotmap: hands out `(index, generation)` handles that
/// stay valid across unrelated insertions/removals and detect use-after-free
/// once a slot has been reused.
///
/// Type parameters, all fixed for the slotmap's lifetime:
/// - `T`: the payload type (must be [`Default`] — see [`Storage`]).
/// - `W`, `HANDLE_BITS`, `GEN_BITS`: the handle's backing word and its
///   index/generation bit split (spec.md §4.1).
/// - `S`: the skip-field strategy — [`NullSkipField`] (default, no
///   acceleration) or
///   [`RunLengthSkipField`](crate::skipfield::RunLengthSkipField) (O(1)
///   filtered iteration).
/// - `GROW`: whether `alloc`/`push` may grow the backing storage once full,
///   rather than raising [`SlotMapError::OutOfSlots`].
#[derive(Debug)]
pub struct Slotmap<
    T,
    W: Word = u32,
    const HANDLE_BITS: u32 = 32,
    const GEN_BITS: u32 = 16,
    S: SkipField = NullSkipField,
    const GROW: bool = true,
> {
    storage: Storage<T, W, HANDLE_BITS, GEN_BITS>,
    skipfield: S,
    capacity: usize,
    top: usize,
    size: usize,
    free_head: u64,
    generation: u64,
}

impl<T: Default, W: Word, const HANDLE_BITS: u32, const GEN_BITS: u32, S: SkipField, const GROW: bool>
    Slotmap<T, W, HANDLE_BITS, GEN_BITS, S, GROW>
{
    /// Build a slotmap from a [`SlotmapConfig`]: `capacity` is clamped to
    /// this handle width's `INDEX_MAX`; `initial_generation` must be in
    /// `[1, GENERATION_MAX]`.
    #[must_use]
    pub fn with_config(config: SlotmapConfig) -> Self {
        let index_max = Handle<W, HANDLE_BITS, GEN_BITS>::INDEX_MAX;
        let gen_max = Handle<W, HANDLE_BITS, GEN_BITS>::GENERATION_MAX;
        debug_assert!(
            (1..=gen_max).contains(&config.initial_generation),
            "initial_generation out of [1, GENERATION_MAX]"
        );
        let capacity = config.capacity.min(index_max) as usize;
        Self {
            storage: Storage::new(capacity),
            skipfield: S::default(),
            capacity,
            top: 0,
            size: 0,
            free_head: index_max,
            generation: config.initial_generation,
        }
    }

    /// Build a slotmap with the given capacity and the default initial
    /// generation (1).
    #[must_use]
    pub fn new(capacity: u64) -> Self {
        Self::with_config(SlotmapConfig::new(capacity))
    }

    /// Number of live slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// `true` iff no slots are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of physical slots currently backing this slotmap.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Allocate a slot and return a mutable reference to its
    /// default-initialized payload, ready to be written.
    ///
    /// # Errors
    ///
    /// [`SlotMapError::OutOfSlots`] if the slotmap is at capacity and either
    /// growth is disabled (`GROW == false`) or this handle width's
    /// `INDEX_MAX` has been reached.
    pub fn alloc(&mut self) -> Result<&mut T, SlotMapError> {
        let i = self.acquire_slot()?;
        Ok(self.storage.value_at_mut(i))
    }

    /// Allocate a slot, move `value` into it, and return its handle.
    ///
    /// # Errors
    ///
    /// See [`alloc`](Self::alloc).
    pub fn push(&mut self, value: T) -> Result<Handle<W, HANDLE_BITS, GEN_BITS>, SlotMapError> {
        let i = self.acquire_slot()?;
        *self.storage.value_at_mut(i) = value;
        Ok(self.storage.handle_at(i))
    }

    fn acquire_slot(&mut self) -> Result<usize, SlotMapError> {
        let index_max = Handle<W, HANDLE_BITS, GEN_BITS>::INDEX_MAX;

        let i = if self.free_head < self.top as u64 {
            let i = self.free_head as usize;
            self.free_head = self.storage.handle_at(i).index();
            self.skipfield.unskip(i);
            i
        } else {
            if self.size == self.capacity {
                if GROW && (self.capacity as u64) < index_max {
                    self.capacity = self.storage.grow(index_max as usize);
                } else {
                    return Err(SlotMapError::OutOfSlots {
                        capacity: self.capacity as u64,
                    });
                }
            }
            let i = self.top;
            self.top += 1;
            self.skipfield.grow();
            i
        };

        self.storage
            .set_handle_at(i, Handle<W, HANDLE_BITS, GEN_BITS>::new(i as u64, self.generation));
        self.size += 1;
        self.generation = Handle<W, HANDLE_BITS, GEN_BITS>::evolve(self.generation);
        Ok(i)
    }

    /// Resolve `h` to its payload, or `None` if `h` is stale (its slot has
    /// been freed or reused since).
    ///
    /// `h` must be valid (`h.is_valid()`); passing the null handle or one
    /// whose index is out of bounds is a contract violation, caught by a
    /// debug assertion rather than branched on at runtime (spec.md §7).
    #[must_use]
    pub fn find(&self, h: Handle<W, HANDLE_BITS, GEN_BITS>) -> Option<&T> {
        debug_assert!(h.is_valid(), "find called with an invalid handle");
        let i = h.index() as usize;
        debug_assert!(i < self.capacity, "handle index out of bounds");
        (self.storage.handle_at(i) == h).then(|| self.storage.value_at(i))
    }

    /// Mutable counterpart of [`find`](Self::find).
    #[must_use]
    pub fn find_mut(&mut self, h: Handle<W, HANDLE_BITS, GEN_BITS>) -> Option<&mut T> {
        debug_assert!(h.is_valid(), "find_mut called with an invalid handle");
        let i = h.index() as usize;
        debug_assert!(i < self.capacity, "handle index out of bounds");
        if self.storage.handle_at(i) == h {
            Some(self.storage.value_at_mut(i))
        } else {
            None
        }
    }

    /// Vacate the slot `h` refers to. Returns `false` (without effect) if
    /// `h` is already stale — this is the documented way to test handle
    /// liveness, not an error.
    pub fn free(&mut self, h: Handle<W, HANDLE_BITS, GEN_BITS>) -> bool {
        debug_assert!(h.is_valid(), "free called with an invalid handle");
        let i = h.index() as usize;
        debug_assert!(i < self.capacity, "handle index out of bounds");
        if self.storage.handle_at(i) != h {
            return false;
        }
        let old_free_head = self.free_head;
        self.free_head = i as u64;
        self.skipfield.skip(i);
        self.storage.set_handle_at(i, Handle<W, HANDLE_BITS, GEN_BITS>::free_link(old_free_head));
        self.size -= 1;
        true
    }

    /// Vacate every live slot and reset the free list. Capacity is
    /// unchanged; the generation counter advances once (spec.md §9) so a
    /// handle minted before `clear()` never matches one minted after it at
    /// the same index.
    pub fn clear(&mut self) {
        for i in 0..self.top {
            self.storage.set_handle_at(i, Handle<W, HANDLE_BITS, GEN_BITS>::null());
        }
        self.skipfield.clear();
        self.size = 0;
        self.top = 0;
        self.free_head = Handle<W, HANDLE_BITS, GEN_BITS>::INDEX_MAX;
        self.generation = Handle<W, HANDLE_BITS, GEN_BITS>::evolve(self.generation);
    }

    /// Dense iterator over `[0, top)`: every touched slot, live or dead.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.storage.dense_slice(self.top))
    }

    /// Mutable dense iterator over `[0, top)`.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.storage.dense_slice_mut(self.top))
    }

    /// Filtered iterator: only live slots, accelerated by the skip field
    /// when `S` is [`RunLengthSkipField`](crate::skipfield::RunLengthSkipField).
    pub fn iter_live(&self) -> FilterIter<'_, T, W, HANDLE_BITS, GEN_BITS, S> {
        FilterIter::new(
            self.storage.dense_slice(self.top),
            self.storage.handle_slice(self.top),
            &self.skipfield,
        )
    }

    /// Mutable filtered iterator: only live slots.
    pub fn iter_live_mut(&mut self) -> FilterIterMut<'_, T, W, HANDLE_BITS, GEN_BITS> {
        let (handles, payloads) = self.storage.split_mut(self.top);
        FilterIterMut::new(payloads, handles)
    }
}

#[cfg(feature = "rand")]
use rand::SeedableRng;

#[cfg(feature = "rand")]
impl<T: Default, W: Word, const HANDLE_BITS: u32, const GEN_BITS: u32, S: SkipField, const GROW: bool>
    Slotmap<T, W, HANDLE_BITS, GEN_BITS, S, GROW>
{
    /// Build a slotmap whose initial generation is sampled uniformly from
    /// `[1, GENERATION_MAX]` rather than defaulting to 1 — the "source
    /// repository offers both variants" branch of spec.md §4.4, exposed as
    /// an explicit opt-in constructor rather than a silent runtime choice.
    #[must_use]
    pub fn with_random_generation(capacity: u64, rng: &mut impl rand::RngCore) -> Self {
        let gen_max = Handle::<W, HANDLE_BITS, GEN_BITS>::GENERATION_MAX;
        let generation = 1 + (rng.next_u64() % gen_max);
        Self::with_config(SlotmapConfig::new(capacity).with_initial_generation(generation))
    }

    /// Convenience wrapper over [`with_random_generation`](Self::with_random_generation)
    /// that seeds a `ChaCha8Rng` from `seed`, for callers who want a
    /// reproducible randomized initial generation without threading their
    /// own RNG through — the same `ChaCha8Rng::seed_from_u64` determinism
    /// contract used for seeded noise elsewhere in this workspace.
    #[must_use]
    pub fn with_random_generation_seeded(capacity: u64, seed: u64) -> Self {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        Self::with_random_generation(capacity, &mut rng)
    }
}
