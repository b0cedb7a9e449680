//! Packed (index, generation) handles and their bit-field algebra.
//!
//! A [`Handle`] encodes a slot index and a generation counter into a single
//! `W` (see [`Word`]). `generation == 0` is the sentinel meaning "no live
//! value" — handles with generation zero are never returned from a
//! successful allocation, and the all-zero handle is the canonical null.

use std::fmt;
use std::marker::PhantomData;

use crate::word::Word;

/// Packed (index, generation) identifier for a slot.
///
/// `HANDLE_BITS` is the total width in bits actually used within `W` (it may
/// be narrower than `W::BITS` — e.g. a 4-bit handle packed into a `u8`, as in
/// spec.md's S2/S3 test scenarios). `GEN_BITS` is the width of the generation
/// sub-field within those `HANDLE_BITS`; the index sub-field takes the
/// remaining `HANDLE_BITS - GEN_BITS` low bits. Constraints —
/// `HANDLE_BITS <= W::BITS` and `0 < GEN_BITS < HANDLE_BITS` — are enforced
/// by a compile-time assertion the first time a
/// `Handle<W, HANDLE_BITS, GEN_BITS>` is constructed in a given
/// monomorphization.
///
/// Handles are `Copy`, compare equal field-wise, and carry no ownership —
/// they may be freely copied, stored, or discarded without affecting the
/// slotmap they came from.
#[derive(Clone, Copy, Debug, Hash)]
pub struct Handle<W: Word, const HANDLE_BITS: u32, const GEN_BITS: u32> {
    packed: W,
    _marker: PhantomData<[(); 0]>,
}

impl<W: Word, const HANDLE_BITS: u32, const GEN_BITS: u32> Handle<W, HANDLE_BITS, GEN_BITS> {
    const fn assert_bits_valid() {
        assert!(HANDLE_BITS > 0, "HANDLE_BITS must be nonzero");
        assert!(HANDLE_BITS <= W::BITS, "HANDLE_BITS must fit within W");
        assert!(GEN_BITS > 0, "GEN_BITS must be nonzero");
        assert!(
            GEN_BITS < HANDLE_BITS,
            "GEN_BITS must leave at least one index bit"
        );
    }

    /// Number of bits reserved for the index sub-field.
    pub const INDEX_BITS: u32 = HANDLE_BITS - GEN_BITS;

    /// Largest representable index value (`2^INDEX_BITS - 1`), also the "end
    /// of free list" sentinel.
    pub const INDEX_MAX: u64 = (1u64 << Self::INDEX_BITS) - 1;

    /// Largest representable (nonzero) generation value.
    pub const GENERATION_MAX: u64 = (1u64 << GEN_BITS) - 1;

    #[inline]
    fn pack(index: u64, generation: u64) -> W {
        Self::assert_bits_valid();
        debug_assert!(index <= Self::INDEX_MAX, "index exceeds INDEX_MAX");
        debug_assert!(
            generation <= Self::GENERATION_MAX,
            "generation exceeds GENERATION_MAX"
        );
        let bits = index | (generation << Self::INDEX_BITS);
        W::from_u64(bits)
    }

    /// Construct a handle from raw index/generation values.
    ///
    /// `index` must be `<= INDEX_MAX` and `generation` must be
    /// `<= GENERATION_MAX`; both are debug-asserted.
    pub(crate) fn new(index: u64, generation: u64) -> Self {
        Self {
            packed: Self::pack(index, generation),
            _marker: PhantomData,
        }
    }

    /// The canonical null handle: index 0, generation 0.
    ///
    /// Never equal to any handle returned from a successful `alloc`.
    #[must_use]
    pub fn null() -> Self {
        Self::assert_bits_valid();
        Self {
            packed: W::ZERO,
            _marker: PhantomData,
        }
    }

    /// Build the handle stored at a vacated slot: generation 0 (vacant
    /// sentinel) with `index` repurposed as the free-list link.
    pub(crate) fn free_link(next: u64) -> Self {
        Self::new(next, 0)
    }

    /// The index sub-field.
    #[inline]
    #[must_use]
    pub fn index(&self) -> u64 {
        self.packed.to_u64() & Self::INDEX_MAX
    }

    /// The generation sub-field.
    #[inline]
    #[must_use]
    pub fn generation_value(&self) -> u64 {
        self.packed.to_u64() >> Self::INDEX_BITS
    }

    /// `true` iff this handle's generation is nonzero, i.e. it is not the
    /// free-list/null sentinel shape.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.generation_value() != 0
    }

    /// Advance a generation counter, skipping the value 0 on rollover so the
    /// null sentinel is never minted as a live generation.
    ///
    /// `g` must be in `[1, GENERATION_MAX]`.
    #[must_use]
    pub(crate) fn evolve(g: u64) -> u64 {
        debug_assert!((1..=Self::GENERATION_MAX).contains(&g));
        let next = (g + 1) & Self::GENERATION_MAX;
        next.max(1)
    }
}

impl<W: Word, const HANDLE_BITS: u32, const GEN_BITS: u32> PartialEq
    for Handle<W, HANDLE_BITS, GEN_BITS>
{
    fn eq(&self, other: &Self) -> bool {
        self.packed == other.packed
    }
}

impl<W: Word, const HANDLE_BITS: u32, const GEN_BITS: u32> Eq for Handle<W, HANDLE_BITS, GEN_BITS> {}

impl<W: Word, const HANDLE_BITS: u32, const GEN_BITS: u32> Default
    for Handle<W, HANDLE_BITS, GEN_BITS>
{
    fn default() -> Self {
        Self::null()
    }
}

impl<W: Word, const HANDLE_BITS: u32, const GEN_BITS: u32> fmt::Display
    for Handle<W, HANDLE_BITS, GEN_BITS>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Handle(index={}, generation={})",
            self.index(),
            self.generation_value()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type H = Handle<u32, 32, 16>;

    #[test]
    fn null_is_all_zero_and_invalid() {
        let h = H::null();
        assert_eq!(h.index(), 0);
        assert_eq!(h.generation_value(), 0);
        assert!(!h.is_valid());
    }

    #[test]
    fn new_round_trips_fields() {
        let h = H::new(7, 3);
        assert_eq!(h.index(), 7);
        assert_eq!(h.generation_value(), 3);
        assert!(h.is_valid());
    }

    #[test]
    fn equality_is_field_wise() {
        assert_eq!(H::new(1, 2), H::new(1, 2));
        assert_ne!(H::new(1, 2), H::new(1, 3));
        assert_ne!(H::new(1, 2), H::new(2, 2));
    }

    #[test]
    fn free_link_has_zero_generation() {
        let h = H::free_link(42);
        assert_eq!(h.index(), 42);
        assert_eq!(h.generation_value(), 0);
        assert!(!h.is_valid());
    }

    #[test]
    fn evolve_cycles_and_skips_zero() {
        assert_eq!(H::evolve(1), 2);
        assert_eq!(H::evolve(H::GENERATION_MAX), 1);
    }

    #[test]
    fn index_and_generation_max_for_16_8_split() {
        type H16 = Handle<u16, 16, 8>;
        assert_eq!(H16::INDEX_BITS, 8);
        assert_eq!(H16::INDEX_MAX, 255);
        assert_eq!(H16::GENERATION_MAX, 255);
    }

    #[test]
    fn smallest_widths_4_bit_handle() {
        // HandleBits=4 packed into a u8, GenerationBits=2 — spec.md S2/S3.
        type Tiny = Handle<u8, 4, 2>;
        assert_eq!(Tiny::INDEX_BITS, 2);
        assert_eq!(Tiny::INDEX_MAX, 3);
        assert_eq!(Tiny::GENERATION_MAX, 3);
        let h = Tiny::new(0, 1);
        assert_eq!(h.index(), 0);
        assert_eq!(h.generation_value(), 1);
    }

    #[test]
    fn display_format() {
        let h = H::new(5, 9);
        assert_eq!(format!("{h}"), "Handle(index=5, generation=9)");
    }
}
