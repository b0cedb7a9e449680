//! A generation-tracked slotmap.
//!
//! [`Slotmap`](crate::slotmap::Slotmap) hands out opaque `(index,
//! generation)` [`Handle`](crate::handle::Handle)s to values stored in
//! contiguous, index-addressable slots. Handles stay valid across unrelated
//! insertions and removals and detect use-after-free once a slot has been
//! reused — the generation counter changes every time a slot is recycled, so
//! a stale handle never resolves to someone else's value.
//!
//! An optional jump-count [`SkipField`](crate::skipfield::SkipField) (the
//! [`RunLengthSkipField`](crate::skipfield::RunLengthSkipField) variant)
//! lets filtered iteration skip whole runs of vacated slots in O(1) per
//! step, regardless of how many free slots lie between live ones.
//!
//! See `examples/demo.rs` for an end-to-end walkthrough.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod handle;
pub mod iter;
pub mod skipfield;
pub mod slotmap;
pub mod storage;
pub mod word;

pub use config::SlotmapConfig;
pub use error::SlotMapError;
pub use handle::Handle;
pub use iter::{FilterIter, FilterIterMut, Iter, IterMut};
pub use skipfield::{NullSkipField, RunLengthSkipField, SkipField};
pub use slotmap::Slotmap;
pub use word::Word;
