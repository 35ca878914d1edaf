//! # Physical Memory Interface
//!
//! The page-table forest lives inside physical memory, but this crate
//! deliberately does not implement physical memory itself — that's the
//! spec's "external collaborator" boundary. Callers provide an
//! implementation of [`PhysicalMemory`]; the translator only ever talks to
//! it through these four primitives.

use vmem_addresses::{FrameIndex, Vpn};

/// Word-granular physical memory, plus the two page-swap primitives the
/// frame allocator needs.
///
/// Implementations are assumed infallible (spec §7): every address this
/// crate passes in is guaranteed in range for the [`Geometry`](vmem_addresses::Geometry)
/// the implementation was paired with.
pub trait PhysicalMemory {
    /// Read one word at `address`.
    fn read_word(&self, address: u64) -> u64;

    /// Write one word at `address`.
    fn write_word(&mut self, address: u64, value: u64);

    /// Copy the `PAGE_SIZE` words of `frame` out to the backing store
    /// indexed by `vpn`, freeing the frame for reuse.
    fn evict(&mut self, frame: FrameIndex, vpn: Vpn);

    /// Load `vpn`'s previously evicted contents (or zero, if `vpn` was
    /// never evicted) into `frame`.
    fn restore(&mut self, frame: FrameIndex, vpn: Vpn);
}
