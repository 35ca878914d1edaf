//! # vmem-core
//!
//! A hierarchical demand-paged virtual memory translator over a simulated
//! physical RAM. This crate does not own or implement physical memory
//! itself — see [`PhysicalMemory`] — only the translation, fault handling,
//! and frame reclamation logic on top of it.

#![cfg_attr(not(any(test, doctest)), no_std)]

mod alloc;
mod phys;
mod translate;
mod walk;

#[cfg(test)]
mod tests_support;

pub use phys::PhysicalMemory;
pub use vmem_addresses::{FrameIndex, Geometry, GeometryError, VirtualAddress, Vpn};

use log::trace;
use thiserror::Error;
use translate::physical_of;

/// The one external error condition this crate can raise at the API
/// boundary: every other fault (missing table, eviction, ...) is handled
/// internally and never surfaces to the caller.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum TranslationError {
    /// `vaddr` does not fit within the [`Geometry`]'s virtual address width.
    #[error("virtual address {0:#x} is out of range for this geometry")]
    AddressOutOfRange(u64),
}

/// A virtual address space backed by `M`, demand-paged against a
/// hierarchical, multi-level page table stored inside `M` itself.
pub struct VirtualMemory<'m, M: PhysicalMemory> {
    geometry: Geometry,
    phys: &'m mut M,
}

impl<'m, M: PhysicalMemory> VirtualMemory<'m, M> {
    /// Bind a translator to `phys` for the given `geometry`. Does not touch
    /// `phys`; call [`VirtualMemory::initialize`] before the first access.
    pub const fn new(geometry: Geometry, phys: &'m mut M) -> Self {
        Self { geometry, phys }
    }

    /// Zero the root table (frame 0), discarding any previous mappings.
    pub fn initialize(&mut self) {
        trace!("VirtualMemory::initialize: zeroing root frame");
        for slot in 0..self.geometry.page_size() {
            self.phys.write_word(FrameIndex::ROOT.cell(slot, self.geometry), 0);
        }
    }

    /// Read the word stored at `vaddr`, faulting in any missing tables or
    /// leaf page along the way.
    ///
    /// # Errors
    /// Returns [`TranslationError::AddressOutOfRange`] if `vaddr` does not
    /// fit within this geometry's virtual address width.
    pub fn read(&mut self, vaddr: VirtualAddress) -> Result<u64, TranslationError> {
        self.check_range(vaddr)?;
        let address = physical_of(self.phys, self.geometry, vaddr);
        Ok(self.phys.read_word(address))
    }

    /// Write `value` to the word stored at `vaddr`, faulting in any missing
    /// tables or leaf page along the way.
    ///
    /// # Errors
    /// Returns [`TranslationError::AddressOutOfRange`] if `vaddr` does not
    /// fit within this geometry's virtual address width.
    pub fn write(&mut self, vaddr: VirtualAddress, value: u64) -> Result<(), TranslationError> {
        self.check_range(vaddr)?;
        let address = physical_of(self.phys, self.geometry, vaddr);
        self.phys.write_word(address, value);
        Ok(())
    }

    /// The [`Geometry`] this translator was constructed with.
    #[must_use]
    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    const fn check_range(&self, vaddr: VirtualAddress) -> Result<(), TranslationError> {
        if vaddr.in_range(self.geometry) {
            Ok(())
        } else {
            Err(TranslationError::AddressOutOfRange(vaddr.as_u64()))
        }
    }
}
