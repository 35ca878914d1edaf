//! # Virtual Memory Addresses
//!
//! Strongly typed geometry and address wrappers for the demand-paged
//! virtual memory translator in `vmem-core`.
//!
//! ## Overview
//!
//! [`Geometry`] validates and carries the page-table shape (offset width,
//! table depth, frame count, physical address width) that the rest of the
//! system is parameterized over. [`VirtualAddress`] and [`FrameIndex`]
//! keep virtual addresses and physical frame indices from being mixed up
//! at a call site, and [`Vpn`] carries the wrap-aware cyclic distance used
//! by the eviction policy.

#![cfg_attr(not(any(test, doctest)), no_std)]

mod addr;
mod geometry;
mod vpn;

pub use addr::{FrameIndex, VirtualAddress};
pub use geometry::{Geometry, GeometryError};
pub use vpn::Vpn;
