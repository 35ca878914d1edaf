//! # Frame Allocator
//!
//! `get_new_frame` ranks the three reclamation strategies from spec §4.3,
//! first match wins: reuse an empty interior table, claim a never-used
//! frame, or evict the farthest resident leaf. The tree walker ([`walk`])
//! supplies all three candidates from a single pass.

use crate::phys::PhysicalMemory;
use crate::walk::walk;
use log::{debug, warn};
use vmem_addresses::{FrameIndex, Geometry, VirtualAddress};

/// Acquire a frame for a new mapping.
///
/// `parent_frame` is the interior table the translator is about to link
/// the returned frame into; it is never returned (self-eviction safety).
/// Given a [`Geometry`](vmem_addresses::Geometry) validated by
/// [`Geometry::new`](vmem_addresses::Geometry::new), at least one of the
/// three strategies always succeeds.
pub fn get_new_frame(
    phys: &mut impl PhysicalMemory,
    geometry: Geometry,
    vaddr: VirtualAddress,
    parent_frame: FrameIndex,
) -> FrameIndex {
    let faulting_vpn = vaddr.vpn(geometry);
    let outcome = walk(phys, geometry, faulting_vpn, parent_frame);

    if let Some(empty) = outcome.first_empty {
        debug!("get_new_frame: reusing empty table {:?}", empty.frame);
        phys.write_word(empty.parent_frame.cell(empty.parent_slot, geometry), 0);
        return empty.frame;
    }

    if outcome.max_frame.as_u64() + 1 < geometry.num_frames() {
        let frame = FrameIndex::new(outcome.max_frame.as_u64() + 1);
        debug!("get_new_frame: claiming never-used frame {frame:?}");
        return frame;
    }

    let farthest = outcome
        .farthest_leaf
        .expect("a validated Geometry always leaves at least one resident leaf to evict");
    let leaf_cell = farthest.parent_frame.cell(farthest.parent_slot, geometry);
    warn!(
        "get_new_frame: evicting vpn {:?} from frame {:?}",
        farthest.vpn, farthest.frame
    );
    phys.evict(farthest.frame, farthest.vpn);
    phys.write_word(leaf_cell, 0);
    farthest.frame
}
