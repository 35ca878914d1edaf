//! # Tree Walker
//!
//! A single depth-first scan over the page-table forest rooted at frame 0,
//! producing the three running results the frame allocator needs in one
//! pass: the first empty interior table, the highest-indexed frame in use,
//! and the leaf with maximum cyclic distance from the faulting page. A
//! second pass over the tree would be redundant and would double physical
//! reads, so every candidate is folded into one [`TraversalOutcome`].

use crate::phys::PhysicalMemory;
use log::trace;
use vmem_addresses::{FrameIndex, Geometry, Vpn};

/// An interior table with every cell zero: reclaimable without eviction.
#[derive(Copy, Clone, Debug)]
pub struct EmptyTable {
    pub frame: FrameIndex,
    pub parent_frame: FrameIndex,
    pub parent_slot: u64,
}

/// The resident leaf with maximum cyclic distance from the faulting page.
#[derive(Copy, Clone, Debug)]
pub struct FarthestLeaf {
    pub vpn: Vpn,
    pub frame: FrameIndex,
    pub parent_frame: FrameIndex,
    pub parent_slot: u64,
    distance: u64,
}

/// The three candidates produced by one DFS over the tree.
#[derive(Copy, Clone, Debug)]
pub struct TraversalOutcome {
    pub first_empty: Option<EmptyTable>,
    pub max_frame: FrameIndex,
    pub farthest_leaf: Option<FarthestLeaf>,
}

/// Walk the whole page-table tree from frame 0, looking for a reclamation
/// candidate for `faulting_vpn`. `protected_frame` is excluded from the
/// empty-table candidate: it's the interior table the translator is about
/// to link a new child into, and handing it back would self-evict the
/// frame the caller is currently writing to.
pub fn walk(
    phys: &impl PhysicalMemory,
    geometry: Geometry,
    faulting_vpn: Vpn,
    protected_frame: FrameIndex,
) -> TraversalOutcome {
    let mut outcome = TraversalOutcome {
        first_empty: None,
        max_frame: FrameIndex::ROOT,
        farthest_leaf: None,
    };
    visit(
        phys,
        geometry,
        faulting_vpn,
        protected_frame,
        FrameIndex::ROOT,
        0,
        FrameIndex::ROOT,
        0,
        0,
        &mut outcome,
    );
    outcome
}

#[allow(clippy::too_many_arguments)]
fn visit(
    phys: &impl PhysicalMemory,
    geometry: Geometry,
    faulting_vpn: Vpn,
    protected_frame: FrameIndex,
    frame: FrameIndex,
    depth: u32,
    parent_frame: FrameIndex,
    parent_slot: u64,
    path_prefix: u64,
    outcome: &mut TraversalOutcome,
) {
    trace!("visit: depth {depth} frame {frame:?} (parent {parent_frame:?} slot {parent_slot})");

    if frame.as_u64() > outcome.max_frame.as_u64() {
        outcome.max_frame = frame;
    }

    if depth == geometry.tables_depth() {
        let vpn = Vpn::new(path_prefix);
        let distance = faulting_vpn.cyclic_distance(vpn, geometry.vpn_space_size());
        let is_new_farthest = outcome
            .farthest_leaf
            .is_none_or(|current| distance > current.distance);
        trace!("visit: leaf vpn {vpn:?} frame {frame:?} distance {distance} (new farthest: {is_new_farthest})");
        if is_new_farthest {
            outcome.farthest_leaf = Some(FarthestLeaf {
                vpn,
                frame,
                parent_frame,
                parent_slot,
                distance,
            });
        }
        return;
    }

    let mut is_empty = true;
    for slot in 0..geometry.page_size() {
        let child = phys.read_word(frame.cell(slot, geometry));
        if child != 0 {
            is_empty = false;
            let next_path = path_prefix * geometry.page_size() + slot;
            trace!("visit: frame {frame:?} slot {slot} -> child {child}, recursing");
            visit(
                phys,
                geometry,
                faulting_vpn,
                protected_frame,
                FrameIndex::new(child),
                depth + 1,
                frame,
                slot,
                next_path,
                outcome,
            );
        }
    }

    // Root is never reclaimable; an already-found candidate keeps priority
    // (first encountered, in ascending-slot DFS order, wins).
    if is_empty && !frame.is_root() && frame != protected_frame && outcome.first_empty.is_none() {
        trace!("visit: frame {frame:?} is empty and reclaimable");
        outcome.first_empty = Some(EmptyTable {
            frame,
            parent_frame,
            parent_slot,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_support::SimulatedMemory;
    use vmem_addresses::VirtualAddress;

    #[test]
    fn empty_root_has_no_candidates_besides_itself() {
        let geometry = Geometry::new(4, 4, 8, 24).unwrap();
        let mut phys = SimulatedMemory::new(geometry);
        for slot in 0..geometry.page_size() {
            phys.write_word(slot, 0);
        }

        let outcome = walk(&phys, geometry, Vpn::new(0), FrameIndex::ROOT);
        assert!(outcome.first_empty.is_none());
        assert_eq!(outcome.max_frame, FrameIndex::ROOT);
        assert!(outcome.farthest_leaf.is_none());
    }

    #[test]
    fn finds_max_frame_and_farthest_leaf_after_several_mappings() {
        let geometry = Geometry::new(4, 2, 16, 24).unwrap();
        let mut phys = SimulatedMemory::new(geometry);
        let mut vm = crate::VirtualMemory::new(geometry, &mut phys);
        vm.initialize();
        for vpn in [0u64, 1, 2] {
            vm.write(VirtualAddress::new(vpn << geometry.offset_width()), 1)
                .unwrap();
        }

        let outcome = walk(&phys, geometry, Vpn::new(0), FrameIndex::ROOT);
        assert!(outcome.max_frame.as_u64() >= 3);
        let farthest = outcome.farthest_leaf.expect("at least one leaf resident");
        // With three resident pages (0, 1, 2) and a faulting vpn of 0, page 2
        // is farther than page 1 in a wrap-aware space this small.
        assert_eq!(farthest.vpn, Vpn::new(2));
    }
}
