//! # Translator
//!
//! Walks the page-table levels top-down from frame 0, allocating and
//! zero-filling or restoring a frame on each miss, per spec §4.4.

use crate::alloc::get_new_frame;
use crate::phys::PhysicalMemory;
use log::trace;
use vmem_addresses::{FrameIndex, Geometry, VirtualAddress};

/// Resolve `vaddr` to a physical word address, creating any missing
/// interior tables and the leaf page along the way.
pub fn physical_of(
    phys: &mut impl PhysicalMemory,
    geometry: Geometry,
    vaddr: VirtualAddress,
) -> u64 {
    let vpn = vaddr.vpn(geometry);
    let mut frame = FrameIndex::ROOT;

    for level in 0..geometry.tables_depth() {
        let slot = geometry.index_at_level(vpn.as_u64(), level);
        let cell = frame.cell(slot, geometry);
        let mut child = phys.read_word(cell);

        if child == 0 {
            let new_frame = get_new_frame(phys, geometry, vaddr, frame);
            phys.write_word(cell, new_frame.as_u64());

            if level + 1 < geometry.tables_depth() {
                trace!("physical_of: zero-filling new interior frame {new_frame:?}");
                for slot in 0..geometry.page_size() {
                    phys.write_word(new_frame.cell(slot, geometry), 0);
                }
            } else {
                trace!("physical_of: restoring leaf frame {new_frame:?} for vpn {vpn:?}");
                phys.restore(new_frame, vpn);
            }
            child = new_frame.as_u64();
        }

        trace!("physical_of: level {level} slot {slot} -> frame {child}");
        frame = FrameIndex::new(child);
    }

    frame.cell(vaddr.page_offset(geometry), geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_support::SimulatedMemory;

    #[test]
    fn leaf_frame_is_restored_not_left_uninitialized() {
        let geometry = Geometry::new(4, 2, 16, 24).unwrap();
        let mut phys = SimulatedMemory::new(geometry);
        for slot in 0..geometry.page_size() {
            phys.write_word(slot, 0);
        }

        let addr = physical_of(&mut phys, geometry, VirtualAddress::new(0));
        assert_eq!(phys.read_word(addr), 0);
    }
}
