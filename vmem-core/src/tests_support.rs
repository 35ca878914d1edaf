//! Test-only [`PhysicalMemory`] backed by plain host memory, in the spirit
//! of `kernel-vmem`'s `TestPhys`: a flat word array for resident frames plus
//! a swap file for evicted pages, so eviction round-trips real data instead
//! of quietly handing back zeros.

use crate::phys::PhysicalMemory;
use std::collections::HashMap;
use vmem_addresses::{FrameIndex, Geometry, Vpn};

pub struct SimulatedMemory {
    geometry: Geometry,
    frames: Vec<u64>,
    swap: HashMap<Vpn, Vec<u64>>,
}

impl SimulatedMemory {
    pub fn new(geometry: Geometry) -> Self {
        let words = geometry.num_frames() * geometry.page_size();
        Self {
            geometry,
            frames: vec![0; words as usize],
            swap: HashMap::new(),
        }
    }
}

impl PhysicalMemory for SimulatedMemory {
    fn read_word(&self, address: u64) -> u64 {
        self.frames[address as usize]
    }

    fn write_word(&mut self, address: u64, value: u64) {
        self.frames[address as usize] = value;
    }

    fn evict(&mut self, frame: FrameIndex, vpn: Vpn) {
        let page_size = self.geometry.page_size() as usize;
        let base = (frame.as_u64() * self.geometry.page_size()) as usize;
        let page = self.frames[base..base + page_size].to_vec();
        self.swap.insert(vpn, page);
    }

    fn restore(&mut self, frame: FrameIndex, vpn: Vpn) {
        let page_size = self.geometry.page_size() as usize;
        let base = (frame.as_u64() * self.geometry.page_size()) as usize;
        match self.swap.remove(&vpn) {
            Some(page) => self.frames[base..base + page_size].copy_from_slice(&page),
            None => self.frames[base..base + page_size].fill(0),
        }
    }
}
