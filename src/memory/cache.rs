//! Cache implementation

use super::address::Geometry;
use super::set_store::{Line, SetStore};
use super::AccessType;
use crate::error::ConfigError;

/// Geometries holding more lines than this are rejected
pub const MAX_LINE_BITS: usize = 24;

/// A valid line pushed out of a cache by an install
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvictedBlock {
    pub dirty: bool,
    /// Block-aligned address of the evicted line
    pub address: u64,
}

/// One level of the hierarchy
pub struct Cache {
    pub policy: CachePolicy,

    geometry: Geometry,
    store: SetStore,
}

impl Cache {
    pub fn make(policy: CachePolicy) -> Self {
        assert!(policy.is_valid());

        let geometry = Geometry::make(policy.block_bits, policy.get_set_bits());
        let store = SetStore::make(geometry.num_sets(), policy.get_ways());
        Self { policy, geometry, store }
    }

    pub fn get_set(&self, address: u64) -> usize {
        self.geometry.get_set(address)
    }

    pub fn get_tag(&self, address: u64) -> u64 {
        self.geometry.get_tag(address)
    }

    pub fn get_address(&self, tag: u64, set: usize) -> u64 {
        self.geometry.get_address(tag, set)
    }

    pub fn num_sets(&self) -> usize {
        self.store.num_sets()
    }

    pub fn ways(&self) -> usize {
        self.store.ways()
    }

    /// Access the block holding `address`.
    /// On a hit the line is refreshed, and marked dirty on writes
    pub fn lookup(&mut self, address: u64, access_type: AccessType) -> bool {
        let (set, tag) = (self.get_set(address), self.get_tag(address));
        self.store.touch(set, tag, access_type)
    }

    /// Check residency without touching the line
    pub fn contains(&self, address: u64) -> bool {
        self.get_line(address).is_some()
    }

    pub fn get_line(&self, address: u64) -> Option<&Line> {
        let (set, tag) = (self.get_set(address), self.get_tag(address));
        self.store
            .find(set, tag)
            .map(|way| self.store.get_line(set, way))
    }

    /// Install the block holding `address`, returning
    /// the valid block it displaced
    pub fn install(&mut self, address: u64, dirty: bool) -> Option<EvictedBlock> {
        let (set, tag) = (self.get_set(address), self.get_tag(address));
        debug_assert!(self.store.find(set, tag).is_none());

        self.store.install(set, tag, dirty).map(|line| EvictedBlock {
            dirty: line.dirty,
            address: self.get_address(line.tag, set),
        })
    }

    /// Drop the block holding `address`.
    /// Returns whether it was dirty, or `None` if it was not cached
    pub fn invalidate(&mut self, address: u64) -> Option<bool> {
        let (set, tag) = (self.get_set(address), self.get_tag(address));
        self.store.invalidate(set, tag)
    }

    /// Block addresses of every valid line
    pub fn resident_addresses(&self) -> Vec<u64> {
        self.store
            .valid_lines()
            .map(|(set, line)| self.get_address(line.tag, set))
            .collect()
    }
}

/// Geometry and latency of one cache level.
/// Sizes are given as log2 of their byte/way counts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CachePolicy {
    pub size_bits: usize,
    pub block_bits: usize,
    pub assoc_bits: usize,

    pub hit_latency: u64,
}

impl Default for CachePolicy {
    /// 16 KiB direct-mapped cache with 64-byte blocks
    fn default() -> Self {
        Self::make(14, 6, 0, 1)
    }
}

impl CachePolicy {
    pub fn make(
        size_bits: usize,
        block_bits: usize,
        assoc_bits: usize,
        hit_latency: u64,
    ) -> Self {
        Self {
            size_bits,
            block_bits,
            assoc_bits,
            hit_latency,
        }
    }

    pub fn get_set_bits(&self) -> usize {
        self.size_bits - self.block_bits - self.assoc_bits
    }

    pub fn get_ways(&self) -> usize {
        1 << self.assoc_bits
    }

    pub fn get_num_sets(&self) -> usize {
        1 << self.get_set_bits()
    }

    /// Check the geometry of the level named `level`
    pub fn validate(&self, level: &'static str) -> Result<(), ConfigError> {
        // The cache must hold at least one set
        if self.size_bits < self.block_bits + self.assoc_bits {
            return Err(ConfigError::SetBitsUnderflow {
                level,
                size_bits: self.size_bits,
                block_bits: self.block_bits,
                assoc_bits: self.assoc_bits,
            });
        }
        let line_bits = self.size_bits - self.block_bits;
        if line_bits > MAX_LINE_BITS {
            return Err(ConfigError::TooManyLines {
                level,
                line_bits,
                max_bits: MAX_LINE_BITS,
            });
        }
        // Tags need at least one address bit
        if self.block_bits + self.get_set_bits() >= 64 {
            return Err(ConfigError::AddressBitsExhausted {
                level,
                block_bits: self.block_bits,
                set_bits: self.get_set_bits(),
            });
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate("cache").is_ok()
    }
}
