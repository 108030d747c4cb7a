//! Run parameters of a two-level hierarchy

use crate::error::ConfigError;
use crate::memory::cache::CachePolicy;
use crate::memory::WriteMissPolicy;

/// The nine parameters of a simulation run.
/// Sizes, block size and associativities are log2 values
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HierarchyConfig {
    pub mem_cycles: u64,
    pub block_bits: usize,

    pub l1_size_bits: usize,
    pub l1_assoc_bits: usize,
    pub l1_cycles: u64,

    pub l2_size_bits: usize,
    pub l2_assoc_bits: usize,
    pub l2_cycles: u64,

    pub write_miss_policy: WriteMissPolicy,
}

impl Default for HierarchyConfig {
    /// 16 KiB direct-mapped L1, 128 KiB 8-way L2,
    /// 64-byte blocks and a 100-cycle memory
    fn default() -> Self {
        Self {
            mem_cycles: 100,
            block_bits: 6,
            l1_size_bits: 14,
            l1_assoc_bits: 0,
            l1_cycles: 1,
            l2_size_bits: 17,
            l2_assoc_bits: 3,
            l2_cycles: 8,
            write_miss_policy: WriteMissPolicy::WriteAllocate,
        }
    }
}

impl HierarchyConfig {
    pub fn l1_policy(&self) -> CachePolicy {
        CachePolicy::make(
            self.l1_size_bits,
            self.block_bits,
            self.l1_assoc_bits,
            self.l1_cycles,
        )
    }

    pub fn l2_policy(&self) -> CachePolicy {
        CachePolicy::make(
            self.l2_size_bits,
            self.block_bits,
            self.l2_assoc_bits,
            self.l2_cycles,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.l1_policy().validate("L1")?;
        self.l2_policy().validate("L2")?;
        Ok(())
    }
}
