//! Two-level write-back cache hierarchy

use log::{debug, trace};

use super::cache::{Cache, CachePolicy};
use super::stats::HierarchyHistory;
use super::{AccessType, StorageInterface, WriteMissPolicy};
use crate::config::HierarchyConfig;
use crate::error::MemoryError;
use crate::error::SimulatorResult;

/// An L1 and an L2 write-back cache in front of main memory.
/// A block evicted from L2 never stays valid in L1
pub struct TwoLevelCache {
    pub l1: Cache,
    pub l2: Cache,

    write_miss_policy: WriteMissPolicy,

    pub miss_penalty: u64,
    pub history: HierarchyHistory,
}

impl Default for TwoLevelCache {
    fn default() -> Self {
        let config = HierarchyConfig::default();
        Self::make(
            config.l1_policy(),
            config.l2_policy(),
            config.write_miss_policy,
            config.mem_cycles,
        )
    }
}

impl TwoLevelCache {
    pub fn make(
        l1_policy: CachePolicy,
        l2_policy: CachePolicy,
        write_miss_policy: WriteMissPolicy,
        miss_penalty: u64,
    ) -> Self {
        Self {
            l1: Cache::make(l1_policy),
            l2: Cache::make(l2_policy),
            write_miss_policy,
            miss_penalty,
            history: HierarchyHistory::default(),
        }
    }

    /// Validate the configuration and build the hierarchy it describes
    pub fn from_config(config: &HierarchyConfig) -> SimulatorResult<Self> {
        config.validate()?;
        Ok(Self::make(
            config.l1_policy(),
            config.l2_policy(),
            config.write_miss_policy,
            config.mem_cycles,
        ))
    }

    pub fn write_miss_policy(&self) -> WriteMissPolicy {
        self.write_miss_policy
    }

    /// Install a block into L2 and drop whatever it displaced from L1
    fn install_l2(&mut self, address: u64, dirty: bool) {
        let Some(evicted) = self.l2.install(address, dirty) else {
            return;
        };

        if evicted.dirty {
            self.history.l2_writebacks += 1;
        }
        if let Some(was_dirty) = self.l1.invalidate(evicted.address) {
            debug!(
                "L2 evicted {:#x}, invalidated in L1 (dirty = {})",
                evicted.address, was_dirty
            );
            self.history.back_invalidations += 1;
        }
    }

    /// Write a dirty L1 victim to L2.
    /// This is not a demand access, so no statistics are charged
    fn write_back(&mut self, address: u64) {
        self.history.l1_writebacks += 1;
        let hit = self.l2.lookup(address, AccessType::Write);
        debug!("L1 wrote back {:#x} (L2 hit = {})", address, hit);
        if !hit {
            self.install_l2(address, true);
        }
    }

    /// Every valid L1 block must be resident in L2
    pub fn verify_inclusion(&self) -> SimulatorResult<()> {
        for address in self.l1.resident_addresses() {
            if !self.l2.contains(address) {
                return Err(MemoryError::CacheInconsistency(
                    address,
                    "present in L1 but absent from L2".to_string(),
                )
                .into());
            }
        }
        Ok(())
    }
}

impl StorageInterface for TwoLevelCache {
    fn access(&mut self, address: u64, access_type: AccessType) {
        let is_write = access_type == AccessType::Write;

        // Every access pays the L1 latency
        self.history.charge(self.l1.policy.hit_latency);
        if self.l1.lookup(address, access_type) {
            trace!("{:?} {:#x}: L1 hit", access_type, address);
            self.history.l1.record_hit();
            return;
        }
        self.history.l1.record_miss();

        // An L1 miss always probes L2
        self.history.charge(self.l2.policy.hit_latency);

        if is_write && self.write_miss_policy == WriteMissPolicy::WriteNoAllocate {
            // Write around both levels
            if self.l2.lookup(address, AccessType::Write) {
                trace!("{:?} {:#x}: L2 hit, no allocate", access_type, address);
                self.history.l2.record_hit();
            } else {
                trace!("{:?} {:#x}: L2 miss, no allocate", access_type, address);
                self.history.l2.record_miss();
                self.history.charge(self.miss_penalty);
            }
            return;
        }

        if self.l2.lookup(address, AccessType::Read) {
            trace!("{:?} {:#x}: L2 hit", access_type, address);
            self.history.l2.record_hit();
        } else {
            trace!("{:?} {:#x}: L2 miss", access_type, address);
            self.history.l2.record_miss();
            self.history.charge(self.miss_penalty);
            self.install_l2(address, false);
        }

        if let Some(evicted) = self.l1.install(address, is_write) {
            if evicted.dirty {
                self.write_back(evicted.address);
            }
        }
    }

    fn history(&self) -> &HierarchyHistory {
        &self.history
    }
}
