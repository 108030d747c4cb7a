//! Access counters and timing statistics

use std::fmt;

/// Demand accesses seen by one cache level
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct CacheHistory {
    pub num_access: u64,
    pub num_miss: u64,
}

impl CacheHistory {
    pub fn record_hit(&mut self) {
        self.num_access += 1;
    }

    pub fn record_miss(&mut self) {
        self.num_access += 1;
        self.num_miss += 1;
    }

    pub fn get_miss_rate(&self) -> f64 {
        if self.num_access == 0 {
            return 0.0;
        }
        self.num_miss as f64 / self.num_access as f64
    }
}

/// Running statistics of one trace replay
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct HierarchyHistory {
    pub l1: CacheHistory,
    pub l2: CacheHistory,

    /// Elapsed cycles summed over every access
    pub total_cycles: f64,

    /// Dirty L1 victims written to L2
    pub l1_writebacks: u64,
    /// Dirty L2 victims dropped to memory
    pub l2_writebacks: u64,
    /// L1 lines invalidated because L2 evicted them
    pub back_invalidations: u64,
}

impl HierarchyHistory {
    pub fn charge(&mut self, cycles: u64) {
        self.total_cycles += cycles as f64;
    }

    pub fn get_amat(&self) -> f64 {
        if self.l1.num_access == 0 {
            return 0.0;
        }
        self.total_cycles / self.l1.num_access as f64
    }

    pub fn finalize(&self) -> RunStats {
        RunStats {
            l1_miss_rate: self.l1.get_miss_rate(),
            l2_miss_rate: self.l2.get_miss_rate(),
            avg_access_time: self.get_amat(),
        }
    }
}

/// The externally reported results of a run
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct RunStats {
    pub l1_miss_rate: f64,
    pub l2_miss_rate: f64,
    pub avg_access_time: f64,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L1miss={:.3} L2miss={:.3} AccTimeAvg={:.3}",
            self.l1_miss_rate, self.l2_miss_rate, self.avg_access_time
        )
    }
}
