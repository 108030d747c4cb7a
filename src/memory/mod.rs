//! Memory hierarchy structure

pub mod address;
pub mod cache;
pub mod hierarchy;
pub mod set_store;
pub mod stats;

use stats::HierarchyHistory;
use stats::RunStats;

/// Interface of a memory hierarchy that trace operations are replayed through
pub trait StorageInterface {
    /// Perform one demand access and account for its cost
    fn access(&mut self, address: u64, access_type: AccessType);

    fn history(&self) -> &HierarchyHistory;

    fn get_stats(&self) -> RunStats {
        self.history().finalize()
    }
}

/// Reference: <https://inst.eecs.berkeley.edu/~cs61c/su20/pdfs/lectures/lec15.pdf>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WriteMissPolicy {
    #[default]
    WriteAllocate,
    WriteNoAllocate,
}

impl WriteMissPolicy {
    /// Zero selects no-write-allocate, anything else write-allocate
    pub fn from_flag(flag: u32) -> Self {
        if flag == 0 {
            WriteMissPolicy::WriteNoAllocate
        } else {
            WriteMissPolicy::WriteAllocate
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    Read,
    Write,
}
