use std::path::PathBuf;

use clap::Parser;

use crate::config::HierarchyConfig;
use crate::memory::WriteMissPolicy;
use crate::run_wrapper::RunPolicy;

/// Two-level write-back cache hierarchy simulator.
/// Sizes, block size and associativities are given as log2 values.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct SimArgs {
    /// Path to the memory access trace
    pub trace_file: PathBuf,

    /// Main memory access time in cycles
    #[arg(long)]
    pub mem_cyc: u64,

    /// Block size, log2 of bytes
    #[arg(long)]
    pub bsize: usize,

    /// L1 size, log2 of bytes
    #[arg(long)]
    pub l1_size: usize,

    /// L2 size, log2 of bytes
    #[arg(long)]
    pub l2_size: usize,

    /// L1 associativity, log2 of ways
    #[arg(long)]
    pub l1_assoc: usize,

    /// L2 associativity, log2 of ways
    #[arg(long)]
    pub l2_assoc: usize,

    /// L1 access time in cycles
    #[arg(long)]
    pub l1_cyc: u64,

    /// L2 access time in cycles
    #[arg(long)]
    pub l2_cyc: u64,

    /// Write-miss policy. 0: no-write-allocate, otherwise write-allocate
    #[arg(long)]
    pub wr_alloc: u32,

    /// Print per-level counters after simulation
    #[arg(long)]
    pub history: bool,

    /// Check that every L1 block is present in L2 after simulation
    #[arg(long)]
    pub verify: bool,
}

impl SimArgs {
    pub fn config(&self) -> HierarchyConfig {
        HierarchyConfig {
            mem_cycles: self.mem_cyc,
            block_bits: self.bsize,
            l1_size_bits: self.l1_size,
            l1_assoc_bits: self.l1_assoc,
            l1_cycles: self.l1_cyc,
            l2_size_bits: self.l2_size,
            l2_assoc_bits: self.l2_assoc,
            l2_cycles: self.l2_cyc,
            write_miss_policy: WriteMissPolicy::from_flag(self.wr_alloc),
        }
    }

    pub fn policy(&self) -> RunPolicy {
        RunPolicy {
            history: self.history,
            verify: self.verify,
        }
    }
}
