//! A simulator wrapper

use std::path::Path;

use log::info;

use crate::config::HierarchyConfig;
use crate::error::SimulatorResult;
use crate::memory::hierarchy::TwoLevelCache;
use crate::memory::stats::RunStats;
use crate::memory::StorageInterface;
use crate::trace::{self, TraceRecord};

/// Options that do not affect the simulated results
#[derive(Clone, Copy, Debug, Default)]
pub struct RunPolicy {
    /// Print the supplementary counters after the run
    pub history: bool,
    /// Check L1/L2 inclusion after the run
    pub verify: bool,
}

/// Replay decoded operations through a memory hierarchy
pub fn run_trace(
    mem: &mut impl StorageInterface,
    operations: &[TraceRecord],
) -> RunStats {
    for op in operations {
        mem.access(op.address, op.access_type);
    }
    mem.get_stats()
}

/// Build the hierarchy described by `config`
/// and replay the operations through it
pub fn run_operations(
    config: &HierarchyConfig,
    operations: &[TraceRecord],
    policy: RunPolicy,
) -> SimulatorResult<RunStats> {
    let mut mem = TwoLevelCache::from_config(config)?;
    info!(
        "L1: {} sets x {} ways, L2: {} sets x {} ways, {:?}",
        mem.l1.num_sets(),
        mem.l1.ways(),
        mem.l2.num_sets(),
        mem.l2.ways(),
        mem.write_miss_policy()
    );

    let stats = run_trace(&mut mem, operations);

    if policy.verify {
        mem.verify_inclusion()?;
    }
    if policy.history {
        let history = mem.history();
        eprintln!("[HISTORY] # accesses = {}", operations.len());
        eprintln!("[HISTORY] L1 {:?}", history.l1);
        eprintln!("[HISTORY] L2 {:?}", history.l2);
        eprintln!(
            "[HISTORY] write-backs L1 -> L2 = {}, L2 -> memory = {}",
            history.l1_writebacks, history.l2_writebacks
        );
        eprintln!(
            "[HISTORY] back-invalidations = {}",
            history.back_invalidations
        );
        eprintln!("[HISTORY] total cycles = {:.0}", history.total_cycles);
    }

    Ok(stats)
}

/// Run simulation on the given trace file.
/// The configuration is checked before the trace is read,
/// and the whole trace is parsed before any access is simulated
pub fn run(
    config: &HierarchyConfig,
    trace_path: &Path,
    policy: RunPolicy,
) -> SimulatorResult<RunStats> {
    config.validate()?;

    let operations = trace::fetch_operations(trace_path)?;
    info!(
        "Loaded {} operations from {}",
        operations.len(),
        trace_path.display()
    );

    let stats = run_operations(config, &operations, policy)?;
    info!("{}", stats);
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SimulatorError, TraceError};
    use crate::memory::WriteMissPolicy;

    fn write_trace(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir()
            .join(format!("two-level-cache-sim-{}-{}", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    fn small_config() -> HierarchyConfig {
        HierarchyConfig {
            mem_cycles: 100,
            block_bits: 2,
            l1_size_bits: 10,
            l1_assoc_bits: 0,
            l1_cycles: 1,
            l2_size_bits: 12,
            l2_assoc_bits: 0,
            l2_cycles: 10,
            write_miss_policy: WriteMissPolicy::WriteAllocate,
        }
    }

    #[test]
    fn test_run() {
        let path = write_trace("ok.trace", "r 0x1000\nr 0x1000\nw 0x1002\n");
        let policy = RunPolicy { history: true, verify: true };
        let stats = run(&small_config(), &path, policy).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(stats.l1_miss_rate, 1.0 / 3.0);
        assert_eq!(stats.l2_miss_rate, 1.0);
        assert_eq!(stats.avg_access_time, 113.0 / 3.0);
        assert_eq!(
            stats.to_string(),
            "L1miss=0.333 L2miss=1.000 AccTimeAvg=37.667"
        );
    }

    #[test]
    fn test_malformed_trace_aborts() {
        let path = write_trace("bad.trace", "r 0x1000\nw\n");
        let result = run(&small_config(), &path, RunPolicy::default());
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            result,
            Err(SimulatorError::TraceError(TraceError::FormatError {
                line: 2,
                ..
            }))
        ));
    }

    #[test]
    fn test_bad_config_checked_before_trace() {
        let config = HierarchyConfig {
            l1_size_bits: 1,
            ..small_config()
        };
        // The trace file does not exist, the configuration is reported first
        let path = std::env::temp_dir().join("two-level-cache-sim-absent.trace");
        let result = run(&config, &path, RunPolicy::default());
        assert!(matches!(result, Err(SimulatorError::ConfigError(_))));
    }

    #[test]
    fn test_missing_trace_file() {
        let path = std::env::temp_dir().join("two-level-cache-sim-absent.trace");
        let result = run(&small_config(), &path, RunPolicy::default());
        assert!(matches!(
            result,
            Err(SimulatorError::TraceError(TraceError::FileReadError(..)))
        ));
    }

    #[test]
    fn test_empty_trace() {
        let stats =
            run_operations(&small_config(), &[], RunPolicy::default()).unwrap();
        assert_eq!(stats, RunStats::default());
    }
}
