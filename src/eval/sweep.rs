use std::path::Path;

use cache_lib::config::HierarchyConfig;
use cache_lib::memory::WriteMissPolicy;
use cache_lib::run_wrapper::{run_operations, RunPolicy};
use cache_lib::trace::{base_name, fetch_operations};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let param_tokens: Vec<String> = std::env::args().collect();
    let trace_path =
        param_tokens.get(1).ok_or("You should specify exactly one trace file")?;
    let trace_base_name = base_name(Path::new(trace_path))
        .ok_or("The trace path has no file name")?;
    let output_path = format!("eval/sweep_{}.csv", trace_base_name);

    // Parse once, replay for every configuration
    let operations = fetch_operations(Path::new(trace_path))?;

    std::fs::create_dir_all("eval")?;
    let mut writer = csv::Writer::from_path(&output_path)?;
    writer.write_record([
        "L1 size (log2)",
        "L1 assoc (log2)",
        "Write allocate",
        "L1 miss rate",
        "L2 miss rate",
        "Avg access time",
    ])?;

    // L1 sizes: 1KB to 64KB, associativity: 1 to 8 ways,
    // in front of the default L2
    for l1_size_bits in 10..=16 {
        for l1_assoc_bits in 0..=3 {
            for write_miss_policy in
                [WriteMissPolicy::WriteAllocate, WriteMissPolicy::WriteNoAllocate]
            {
                let config = HierarchyConfig {
                    l1_size_bits,
                    l1_assoc_bits,
                    write_miss_policy,
                    ..Default::default()
                };
                let stats =
                    run_operations(&config, &operations, RunPolicy::default())?;
                writer.write_record([
                    l1_size_bits.to_string(),
                    l1_assoc_bits.to_string(),
                    (write_miss_policy == WriteMissPolicy::WriteAllocate)
                        .to_string(),
                    format!("{:.3}", stats.l1_miss_rate),
                    format!("{:.3}", stats.l2_miss_rate),
                    format!("{:.3}", stats.avg_access_time),
                ])?;
            }
        }
    }
    writer.flush()?;

    eprintln!("Wrote {}", output_path);
    Ok(())
}
