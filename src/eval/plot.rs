use std::path::Path;

use plotters::prelude::*;

use cache_lib::config::HierarchyConfig;
use cache_lib::run_wrapper::{run_operations, RunPolicy};
use cache_lib::trace::{base_name, fetch_operations};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let param_tokens: Vec<String> = std::env::args().collect();
    let trace_path =
        param_tokens.get(1).ok_or("You should specify exactly one trace file")?;
    let operations = fetch_operations(Path::new(trace_path))?;

    // Plot line series for each L1 associativity
    // For a fixed associativity, vary the L1 size
    // Performance metric: average access time
    // L1 sizes: 1KB to 64KB
    let l1_sizes: Vec<usize> = (10..=16).collect();
    // Associativity: 1, 2, 4, 8 ways
    let l1_assocs: Vec<usize> = (0..=3).collect();

    // Propagate the data
    let mut data: Vec<Vec<(usize, f64)>> = vec![vec![]; l1_assocs.len()];
    let mut y_max: f64 = 0.;
    for (i, l1_assoc_bits) in l1_assocs.iter().enumerate() {
        for l1_size_bits in l1_sizes.iter() {
            let config = HierarchyConfig {
                l1_size_bits: *l1_size_bits,
                l1_assoc_bits: *l1_assoc_bits,
                ..Default::default()
            };
            let stats =
                run_operations(&config, &operations, RunPolicy::default())?;
            data[i].push((*l1_size_bits, stats.avg_access_time));
            y_max = y_max.max(stats.avg_access_time);
        }
    }
    // Plot the data
    let trace_base_name = base_name(Path::new(trace_path))
        .ok_or("The trace path has no file name")?;
    let plot_title = format!("Average access time: {}", trace_base_name);
    let output_path = format!("eval/plot_{}.svg", trace_base_name);
    std::fs::create_dir_all("eval")?;

    let root =
        SVGBackend::new(output_path.as_str(), (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut ctx = ChartBuilder::on(&root)
        .caption(plot_title.as_str(), ("sans-serif", 40).into_font())
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(10..16, 0.0..y_max * 1.1)?;
    ctx.configure_mesh()
        .x_desc("L1 size (log2 bytes)")
        .y_desc("Cycles")
        .draw()?;

    for (i, l1_assoc_bits) in l1_assocs.iter().enumerate() {
        let series = data[i].iter().map(|(x, y)| (*x as i32, *y));
        let label = format!("{} way(s)", 1usize << *l1_assoc_bits);
        let color = Palette99::pick(i).to_rgba();
        ctx.draw_series(LineSeries::new(series, color))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color)
            });
    }

    ctx.configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;

    eprintln!("Wrote {}", output_path);
    Ok(())
}
