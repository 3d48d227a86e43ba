use projectile_sim::{Histogram, LaunchReport};

const BAR_WIDTH: usize = 40;

pub fn print_launch(report: &LaunchReport) {
    println!(
        "  {} fired {} projectiles: mean distance {:.2}m ({} recorded)",
        report.launcher_name, report.sample_size, report.mean, report.recorded
    );
}

pub fn print_histogram(title: &str, hist: &Histogram) {
    println!("\n{title}");
    if hist.is_empty() {
        println!("  No data available");
        return;
    }
    println!(
        "  n = {}, μ = {:.2}m, σ = {:.2}",
        hist.count, hist.mean, hist.std_dev
    );
    let max = hist.max_count().max(1);
    for bin in &hist.bins {
        let bar = bin.count * BAR_WIDTH / max;
        println!(
            "  {:>13} | {:<width$} {}",
            bin.label(),
            "#".repeat(bar),
            bin.count,
            width = BAR_WIDTH
        );
    }
}

pub fn print_summary_row(sample_size: usize, hist: &Histogram) {
    let mode = hist
        .mode_bin()
        .map(|b| b.label())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "  n = {:>3}  batches = {:>6}  μ = {:>8.3}m  σ = {:>7.3}  bins = {:>4}  mode = {}",
        sample_size,
        hist.count,
        hist.mean,
        hist.std_dev,
        hist.bins.len(),
        mode
    );
}
