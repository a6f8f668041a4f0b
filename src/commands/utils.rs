use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::Path;

/// Validate a report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)
        .with_context(|| format!("Invalid report: {}", file_path.display()))?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Class: {}", report.class_id);
    println!("  Methods: {}", report.flat.len());
    println!("  Total Calls: {}", report.total_calls());
    println!("  Total Time: {:.3}s", report.total_time());
    println!("  Hot Paths: {}", report.hot_paths.len());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Proxy Profiler Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  class_id: string         - Profiled class identity");
        println!("  flat: array              - Per-method statistics, by name");
        println!("    method: string         - Method name");
        println!("    calls: number          - Number of calls");
        println!("    total_time: number     - Total seconds");
        println!("    avg_time: number       - Mean seconds per call");
        println!("  tree: array              - Call tree in pre-order");
        println!("    level: number          - Depth from the root");
        println!("    method: string         - Method name or '(body)'");
        println!("    time: number           - Total seconds");
        println!("    calls: number          - Number of calls");
        println!("    percent: number        - Share of sibling time");
        println!("  hot_paths: array         - Paths with the most self time");
        println!("    stack: string          - Collapsed stack");
        println!("    micros: number         - Self time in microseconds");
        println!("    percentage: number     - Percentage of total time");
        println!("  generated_at: string     - RFC 3339 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Proxy Profiler v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Per-class method call profiling with flat and call-tree reports.");
}
