//! Demo command implementation.
//!
//! The demo command:
//! 1. Wraps two instances of a sample workload
//! 2. Runs nested method calls on both
//! 3. Prints flat and tree statistics
//! 4. Optionally writes a JSON report and collapsed stacks

use crate::aggregator::build_collapsed_stacks;
use crate::output::{render_flat, render_tree, write_collapsed, write_report, ProfileReport};
use crate::profile::ProfileRegistry;
use crate::proxy::Profiled;
use crate::utils::config::DEFAULT_TOP_PATHS;
use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

/// Arguments for the demo command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct DemoArgs {
    /// Inner loop iterations per top-level call
    pub rounds: u32,

    /// Base sleep unit for the workload
    pub unit: Duration,

    /// Output path for JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Output path for collapsed stacks (optional)
    pub output_collapsed: Option<PathBuf>,

    /// Number of hot paths to include in the report
    pub top_paths: usize,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            rounds: 10,
            unit: Duration::from_millis(10),
            output_json: None,
            output_collapsed: None,
            top_paths: DEFAULT_TOP_PATHS,
        }
    }
}

/// Validate demo arguments
///
/// **Public** - called before execution
pub fn validate_args(args: &DemoArgs) -> Result<()> {
    if args.rounds == 0 {
        bail!("Rounds must be at least 1");
    }
    if args.unit > Duration::from_secs(1) {
        bail!("Sleep unit {:?} is too long for a demo", args.unit);
    }
    Ok(())
}

/// Sample class whose methods call each other
#[derive(Debug)]
pub struct SampleWorkload {
    x: i64,
    step: u32,
    rounds: u32,
    unit: Duration,
}

impl SampleWorkload {
    pub fn new(x: i64, rounds: u32, unit: Duration) -> Self {
        Self { x, step: 0, rounds, unit }
    }

    pub fn x(&self) -> i64 {
        self.x
    }
}

impl Profiled<SampleWorkload> {
    /// Calls `b` and `d` once per round
    pub fn a(&mut self) {
        self.call_mut("a", |s| {
            debug!("x = {}", s.x);
            for _ in 0..s.rounds {
                s.b();
                s.d();
            }
        });
    }

    pub fn b(&mut self) {
        self.call_mut("b", |s| {
            s.x += 2;
            thread::sleep(s.unit);
        });
    }

    /// Sleeps briefly, does nothing, or delegates to `b`, cycling by step
    pub fn d(&mut self) {
        self.call_mut("d", |s| {
            s.step += 1;
            match s.step % 5 {
                1 | 2 => thread::sleep(s.unit / 2),
                0 => s.b(),
                _ => {}
            }
        });
    }

    pub fn c(&mut self) {
        self.call_mut("c", |s| {
            debug!("x = {}", s.x);
            let units = s.x.rem_euclid(3) as u32 + 1;
            thread::sleep(s.unit * units);
        });
    }
}

/// Execute the demo command
///
/// **Public** - main entry point called from main.rs
pub fn execute_demo(args: DemoArgs) -> Result<()> {
    let start_time = Instant::now();
    let registry = ProfileRegistry::new();

    info!("Running sample workload ({} rounds, {:?} unit)", args.rounds, args.unit);

    let mut first = Profiled::new(SampleWorkload::new(3, args.rounds, args.unit), &registry);
    let mut second = Profiled::new(SampleWorkload::new(12, args.rounds, args.unit), &registry);

    first.a();
    second.a();
    first.c();
    second.c();

    // Both instances share one store; either will do
    let store = first.profile_data();

    println!("{}", render_flat(store.flat_stats()));
    println!("{}", render_tree(store.tree_stats()));

    if let Some(path) = &args.output_json {
        let report = ProfileReport::from_store(store, args.top_paths);
        write_report(&report, path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    if let Some(path) = &args.output_collapsed {
        let stacks = build_collapsed_stacks(&store.snapshot().root_tree);
        write_collapsed(&stacks, path)
            .with_context(|| format!("Failed to write collapsed stacks to {}", path.display()))?;
    }

    info!("Demo completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(())
}
