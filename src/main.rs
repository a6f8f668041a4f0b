//! Proxy Profiler CLI
//!
//! Runs the sample workload under the profiler and inspects report files.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::time::Duration;

use proxy_profiler::commands::{
    display_schema, display_version, execute_demo, validate_args, validate_report_file, DemoArgs,
};

/// Proxy Profiler - per-class method call profiling
#[derive(Parser, Debug)]
#[command(name = "proxy-profiler")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Profile the sample workload and print flat and tree statistics
    Demo {
        /// Inner loop iterations per top-level call
        #[arg(short, long, default_value = "10")]
        rounds: u32,

        /// Base sleep unit in milliseconds
        #[arg(long, default_value = "10")]
        unit_ms: u64,

        /// Output path for JSON report (optional)
        #[arg(short, long)]
        json: Option<PathBuf>,

        /// Output path for collapsed stacks (optional)
        #[arg(short, long)]
        collapsed: Option<PathBuf>,

        /// Number of top hot paths to include in the report
        #[arg(long, default_value = "10")]
        top_paths: usize,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Demo {
            rounds,
            unit_ms,
            json,
            collapsed,
            top_paths,
        } => {
            let args = DemoArgs {
                rounds,
                unit: Duration::from_millis(unit_ms),
                output_json: json,
                output_collapsed: collapsed,
                top_paths,
            };

            validate_args(&args)?;
            execute_demo(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
