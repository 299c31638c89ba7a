//! I/O Trace Studio CLI
//!
//! Profiles block, file-system and VFS traces and translates file
//! accesses into the block accesses they should produce.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use iotrace_studio::commands::{
    display_schema, display_version, execute_check, execute_profile, execute_translate,
    translate, validate_args, validate_profile_file, CheckArgs, ProfileArgs, TranslateArgs,
};
use iotrace_studio::parser::IoLevel;
use iotrace_studio::translator::IoMode;

/// I/O Trace Studio - access-pattern profiling for storage traces
#[derive(Parser, Debug)]
#[command(name = "iotrace")]
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
    /// Compute access-pattern statistics from a tracer log
    Profile {
        /// Tracer log (time;type;address;size;level;task;pid)
        #[arg(short, long)]
        log: PathBuf,

        /// Only profile one level (BLK, FS or VFS)
        #[arg(long)]
        level: Option<IoLevel>,

        /// Output path for JSON profile
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// List the block accesses implied by each VFS access
    Translate {
        /// Tracer log holding VFS events
        #[arg(short, long)]
        log: PathBuf,

        /// JSON extent table of the traced file
        #[arg(short, long)]
        extents: PathBuf,

        /// The workload used direct I/O
        #[arg(long)]
        direct: bool,
    },

    /// Compare a trace against the expected workload
    Check {
        /// Tracer log to check
        #[arg(short, long)]
        log: PathBuf,

        /// TOML file describing the expected workload
        #[arg(short, long)]
        expect: PathBuf,

        /// The workload used direct I/O
        #[arg(long)]
        direct: bool,

        /// Output path for JSON check report
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a profile JSON file
    Validate {
        /// Path to profile JSON file
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
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Profile {
            log,
            level,
            output,
            summary,
        } => {
            let args = ProfileArgs {
                log_file: log,
                level,
                output_json: output,
                print_summary: summary,
            };

            validate_args(&args)?;
            execute_profile(args)?;
        }

        Commands::Translate {
            log,
            extents,
            direct,
        } => {
            let args = TranslateArgs {
                log_file: log,
                extent_file: extents,
                mode: IoMode::from_direct_flag(direct),
            };

            translate::validate_args(&args)?;
            execute_translate(args)?;
        }

        Commands::Check {
            log,
            expect,
            direct,
            output,
        } => {
            let args = CheckArgs {
                log_file: log,
                expectation_file: expect,
                direct_io: direct,
                output_json: output,
            };

            execute_check(args)?;
        }

        Commands::Validate { file } => {
            validate_profile_file(file)?;
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
