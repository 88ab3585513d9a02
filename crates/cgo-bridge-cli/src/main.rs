//! cgo-bridge CLI — emits the C trampoline cgo needs to call Rust task callbacks.
//!
//! Provides three commands: `generate`, `check`, and `print`.
//!
//! Each command builds a [`cgo_bridge_core::generator::BridgeGenerator`] from the
//! `[bindings.go]` table of `uniffi.toml` plus command-line overrides.

mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cgo-bridge",
    about = "Generate the cgo trampoline for UniFFI Rust task callbacks",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to uniffi.toml (default: ./uniffi.toml if it exists)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra config merged on top of --config
    #[arg(long, global = true)]
    config_override: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Render and write the bridge files
    Generate {
        #[command(flatten)]
        target: TargetArgs,

        /// Directory in which to write generated files
        #[arg(long, short)]
        out_dir: PathBuf,
    },

    /// Verify that previously generated files are up to date
    Check {
        #[command(flatten)]
        target: TargetArgs,

        /// Directory the files were generated into
        #[arg(long, short)]
        out_dir: PathBuf,
    },

    /// Render to stdout without writing anything
    Print {
        #[command(flatten)]
        target: TargetArgs,

        /// Print the companion header instead of the .c file
        #[arg(long)]
        header_only: bool,
    },
}

/// Options shared by every command that selects what to render.
#[derive(Args, Clone, Debug)]
pub struct TargetArgs {
    /// UniFFI namespace; also the default module identifier
    pub namespace: String,

    /// Override the module identifier (`module_name` / `package_name`)
    #[arg(long)]
    pub module: Option<String>,

    /// Override the header included by the trampoline
    #[arg(long)]
    pub header: Option<String>,

    /// Also write a header declaring RustTaskCallback and the trampoline
    #[arg(long)]
    pub emit_header: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = commands::ConfigPaths {
        config: cli.config,
        config_override: cli.config_override,
    };

    match cli.command {
        Commands::Generate { target, out_dir } => {
            commands::generate::run(&config, &target, &out_dir)?;
        }
        Commands::Check { target, out_dir } => {
            commands::check::run(&config, &target, &out_dir)?;
        }
        Commands::Print {
            target,
            header_only,
        } => {
            commands::print::run(&config, &target, header_only)?;
        }
    }

    Ok(())
}
