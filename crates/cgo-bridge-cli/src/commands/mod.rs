//! CLI command implementations for cgo-bridge.
//!
//! Each module corresponds to a subcommand (`cgo-bridge <command>`).

pub mod check;
pub mod generate;
pub mod print;

use std::path::{Path, PathBuf};

use anyhow::Result;

use cgo_bridge_core::config::BridgeConfig;
use cgo_bridge_core::generator::{BridgeGenerator, GenerateOptions};

use crate::TargetArgs;

/// Config used when `--config` is not given and the file exists.
const DEFAULT_CONFIG: &str = "uniffi.toml";

/// Config file locations from the global flags.
pub struct ConfigPaths {
    pub config: Option<PathBuf>,
    pub config_override: Option<PathBuf>,
}

impl ConfigPaths {
    /// The base config: `--config`, else `./uniffi.toml` when present.
    fn base(&self) -> Option<PathBuf> {
        self.config.clone().or_else(|| {
            let default = Path::new(DEFAULT_CONFIG);
            default.exists().then(|| default.to_path_buf())
        })
    }
}

/// Load the config, apply command-line overrides, and build the generator.
pub fn build_generator(paths: &ConfigPaths, target: &TargetArgs) -> Result<BridgeGenerator> {
    let base = paths.base();
    let mut config =
        BridgeConfig::load_with_override(base.as_deref(), paths.config_override.as_deref())?;

    if let Some(module) = &target.module {
        config.module_name = Some(module.clone());
    }
    if let Some(header) = &target.header {
        config.header_filename = Some(header.clone());
    }

    let options = GenerateOptions {
        emit_header: target.emit_header,
    };
    Ok(BridgeGenerator::new(&target.namespace, config, options)?)
}
