use anyhow::Result;

use crate::commands::{build_generator, ConfigPaths};
use crate::TargetArgs;

/// Write the rendered `.c` source (or header) to stdout.
pub fn run(paths: &ConfigPaths, target: &TargetArgs, header_only: bool) -> Result<()> {
    let generator = build_generator(paths, target)?;
    let source = if header_only {
        generator.render_header()?
    } else {
        generator.render_bridge()?
    };
    print!("{source}");
    Ok(())
}
