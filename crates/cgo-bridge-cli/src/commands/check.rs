use std::path::Path;

use anyhow::Result;

use cgo_bridge_core::generator::FileState;

use crate::commands::{build_generator, ConfigPaths};
use crate::output;
use crate::TargetArgs;

/// Compare generated files with a fresh render.
///
/// Fails when any file is missing, out of date, or was edited by hand.
pub fn run(paths: &ConfigPaths, target: &TargetArgs, out_dir: &Path) -> Result<()> {
    output::banner("check", &target.namespace);

    let generator = build_generator(paths, target)?;
    let statuses = generator.check(out_dir)?;

    for status in &statuses {
        output::file_state(&status.path, status.state);
    }

    let failing = statuses
        .iter()
        .filter(|s| s.state != FileState::UpToDate)
        .count();
    if failing > 0 {
        anyhow::bail!(
            "{failing} of {} bridge file(s) need regenerating (run `cgo-bridge generate`)",
            statuses.len()
        );
    }

    output::done("All bridge files up to date");
    Ok(())
}
