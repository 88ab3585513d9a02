use std::path::Path;

use anyhow::Result;

use crate::commands::{build_generator, ConfigPaths};
use crate::output;
use crate::TargetArgs;

/// Render the trampoline (and optionally its header) and write it under `out_dir`.
pub fn run(paths: &ConfigPaths, target: &TargetArgs, out_dir: &Path) -> Result<()> {
    output::banner("generate", &target.namespace);

    output::step(1, 2, "Resolving bridge descriptor");
    let generator = build_generator(paths, target)?;
    output::descriptor(generator.descriptor());

    output::step(2, 2, "Rendering and writing files");
    let generated = generator.generate(out_dir)?;

    for file in &generated.files {
        output::written("Wrote", file);
    }
    output::written("Manifest", &generated.manifest_path);
    output::done(&format!("Bridge {} generated", generated.symbol));

    Ok(())
}
