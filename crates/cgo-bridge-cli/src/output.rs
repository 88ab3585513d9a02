//! Terminal output for cgo-bridge.
//!
//! Status lines go to stdout with [`console`] styling; `print` bypasses this
//! module so its stdout stays pure C source.

use std::path::Path;

use console::style;

use cgo_bridge_core::descriptor::BridgeDescriptor;
use cgo_bridge_core::generator::FileState;

/// `cgo-bridge <command>: <namespace>` banner.
pub fn banner(command: &str, namespace: &str) {
    let text = format!("cgo-bridge {command}: {namespace}");
    println!("\n{}", style(&text).bold().cyan());
    println!("{}", style("=".repeat(text.len())).dim());
}

pub fn step(step: u32, total: u32, text: &str) {
    println!("{} {}", style(format!("[{step}/{total}]")).dim(), text);
}

pub fn done(text: &str) {
    println!("{} {}", style("[OK]").green().bold(), text);
}

/// Module, header, and exported symbol of the trampoline being rendered.
pub fn descriptor(descriptor: &BridgeDescriptor) {
    field("Module", descriptor.module_identifier());
    field("Header", descriptor.header_filename());
    field("Symbol", &descriptor.symbol_name());
}

pub fn written(kind: &str, path: &Path) {
    field(kind, &path.display().to_string());
}

/// One `check` result line.
pub fn file_state(path: &Path, state: FileState) {
    let path = path.display();
    let (tag, text) = match state {
        FileState::UpToDate => (style("[OK]").green(), format!("{path} is up to date")),
        FileState::Stale => (style("[STALE]").yellow(), format!("{path} is out of date")),
        FileState::Missing => (style("[MISSING]").red(), format!("{path} is missing")),
        FileState::Modified => (style("[EDITED]").red(), format!("{path} was edited by hand")),
    };
    println!("{} {}", tag.bold(), text);
}

fn field(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}
