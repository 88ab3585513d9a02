//! Compile-time embedded templates for the generated C sources.
//!
//! Paths are relative to this source file
//! (`crates/cgo-bridge-core/src/templates/embedded.rs`). Do NOT move the template
//! files without updating the `include_str!` paths here.

/// Trampoline translation unit, written as `<ffi_module_filename>.c`.
pub const BRIDGE_C: &str = include_str!("../../../../templates/cgo/bridge.c.hbs");

/// Companion header declaring `RustTaskCallback` and the trampoline prototype.
pub const BRIDGE_HEADER: &str = include_str!("../../../../templates/cgo/bridge.h.hbs");
