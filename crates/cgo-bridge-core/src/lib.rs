//! Core library for cgo-bridge.
//!
//! cgo cannot call a C function pointer it received from native code
//! (golang/go#11263). UniFFI hands Go a `RustTaskCallback` pointer when a Rust
//! future makes progress, so Go needs a small, statically declared C trampoline
//! that forwards the call. This crate renders that trampoline:
//!
//! - [`config`] — the `[bindings.go]` table of `uniffi.toml`
//! - [`descriptor`] — the validated header name + module identifier
//! - [`templates`] — embedded Handlebars templates and the renderer
//! - [`trampoline`] — structural check that the call-through is present
//! - [`generator`] — plan, write, and check the output files
//! - [`artifacts`] — the JSON manifest of generated files

pub mod artifacts;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod templates;
pub mod trampoline;
