//! Template system for the generated C sources.
//!
//! Templates are embedded into the binary at compile-time via [`include_str!`] in the
//! [`embedded`] module, then rendered at runtime with [Handlebars](https://handlebarsjs.com/)
//! via the [`renderer::TemplateRenderer`].
//!
//! ## Template variables
//!
//! - `{{header_filename}}` — header declaring `RustTaskCallback` (e.g., `arithmeticFFI.h`)
//! - `{{module_identifier}}` — module name embedded in the symbol (e.g., `arithmetic`)
//! - `{{symbol}}` — full trampoline symbol (`cgo_rust_task_callback_bridge_<module>`)
//! - `{{include_guard}}` — header only, derived from `header_filename`
//! - `{{status_success}}`, `{{status_cancelled}}` — header only, task status bytes
//!
//! A `bridge_template` override in the config receives the same variables as the
//! embedded `.c` template.
//!
//! **Warning**: Template files in `templates/` and constants in [`embedded`] must stay in sync.

pub mod embedded;
pub mod renderer;
