//! The Bridge Function Descriptor: the two values that drive rendering.
//!
//! A descriptor is built once per generation run from a [`BridgeConfig`],
//! validated up front, and only read afterwards. The exported trampoline
//! symbol is derived from the module identifier, which is what keeps
//! symbols unique when several modules are bridged into the same binary.

use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};

/// Prefix of every generated trampoline symbol.
pub const SYMBOL_PREFIX: &str = "cgo_rust_task_callback_bridge_";

/// Validated input for the trampoline template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeDescriptor {
    header_filename: String,
    module_identifier: String,
}

impl BridgeDescriptor {
    /// Build a descriptor, rejecting values that would produce broken C.
    pub fn new(
        header_filename: impl Into<String>,
        module_identifier: impl Into<String>,
    ) -> Result<Self> {
        let header_filename = header_filename.into();
        let module_identifier = module_identifier.into();
        validate_header_filename(&header_filename)?;
        validate_module_identifier(&module_identifier)?;
        Ok(Self {
            header_filename,
            module_identifier,
        })
    }

    /// Build a descriptor from a config whose namespace defaults are already applied.
    pub fn from_config(config: &BridgeConfig) -> Result<Self> {
        let module = config
            .module_identifier()
            .ok_or(BridgeError::MissingModuleIdentifier)?;
        Self::new(config.header_filename(), module)
    }

    pub fn header_filename(&self) -> &str {
        &self.header_filename
    }

    pub fn module_identifier(&self) -> &str {
        &self.module_identifier
    }

    /// The exported trampoline symbol, e.g. `cgo_rust_task_callback_bridge_foo`.
    pub fn symbol_name(&self) -> String {
        format!("{SYMBOL_PREFIX}{}", self.module_identifier)
    }

    /// Include guard for the companion header, derived from its filename.
    ///
    /// `include/fooFFI.h` becomes `INCLUDE_FOOFFI_H`.
    pub fn include_guard(&self) -> String {
        let mut guard: String = self
            .header_filename
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        if guard.starts_with(|c: char| c.is_ascii_digit()) {
            guard.insert(0, '_');
        }
        guard
    }
}

/// The identifier is appended to [`SYMBOL_PREFIX`], so a leading digit is allowed.
fn validate_module_identifier(module: &str) -> Result<()> {
    let valid = !module.is_empty()
        && module
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(BridgeError::InvalidModuleIdentifier(module.to_string()))
    }
}

fn validate_header_filename(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name.trim() != name {
        Some("must not have leading or trailing whitespace")
    } else if name.contains(['\n', '\r']) {
        Some("must not contain a line break")
    } else if name.contains(['>', '"', '\0']) {
        Some("must not contain '>', '\"' or NUL")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(BridgeError::InvalidHeaderFilename {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
