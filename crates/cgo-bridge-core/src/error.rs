//! Unified error types for cgo-bridge.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur while generating a bridge.
#[derive(Error, Debug)]
pub enum BridgeError {
    // --- Configuration ---

    /// The configuration file (usually `uniffi.toml`) could not be read.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but is not valid TOML, or a known key of
    /// its `[bindings.go]` table has the wrong type.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The namespace is empty or would escape the output directory.
    #[error("invalid namespace '{0}'")]
    InvalidNamespace(String),

    /// A generated file would land outside the bindings directory, or two
    /// generated files would share a path.
    #[error("invalid output path '{}': {reason}", path.display())]
    InvalidOutputPath { path: PathBuf, reason: &'static str },

    /// Neither the config nor the namespace supplied a module identifier.
    #[error("no module identifier: set `module_name` in [bindings.go] or pass a namespace")]
    MissingModuleIdentifier,

    /// The module identifier is not a valid C identifier fragment.
    #[error("invalid module identifier '{0}' (allowed: A-Z, a-z, 0-9, _)")]
    InvalidModuleIdentifier(String),

    /// The header filename cannot be placed inside `#include <...>`.
    #[error("invalid header filename '{name}': {reason}")]
    InvalidHeaderFilename { name: String, reason: &'static str },

    // --- Templates ---

    /// A `bridge_template` override path could not be read.
    #[error("bridge template not found at {path}")]
    TemplateNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Handlebars template rendering failed (invalid template or missing variables).
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    /// The rendered source does not define the trampoline, or its call-through
    /// was removed or commented out.
    #[error("rendered bridge for {symbol} is missing {missing}")]
    TrampolineBodyMissing {
        symbol: String,
        missing: &'static str,
    },

    // --- Manifest ---

    /// The manifest (`bridge_artifacts.json`) is not valid JSON.
    #[error("failed to parse manifest at {path}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, BridgeError>`.
pub type Result<T> = std::result::Result<T, BridgeError>;
