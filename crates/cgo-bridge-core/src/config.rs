//! Bridge configuration loaded from the `[bindings.go]` table of `uniffi.toml`.
//!
//! Every key is optional. Missing values are derived from the namespace
//! (see [`BridgeConfig::update_from_namespace`]) or fall back to fixed
//! defaults, so an empty or absent table still yields a usable config.
//!
//! ```toml
//! [bindings.go]
//! module_name = "arithmetic"        # alias: package_name
//! ffi_module_name = "arithmeticFFI"
//! ffi_module_filename = "arithmetic_ffi"
//! header_filename = "arithmetic.h"
//! cdylib_name = "uniffi_arithmetic"
//! bridge_template = "templates/bridge.c.hbs"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Fallback module name used for file names when nothing else is configured.
const DEFAULT_MODULE: &str = "uniffi";

/// Keys read by this generator.
const KNOWN_KEYS: &[&str] = &[
    "module_name",
    "package_name",
    "ffi_module_name",
    "ffi_module_filename",
    "header_filename",
    "cdylib_name",
    "bridge_template",
];

/// Keys of the Go bindings generator that share the `[bindings.go]` table.
const GO_BINDINGS_KEYS: &[&str] = &["custom_types", "go_mod"];

/// Generator configuration for one namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Module identifier embedded in the trampoline symbol.
    #[serde(alias = "package_name")]
    pub module_name: Option<String>,
    /// Name of the low-level C module holding the FFI declarations.
    pub ffi_module_name: Option<String>,
    /// File stem for the generated `.h` and `.c` files.
    pub ffi_module_filename: Option<String>,
    /// Explicit header name; overrides `<ffi_module_filename>.h`.
    pub header_filename: Option<String>,
    /// Name of the compiled Rust library.
    pub cdylib_name: Option<String>,
    /// Replacement for the embedded trampoline template.
    pub bridge_template: Option<PathBuf>,
}

impl BridgeConfig {
    /// Key of this generator's table under `[bindings]`.
    pub const TOML_KEY: &'static str = "go";

    /// Load the `[bindings.go]` table from a single TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_override(Some(path), None)
    }

    /// Load a base config and deep-merge an override file on top of it.
    ///
    /// Either file may be absent. Scalar keys in the override replace those in
    /// the base; nested tables are merged key by key.
    pub fn load_with_override(base: Option<&Path>, over: Option<&Path>) -> Result<Self> {
        let mut table = toml::Table::new();
        let mut last_path = None;

        for path in [base, over].into_iter().flatten() {
            let mut loaded = load_bindings_table(path)?;
            resolve_template_path(&mut loaded, path);
            merge(&mut table, loaded);
            last_path = Some(path);
        }

        let config: Self =
            toml::Value::Table(table)
                .try_into()
                .map_err(|e| BridgeError::ConfigParse {
                    path: last_path.map(Path::to_path_buf).unwrap_or_default(),
                    source: e,
                })?;

        tracing::debug!(?config, "loaded bridge config");
        Ok(config)
    }

    /// Fill in values that default to the namespace. Explicit values win.
    pub fn update_from_namespace(&mut self, namespace: &str) {
        self.module_name.get_or_insert_with(|| namespace.to_string());
        self.cdylib_name
            .get_or_insert_with(|| format!("uniffi_{namespace}"));
    }

    /// The module identifier, if one has been configured or derived.
    pub fn module_identifier(&self) -> Option<&str> {
        self.module_name.as_deref()
    }

    /// The name of the lower-level C module containing the FFI declarations.
    pub fn ffi_module_name(&self) -> String {
        match &self.ffi_module_name {
            Some(name) => name.clone(),
            None => format!(
                "{}FFI",
                self.module_name.as_deref().unwrap_or(DEFAULT_MODULE)
            ),
        }
    }

    /// The filename stem for the lower-level C module.
    pub fn ffi_module_filename(&self) -> String {
        match &self.ffi_module_filename {
            Some(name) => name.clone(),
            None => self.ffi_module_name(),
        }
    }

    /// The header declaring `RustTaskCallback`, included by the bridge.
    pub fn header_filename(&self) -> String {
        match &self.header_filename {
            Some(name) => name.clone(),
            None => format!("{}.h", self.ffi_module_filename()),
        }
    }

    /// The name of the generated `.c` file.
    pub fn c_filename(&self) -> String {
        format!("{}.c", self.ffi_module_filename())
    }

    /// The name of the compiled Rust library containing the FFI implementation.
    pub fn cdylib_name(&self) -> String {
        self.cdylib_name
            .clone()
            .unwrap_or_else(|| DEFAULT_MODULE.to_string())
    }
}

/// Read a TOML file and extract its `[bindings.go]` table.
///
/// A file without that table yields an empty table.
fn load_bindings_table(path: &Path) -> Result<toml::Table> {
    let contents = std::fs::read_to_string(path).map_err(|e| BridgeError::ConfigNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut doc: toml::Table =
        toml::from_str(&contents).map_err(|e| BridgeError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    let table = doc
        .remove("bindings")
        .and_then(|bindings| match bindings {
            toml::Value::Table(mut t) => t.remove(BridgeConfig::TOML_KEY),
            _ => None,
        })
        .and_then(|go| match go {
            toml::Value::Table(t) => Some(t),
            _ => None,
        })
        .unwrap_or_default();
    normalize_table(table, path)
}

/// Validate one file's table and fold `package_name` into `module_name`.
///
/// Checking each file on its own attributes type errors and a file setting both
/// spellings to that file. After renaming, an override's `module_name` replaces a
/// base's `package_name` like any other scalar key.
fn normalize_table(mut table: toml::Table, path: &Path) -> Result<toml::Table> {
    let _: BridgeConfig =
        toml::Value::Table(table.clone())
            .try_into()
            .map_err(|e| BridgeError::ConfigParse {
                path: path.to_path_buf(),
                source: e,
            })?;

    for key in unknown_keys(&table) {
        tracing::warn!(
            "ignoring unknown key `{key}` in [bindings.go] of {}",
            path.display()
        );
    }

    if let Some(name) = table.remove("package_name") {
        table.insert("module_name".to_string(), name);
    }
    Ok(table)
}

fn unknown_keys(table: &toml::Table) -> Vec<&str> {
    table
        .keys()
        .map(String::as_str)
        .filter(|k| !KNOWN_KEYS.contains(k) && !GO_BINDINGS_KEYS.contains(k))
        .collect()
}

/// Make a relative `bridge_template` path relative to the config file's directory.
fn resolve_template_path(table: &mut toml::Table, config_path: &Path) {
    let Some(toml::Value::String(template)) = table.get_mut("bridge_template") else {
        return;
    };
    if Path::new(template.as_str()).is_relative() {
        if let Some(dir) = config_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            *template = dir.join(template.as_str()).to_string_lossy().into_owned();
        }
    }
}

fn merge(a: &mut toml::Table, b: toml::Table) {
    for (key, value) in b {
        match a.get_mut(&key) {
            Some(existing) => match (existing, value) {
                (toml::Value::Table(existing), toml::Value::Table(incoming)) => {
                    merge(existing, incoming)
                }
                (existing, value) => *existing = value,
            },
            None => {
                a.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_from_namespace() {
        let mut config = BridgeConfig::default();
        config.update_from_namespace("arithmetic");
        assert_eq!(config.module_identifier(), Some("arithmetic"));
        assert_eq!(config.ffi_module_name(), "arithmeticFFI");
        assert_eq!(config.header_filename(), "arithmeticFFI.h");
        assert_eq!(config.c_filename(), "arithmeticFFI.c");
        assert_eq!(config.cdylib_name(), "uniffi_arithmetic");
    }

    #[test]
    fn test_namespace_does_not_override_explicit_values() {
        let mut config = BridgeConfig {
            module_name: Some("geometry".into()),
            cdylib_name: Some("libgeo".into()),
            ..Default::default()
        };
        config.update_from_namespace("arithmetic");
        assert_eq!(config.module_identifier(), Some("geometry"));
        assert_eq!(config.cdylib_name(), "libgeo");
    }

    #[test]
    fn test_filename_overrides() {
        let config = BridgeConfig {
            module_name: Some("foo".into()),
            ffi_module_filename: Some("foo_ffi".into()),
            ..Default::default()
        };
        assert_eq!(config.header_filename(), "foo_ffi.h");
        assert_eq!(config.c_filename(), "foo_ffi.c");

        let config = BridgeConfig {
            header_filename: Some("include/foo.h".into()),
            ..config
        };
        assert_eq!(config.header_filename(), "include/foo.h");
        assert_eq!(config.c_filename(), "foo_ffi.c");
    }

    #[test]
    fn test_unset_module_falls_back_for_filenames() {
        let config = BridgeConfig::default();
        assert_eq!(config.module_identifier(), None);
        assert_eq!(config.header_filename(), "uniffiFFI.h");
        assert_eq!(config.cdylib_name(), "uniffi");
    }

    #[test]
    fn test_load_bindings_go_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "uniffi.toml",
            r#"
[bindings.go]
module_name = "todolist"
ffi_module_filename = "todolist_ffi"

[bindings.kotlin]
package_name = "ignored"
"#,
        );
        let config = BridgeConfig::load(&path).unwrap();
        assert_eq!(config.module_identifier(), Some("todolist"));
        assert_eq!(config.header_filename(), "todolist_ffi.h");
    }

    #[test]
    fn test_package_name_alias() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "uniffi.toml",
            "[bindings.go]\npackage_name = \"sprites\"\n",
        );
        let config = BridgeConfig::load(&path).unwrap();
        assert_eq!(config.module_identifier(), Some("sprites"));
    }

    #[test]
    fn test_module_and_package_name_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "uniffi.toml",
            "[bindings.go]\nmodule_name = \"a\"\npackage_name = \"b\"\n",
        );
        let err = BridgeConfig::load(&path).unwrap_err();
        assert!(matches!(err, BridgeError::ConfigParse { .. }));
    }

    #[test]
    fn test_missing_table_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "uniffi.toml", "[bindings.swift]\nmodule_name = \"x\"\n");
        let config = BridgeConfig::load(&path).unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_load_nonexistent() {
        let err = BridgeConfig::load(Path::new("/tmp/nonexistent_cgo_bridge/uniffi.toml"))
            .unwrap_err();
        assert!(matches!(err, BridgeError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "uniffi.toml", "[bindings.go\nmodule_name = ");
        let err = BridgeConfig::load(&path).unwrap_err();
        assert!(matches!(err, BridgeError::ConfigParse { .. }));
    }

    #[test]
    fn test_override_merges_on_top() {
        let dir = tempfile::tempdir().unwrap();
        let base = write(
            dir.path(),
            "uniffi.toml",
            "[bindings.go]\nmodule_name = \"base\"\ncdylib_name = \"libbase\"\n",
        );
        let over = write(
            dir.path(),
            "override.toml",
            "[bindings.go]\nmodule_name = \"over\"\n",
        );
        let config = BridgeConfig::load_with_override(Some(&base), Some(&over)).unwrap();
        assert_eq!(config.module_identifier(), Some("over"));
        assert_eq!(config.cdylib_name(), "libbase");
    }

    #[test]
    fn test_override_module_name_replaces_base_package_name() {
        let dir = tempfile::tempdir().unwrap();
        let base = write(
            dir.path(),
            "uniffi.toml",
            "[bindings.go]\npackage_name = \"base\"\n",
        );
        let over = write(
            dir.path(),
            "override.toml",
            "[bindings.go]\nmodule_name = \"over\"\n",
        );
        let config = BridgeConfig::load_with_override(Some(&base), Some(&over)).unwrap();
        assert_eq!(config.module_identifier(), Some("over"));

        // And the other way round.
        let base = write(
            dir.path(),
            "uniffi.toml",
            "[bindings.go]\nmodule_name = \"base\"\n",
        );
        let over = write(
            dir.path(),
            "override.toml",
            "[bindings.go]\npackage_name = \"over\"\n",
        );
        let config = BridgeConfig::load_with_override(Some(&base), Some(&over)).unwrap();
        assert_eq!(config.module_identifier(), Some("over"));
    }

    #[test]
    fn test_conflict_is_attributed_to_its_file() {
        let dir = tempfile::tempdir().unwrap();
        let base = write(
            dir.path(),
            "uniffi.toml",
            "[bindings.go]\nmodule_name = \"a\"\npackage_name = \"b\"\n",
        );
        let over = write(dir.path(), "override.toml", "[bindings.go]\ncdylib_name = \"x\"\n");
        let err = BridgeConfig::load_with_override(Some(&base), Some(&over)).unwrap_err();
        assert!(matches!(err, BridgeError::ConfigParse { path, .. } if path == base));
    }

    #[test]
    fn test_unknown_keys() {
        let table: toml::Table = toml::from_str(
            "modul_name = \"typo\"\nmodule_name = \"ok\"\ngo_mod = \"example.com/m\"\n",
        )
        .unwrap();
        assert_eq!(unknown_keys(&table), vec!["modul_name"]);
    }

    #[test]
    fn test_unknown_keys_do_not_fail_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "uniffi.toml",
            "[bindings.go]\nmodule_name = \"todolist\"\nmodule_nam = \"typo\"\n",
        );
        let config = BridgeConfig::load(&path).unwrap();
        assert_eq!(config.module_identifier(), Some("todolist"));
    }

    #[test]
    fn test_override_only() {
        let dir = tempfile::tempdir().unwrap();
        let over = write(dir.path(), "override.toml", "[bindings.go]\nmodule_name = \"solo\"\n");
        let config = BridgeConfig::load_with_override(None, Some(&over)).unwrap();
        assert_eq!(config.module_identifier(), Some("solo"));
    }

    #[test]
    fn test_template_path_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "uniffi.toml",
            "[bindings.go]\nbridge_template = \"custom/bridge.c.hbs\"\n",
        );
        let config = BridgeConfig::load(&path).unwrap();
        assert_eq!(
            config.bridge_template,
            Some(dir.path().join("custom/bridge.c.hbs"))
        );
    }

    #[test]
    fn test_merge_nested_tables() {
        let mut a: toml::Table = toml::from_str("[t]\nx = 1\ny = 2\n").unwrap();
        let b: toml::Table = toml::from_str("[t]\ny = 3\nz = 4\n").unwrap();
        merge(&mut a, b);
        let t = a["t"].as_table().unwrap();
        assert_eq!(t["x"].as_integer(), Some(1));
        assert_eq!(t["y"].as_integer(), Some(3));
        assert_eq!(t["z"].as_integer(), Some(4));
    }
}
