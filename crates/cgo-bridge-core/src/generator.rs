//! Rendering and writing of the bridge files for one namespace.
//!
//! ## Output layout
//!
//! ```text
//! <out_dir>/<namespace>/
//! ├── <ffi_module_filename>.c   # trampoline
//! ├── <header_filename>         # only with `emit_header`
//! └── bridge_artifacts.json     # BridgeManifest
//! ```

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::artifacts::{self, BridgeManifest, ManifestEntry};
use crate::config::BridgeConfig;
use crate::descriptor::BridgeDescriptor;
use crate::error::{BridgeError, Result};
use crate::templates::embedded;
use crate::templates::renderer::TemplateRenderer;

/// Switches that change which files are produced.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Also write a header declaring `RustTaskCallback` and the trampoline prototype.
    pub emit_header: bool,
}

/// A rendered file that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Path relative to the bindings directory.
    pub path: PathBuf,
    pub contents: String,
}

/// Result of [`BridgeGenerator::generate`].
#[derive(Debug, Clone)]
pub struct GeneratedBridge {
    pub bindings_dir: PathBuf,
    /// Absolute paths of the written source files.
    pub files: Vec<PathBuf>,
    pub manifest_path: PathBuf,
    pub symbol: String,
}

/// How a generated file on disk compares to a fresh render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    UpToDate,
    /// Differs from a fresh render but matches what was last generated.
    Stale,
    Missing,
    /// Edited since the last `generate`.
    Modified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    pub path: PathBuf,
    pub state: FileState,
}

/// Generator for a single namespace.
pub struct BridgeGenerator {
    namespace: String,
    config: BridgeConfig,
    descriptor: BridgeDescriptor,
    options: GenerateOptions,
    renderer: TemplateRenderer,
}

impl BridgeGenerator {
    /// Resolve namespace defaults into `config` and validate the descriptor.
    pub fn new(namespace: &str, mut config: BridgeConfig, options: GenerateOptions) -> Result<Self> {
        validate_namespace(namespace)?;
        config.update_from_namespace(namespace);
        validate_file_stem(&config.ffi_module_filename())?;
        let descriptor = BridgeDescriptor::from_config(&config)?;
        tracing::debug!(
            namespace,
            module = descriptor.module_identifier(),
            header = descriptor.header_filename(),
            "resolved bridge descriptor"
        );

        Ok(Self {
            namespace: namespace.to_string(),
            config,
            descriptor,
            options,
            renderer: TemplateRenderer::new(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn descriptor(&self) -> &BridgeDescriptor {
        &self.descriptor
    }

    /// Directory the files for this namespace are written to.
    pub fn bindings_dir(&self, out_dir: &Path) -> PathBuf {
        out_dir.join(&self.namespace)
    }

    /// Render the trampoline source.
    pub fn render_bridge(&self) -> Result<String> {
        match &self.config.bridge_template {
            Some(path) => {
                let template =
                    std::fs::read_to_string(path).map_err(|e| BridgeError::TemplateNotFound {
                        path: path.clone(),
                        source: e,
                    })?;
                tracing::debug!("using bridge template {}", path.display());
                self.renderer.render_bridge(&self.descriptor, &template)
            }
            None => self
                .renderer
                .render_bridge(&self.descriptor, embedded::BRIDGE_C),
        }
    }

    /// Render the companion header.
    pub fn render_header(&self) -> Result<String> {
        self.renderer.render_header(&self.descriptor)
    }

    /// Render every output file in memory.
    pub fn plan(&self) -> Result<Vec<PlannedFile>> {
        let mut files = vec![PlannedFile {
            path: PathBuf::from(self.config.c_filename()),
            contents: self.render_bridge()?,
        }];

        if self.options.emit_header {
            files.push(PlannedFile {
                path: PathBuf::from(self.descriptor.header_filename()),
                contents: self.render_header()?,
            });
        }

        let mut seen = HashSet::new();
        for file in &files {
            validate_output_path(&file.path)?;
            if !seen.insert(file.path.as_path()) {
                return Err(BridgeError::InvalidOutputPath {
                    path: file.path.clone(),
                    reason: "header and trampoline would be written to the same file",
                });
            }
        }

        Ok(files)
    }

    /// Render and write every output file, then save the manifest.
    pub fn generate(&self, out_dir: &Path) -> Result<GeneratedBridge> {
        let bindings_dir = self.bindings_dir(out_dir);
        let planned = self.plan()?;

        let mut written = Vec::with_capacity(planned.len());
        let mut entries = Vec::with_capacity(planned.len());
        for file in planned {
            let path = bindings_dir.join(&file.path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &file.contents)?;
            tracing::info!("wrote {}", path.display());

            entries.push(ManifestEntry {
                sha256: artifacts::digest(file.contents.as_bytes()),
                path: file.path,
            });
            written.push(path);
        }

        let manifest = BridgeManifest {
            namespace: self.namespace.clone(),
            symbol: self.descriptor.symbol_name(),
            header_filename: self.descriptor.header_filename().to_string(),
            files: entries,
        };
        let manifest_path = artifacts::save(&manifest, &bindings_dir)?;

        Ok(GeneratedBridge {
            bindings_dir,
            files: written,
            manifest_path,
            symbol: manifest.symbol,
        })
    }

    /// Compare the files on disk with a fresh render.
    pub fn check(&self, out_dir: &Path) -> Result<Vec<FileStatus>> {
        let bindings_dir = self.bindings_dir(out_dir);
        let manifest = artifacts::load(&bindings_dir)?;

        let mut statuses = Vec::new();
        for file in self.plan()? {
            let path = bindings_dir.join(&file.path);
            let state = if !path.exists() {
                FileState::Missing
            } else {
                let on_disk = std::fs::read(&path)?;
                if on_disk == file.contents.as_bytes() {
                    FileState::UpToDate
                } else {
                    let recorded = manifest.as_ref().and_then(|m| m.digest_of(&file.path));
                    match recorded {
                        Some(sha) if sha != artifacts::digest(&on_disk) => {
                            tracing::warn!("{} was modified after generation", path.display());
                            FileState::Modified
                        }
                        _ => FileState::Stale,
                    }
                }
            };
            statuses.push(FileStatus { path, state });
        }

        Ok(statuses)
    }
}

fn validate_namespace(namespace: &str) -> Result<()> {
    let invalid = namespace.is_empty()
        || namespace == "."
        || namespace == ".."
        || namespace.contains(['/', '\\']);
    if invalid {
        Err(BridgeError::InvalidNamespace(namespace.to_string()))
    } else {
        Ok(())
    }
}

/// The `.c`/`.h` stem must name a file directly inside the bindings directory.
fn validate_file_stem(stem: &str) -> Result<()> {
    let reason = if stem.is_empty() {
        Some("ffi_module_filename must not be empty")
    } else if stem == "." || stem == ".." || stem.contains(['/', '\\']) {
        Some("ffi_module_filename must be a bare file name")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(BridgeError::InvalidOutputPath {
            path: PathBuf::from(stem),
            reason,
        }),
        None => Ok(()),
    }
}

/// Planned paths are joined onto the bindings directory and must stay inside it.
fn validate_output_path(path: &Path) -> Result<()> {
    let escapes = path.is_absolute()
        || path.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
    if escapes {
        return Err(BridgeError::InvalidOutputPath {
            path: path.to_path_buf(),
            reason: "must stay inside the bindings directory",
        });
    }
    Ok(())
}
