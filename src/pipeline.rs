//! Conversion Pipeline - Single Entry Point
//!
//! CRITICAL: compile_source MUST validate before any module text leaves it.
//! Per-item problems are isolated: a skip or failure on one effect never
//! stops the run. Only enumerating the source root, creating the target root
//! or writing the index is fatal.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::classify::classify;
use crate::config::ConvertConfig;
use crate::definition::{build_definition, EffectDefinition, EffectSource};
use crate::hashing::{catalog_hash, module_hash};
use crate::manifest::{CatalogStats, Manifest, ManifestError};
use crate::naming::module_file_name;
use crate::render::{render_index, to_module_text};
use crate::validation::{ValidationResult, Validator};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Cannot read source directory {path}: {source}")]
    SourceUnreadable { path: PathBuf, source: std::io::Error },

    #[error("Cannot create target directory {path}: {source}")]
    TargetUncreatable { path: PathBuf, source: std::io::Error },

    #[error("I/O error on {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingDescription,
    MissingScript,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingDescription => write!(f, "missing description file"),
            SkipReason::MissingScript => write!(f, "missing script file"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Skipped: {0}")]
    Skipped(SkipReason),

    #[error("I/O error on {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// A definition plus its rendered module, validated.
#[derive(Debug, Clone)]
pub struct CompiledEffect {
    pub definition: EffectDefinition,
    pub module_text: String,
    pub validation: ValidationResult,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemOutcome {
    Converted {
        name: String,
        file: String,
        content_hash: String,
        warnings: Vec<String>,
    },
    Skipped {
        name: String,
        reason: SkipReason,
    },
    Failed {
        name: String,
        error: String,
    },
}

impl ItemOutcome {
    pub fn name(&self) -> &str {
        match self {
            ItemOutcome::Converted { name, .. }
            | ItemOutcome::Skipped { name, .. }
            | ItemOutcome::Failed { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub generated_at: DateTime<Utc>,
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
    pub index_file: PathBuf,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub outcomes: Vec<ItemOutcome>,
    pub manifest_hash: String,
    pub stats: CatalogStats,
    pub tags: Vec<String>,
}

impl ConversionReport {
    fn new(config: &ConvertConfig, outcomes: Vec<ItemOutcome>, manifest: &Manifest) -> Result<Self, PipelineError> {
        let count = |f: fn(&ItemOutcome) -> bool| outcomes.iter().filter(|o| f(o)).count();

        Ok(Self {
            generated_at: Utc::now(),
            source_dir: config.source_dir.clone(),
            target_dir: config.target_dir.clone(),
            index_file: config.index_path(),
            converted: count(|o| matches!(o, ItemOutcome::Converted { .. })),
            skipped: count(|o| matches!(o, ItemOutcome::Skipped { .. })),
            failed: count(|o| matches!(o, ItemOutcome::Failed { .. })),
            manifest_hash: catalog_hash(manifest.definitions())?,
            stats: manifest.stats(),
            tags: manifest.all_tags(),
            outcomes,
        })
    }
}

/// The conversion pipeline - single entry point for a migration run
pub struct ConversionPipeline {
    config: ConvertConfig,
    validator: Validator,
}

impl ConversionPipeline {
    pub fn new(config: ConvertConfig) -> Self {
        Self {
            config,
            validator: Validator::new(),
        }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Effect directories under the source root, sorted by name.
    pub fn discover(&self) -> Result<Vec<PathBuf>, PipelineError> {
        let root = &self.config.source_dir;
        let unreadable = |source| PipelineError::SourceUnreadable { path: root.clone(), source };

        let mut dirs = vec![];
        for entry in fs::read_dir(root).map_err(unreadable)? {
            let path = entry.map_err(unreadable)?.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    /// Read one effect directory.
    pub fn load_source(&self, dir: &Path) -> Result<EffectSource, ItemError> {
        let identifier = dir_name(dir);

        let description_path = dir.join(&self.config.description_file);
        if !description_path.is_file() {
            return Err(ItemError::Skipped(SkipReason::MissingDescription));
        }
        let script_path = self
            .first_script(dir)?
            .ok_or(ItemError::Skipped(SkipReason::MissingScript))?;

        let description = read_text(&description_path)?.trim().to_string();
        let raw_code = read_text(&script_path)?;

        Ok(EffectSource::new(identifier, description, raw_code))
    }

    fn first_script(&self, dir: &Path) -> Result<Option<PathBuf>, ItemError> {
        let io = |source| ItemError::Io { path: dir.to_path_buf(), source };

        let mut scripts = vec![];
        for entry in fs::read_dir(dir).map_err(io)? {
            let path = entry.map_err(io)?.path();
            let is_script = path
                .extension()
                .is_some_and(|e| e == self.config.script_extension.as_str());
            if is_script && path.is_file() {
                scripts.push(path);
            }
        }
        scripts.sort();
        Ok(scripts.into_iter().next())
    }

    /// Classify, build, validate and render one source.
    ///
    /// This ALWAYS validates. An invalid definition never yields module text.
    pub fn compile_source(&self, source: &EffectSource) -> Result<CompiledEffect, ItemError> {
        let classification = classify(&source.identifier, &source.description);
        let definition = build_definition(source, &classification);

        let validation = self.validator.validate(&definition);
        if !validation.valid {
            return Err(ItemError::ValidationFailed(validation.error_summary()));
        }
        for w in validation.warnings() {
            warn!(effect = %definition.id, rule = %w.rule, "{}", w.message);
        }

        let module_text = to_module_text(&definition, &self.config.module_suffix);
        Ok(CompiledEffect {
            definition,
            module_text,
            validation,
        })
    }

    /// Classify and build every effect without writing anything.
    pub fn survey(&self) -> Result<(Manifest, Vec<ItemOutcome>), PipelineError> {
        let mut manifest = Manifest::new();
        let mut outcomes = vec![];

        for dir in self.discover()? {
            let name = dir_name(&dir);
            let result = self.process_item(&dir, &mut manifest, Emit::DryRun);
            outcomes.push(outcome_of(name, result));
        }

        Ok((manifest, outcomes))
    }

    /// Run the full migration: one module per effect plus the index.
    pub fn run(&self) -> Result<ConversionReport, PipelineError> {
        let dirs = self.discover()?;
        info!("Found {} effects to convert", dirs.len());

        let target = &self.config.target_dir;
        fs::create_dir_all(target).map_err(|source| PipelineError::TargetUncreatable {
            path: target.clone(),
            source,
        })?;

        let mut manifest = Manifest::new();
        let mut outcomes = Vec::with_capacity(dirs.len());

        for (i, dir) in dirs.iter().enumerate() {
            let name = dir_name(dir);
            let outcome = outcome_of(name, self.process_item(dir, &mut manifest, Emit::Write));

            match &outcome {
                ItemOutcome::Converted { name, file, .. } => {
                    info!("[{}/{}] Converted: {} -> {}", i + 1, dirs.len(), name, file)
                }
                ItemOutcome::Skipped { name, reason } => {
                    warn!("[{}/{}] Skipping {}: {}", i + 1, dirs.len(), name, reason)
                }
                ItemOutcome::Failed { name, error: e } => {
                    error!("[{}/{}] Error converting {}: {}", i + 1, dirs.len(), name, e)
                }
            }
            outcomes.push(outcome);
        }

        let index_path = self.config.index_path();
        let index = render_index(&manifest.ids(), &self.config.module_suffix, &self.config.index_file);
        fs::write(&index_path, index).map_err(|source| PipelineError::Io {
            path: index_path.clone(),
            source,
        })?;

        let report = ConversionReport::new(&self.config, outcomes, &manifest)?;
        info!(
            converted = report.converted,
            skipped = report.skipped,
            failed = report.failed,
            "Conversion complete"
        );
        Ok(report)
    }

    /// Load, compile and register one effect; with `Emit::Write` the module is
    /// written before it joins the manifest.
    fn process_item(&self, dir: &Path, manifest: &mut Manifest, emit: Emit) -> Result<ItemOutcome, ItemError> {
        let name = dir_name(dir);
        let source = self.load_source(dir)?;
        let compiled = self.compile_source(&source)?;

        let id = &compiled.definition.id;
        if manifest.contains(id) {
            return Err(ManifestError::DuplicateIdentifier(id.clone()).into());
        }

        let file = module_file_name(id, &self.config.module_suffix);
        if emit == Emit::Write {
            let path = self.config.target_dir.join(&file);
            fs::write(&path, &compiled.module_text).map_err(|source| ItemError::Io { path, source })?;
        }

        let outcome = converted(&name, file, &compiled);
        manifest.insert(compiled.definition)?;
        Ok(outcome)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emit {
    Write,
    DryRun,
}

fn converted(name: &str, file: String, compiled: &CompiledEffect) -> ItemOutcome {
    ItemOutcome::Converted {
        name: name.to_string(),
        file,
        content_hash: module_hash(&compiled.module_text),
        warnings: compiled
            .validation
            .warnings()
            .map(|w| format!("{}: {}", w.rule, w.message))
            .collect(),
    }
}

fn outcome_of(name: String, result: Result<ItemOutcome, ItemError>) -> ItemOutcome {
    match result {
        Ok(outcome) => outcome,
        Err(ItemError::Skipped(reason)) => ItemOutcome::Skipped { name, reason },
        Err(e) => ItemOutcome::Failed { name, error: e.to_string() },
    }
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn read_text(path: &Path) -> Result<String, ItemError> {
    fs::read_to_string(path).map_err(|source| ItemError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl Default for ConversionPipeline {
    fn default() -> Self {
        Self::new(ConvertConfig::default())
    }
}
