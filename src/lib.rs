//! EffectForge Core - Effect Catalog Compiler
//!
//! Turns a directory of free-form effect folders into normalized effect
//! modules plus one index.
//!
//! # The Four Rules (Non-Negotiable)
//! 1. Classification Is Total
//! 2. Table Order Is Contract
//! 3. Validation Precedes Output
//! 4. Deterministic Output

pub mod taxonomy;
pub mod classify;
pub mod naming;
pub mod sanitize;
pub mod definition;
pub mod render;
pub mod manifest;
pub mod validation;
pub mod hashing;
pub mod config;
pub mod pipeline;

pub use taxonomy::{Category, Subcategory, Intensity, Performance, Compatibility, ParameterSpec, PreviewSpec};
pub use classify::{classify, ClassificationResult};
pub use naming::{camel_case, title_case};
pub use sanitize::sanitize_code;
pub use definition::{build_definition, EffectDefinition, EffectSource};
pub use render::{render_index, to_module_text};
pub use manifest::{CatalogStats, CompatibilityCriteria, FilterCriteria, Manifest, ManifestError};
pub use validation::{ValidationResult, ValidationRule, ValidationViolation, ViolationSeverity};
pub use hashing::{catalog_hash, canonical_json, module_hash, sha256_hex};
pub use config::ConvertConfig;
pub use pipeline::{ConversionPipeline, ConversionReport, ItemError, ItemOutcome, PipelineError, SkipReason};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
