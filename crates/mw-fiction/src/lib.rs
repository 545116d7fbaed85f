//! Template-driven prose for Mapwright.
//!
//! [`TemplateProse`] implements [`mw_core::Prose`] by random choice over
//! fixed word tables, keyed by point-of-interest type and biome. Seed it
//! through [`ProseConfig`] to get reproducible text.

/// Prose generator configuration.
pub mod config;
mod tables;
/// The template-backed prose generator.
pub mod templates;

pub use config::{ProseConfig, ProseTone};
pub use templates::TemplateProse;
