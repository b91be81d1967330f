//! # restraintvis
//!
//! Turns integrative structure models and their distance restraints into
//! declarative MolViewSpec scenes that a molecular viewer can render.
//!
//! ## Architecture
//!
//! The library keeps a strict three-layer split:
//!
//! - **[`core`]: The Foundation.** Stateless pieces: the mmCIF reader, restraint and
//!   scene data models, color resolution and label templating.
//!
//! - **[`engine`]: The Logic Core.** Restraint extraction from the structure tables,
//!   rendering of the macromolecule and of each restraint into scene fragments, and
//!   assembly of the final document.
//!
//! - **[`workflows`]: The Public API.** Runs the complete pipeline, from a parsed
//!   structure to a serialized scene, with progress reporting.

pub mod core;
pub mod engine;
pub mod workflows;
