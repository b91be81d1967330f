//! # Engine Module
//!
//! This module turns parsed structure data into scene content: it extracts
//! restraint records from the structure's tables, renders the base
//! macromolecule and each restraint into scene fragments, and assembles those
//! fragments into a single MolViewSpec document.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Visual styles, structure source and restraint selection
//! - **Extraction** ([`extract`]) - Canonical restraint records from `ihm_cross_link_restraint`
//! - **Rendering** ([`macromolecule`], [`restraint`]) - Scene fragments for the structure and for each restraint
//! - **Assembly** ([`scene`]) - Ordered, deterministic document construction
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-level error aggregation

pub mod config;
pub mod error;
pub mod extract;
pub mod macromolecule;
pub mod progress;
pub mod restraint;
pub mod scene;
