//! # Workflows Module
//!
//! High-level entry points that run the whole restraint visualization
//! pipeline on a parsed structure.
//!
//! - **Visualization Workflow** ([`visualize`]) - Extracts restraints, renders
//!   the macromolecule and every selected restraint, and returns the finished
//!   scene document.

pub mod visualize;
