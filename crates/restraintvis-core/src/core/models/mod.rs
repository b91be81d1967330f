//! # Core Models Module
//!
//! Plain data carried through the pipeline.
//!
//! - [`restraint`] - Canonical cross-link restraint records extracted from mmCIF tables
//! - [`scene`] - Component selections, representations, distance primitives and the
//!   serialized MolViewSpec document they end up in

pub mod restraint;
pub mod scene;
