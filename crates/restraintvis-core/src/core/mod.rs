//! # Core Module
//!
//! Stateless building blocks shared by the engine:
//!
//! - **File I/O** ([`io`]) - mmCIF reading and CSV export of restraints
//! - **Data Models** ([`models`]) - Restraint records and scene elements
//! - **Colors** ([`color`]) - Hex and CSS4 color resolution, chain palette sampling
//! - **Labels** ([`label`]) - Distance label templating with restraint-type symbols

pub mod color;
pub mod io;
pub mod label;
pub mod models;
