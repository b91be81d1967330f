//! Provides input and output functionality for structure exchange files.
//!
//! The mmCIF reader here is deliberately untyped: it exposes categories as
//! string tables and leaves their meaning to the engine layer.

pub mod cif;
pub mod export;
pub mod traits;
