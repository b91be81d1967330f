//! Layered configuration for the `render` command.
//!
//! Values are taken, in order of precedence, from command-line flags, `-S`
//! overrides, the TOML file given with `--config`, and built-in defaults.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;
