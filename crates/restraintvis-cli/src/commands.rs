pub mod render;
pub mod restraints;
