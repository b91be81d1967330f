//! mmCIF reading.
//!
//! Produces untyped [`Container`]s (one per `data_` block) whose categories are
//! exposed as string [`Table`]s. Interpretation of any category is left to the
//! caller.

mod lexer;
mod parser;
mod table;

pub use parser::parse_str;
pub use table::{Container, Table};

use super::traits::StructureFile;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CifError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("No data block found in input")]
    EmptyFile,
}

pub struct CifFile;

impl StructureFile for CifFile {
    type Document = Vec<Container>;
    type Error = CifError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Document, Self::Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        parse_str(&content)
    }
}

impl CifFile {
    /// Reads a file and keeps only its first data block, which is where
    /// single-entry archive files put everything.
    pub fn read_first_block<P: AsRef<std::path::Path>>(path: P) -> Result<Container, CifError> {
        Self::read_from_path(path)?
            .into_iter()
            .next()
            .ok_or(CifError::EmptyFile)
    }
}
