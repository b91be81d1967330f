use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading structure exchange files.
///
/// Implementors turn raw file content into a format-specific document, such as
/// the category tables of an mmCIF file.
pub trait StructureFile {
    /// The parsed representation of a whole file.
    type Document;

    /// The error type for I/O and parse failures.
    type Error: Error + From<io::Error>;

    /// Reads a document from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content cannot be parsed.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Document, Self::Error>;

    /// Reads a document from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Document, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
