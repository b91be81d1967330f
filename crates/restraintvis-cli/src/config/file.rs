use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileMacromoleculeConfig {
    pub color: Option<String>,
    pub representation: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileRestraintConfig {
    pub representation: Option<String>,
    pub residue_color: Option<String>,
    pub line_color: Option<String>,
    pub label_color: Option<String>,
    pub radius: Option<f64>,
    pub dash_length: Option<f64>,
    pub label_template: Option<String>,
    pub label_size: Option<f64>,
    pub label_precision: Option<usize>,
    pub focus: Option<bool>,
    pub include_entity_id: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url_template: Option<String>,
    pub assembly_id: Option<String>,
    pub macromolecule: Option<FileMacromoleculeConfig>,
    pub restraint: Option<FileRestraintConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
