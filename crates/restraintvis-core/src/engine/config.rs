use crate::core::label::{self, LabelError};
use crate::core::models::scene::RepresentationKind;
use thiserror::Error;

pub const DEFAULT_URL_TEMPLATE: &str = "https://pdb-ihm.org/cif/{id}";
pub const DEFAULT_LABEL_TEMPLATE: &str =
    "Solved Distance: {{distance}}, Restraint Distance: {restraint_symbol}{distance}";
pub const CHAINS_KEYWORD: &str = "chains";

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("Invalid label template: {0}")]
    LabelTemplate(#[from] LabelError),
}

/// How the base macromolecule is colored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacromoleculeColoring {
    /// One palette color per chain, in chain-table order.
    ByChain,
    /// A single color name or hex literal for the whole polymer.
    Named(String),
    /// Explicit colors for listed chains, as `(chain id, color)` pairs.
    Mapping(Vec<(String, String)>),
}

impl MacromoleculeColoring {
    /// Interprets a user-facing color setting.
    ///
    /// `chains` selects per-chain coloring, `A=red,B=#00ff00` an explicit
    /// mapping, and anything else is taken as a single color.
    pub fn from_setting(value: &str) -> Result<Self, ConfigError> {
        let value = value.trim();
        if value == CHAINS_KEYWORD {
            return Ok(Self::ByChain);
        }
        if !value.contains('=') {
            return Ok(Self::Named(value.to_string()));
        }

        let mut pairs = Vec::new();
        for entry in value.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (chain, color) = entry
                .split_once('=')
                .map(|(c, v)| (c.trim(), v.trim()))
                .filter(|(c, v)| !c.is_empty() && !v.is_empty())
                .ok_or_else(|| ConfigError::InvalidParameter {
                    name: "color",
                    reason: format!("expected CHAIN=COLOR, got '{}'", entry),
                })?;
            if pairs.iter().any(|(c, _): &(String, String)| c == chain) {
                return Err(ConfigError::InvalidParameter {
                    name: "color",
                    reason: format!("chain '{}' is mapped more than once", chain),
                });
            }
            pairs.push((chain.to_string(), color.to_string()));
        }
        Ok(Self::Mapping(pairs))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MacromoleculeStyle {
    pub coloring: MacromoleculeColoring,
    pub representation: RepresentationKind,
}

impl Default for MacromoleculeStyle {
    fn default() -> Self {
        Self {
            coloring: MacromoleculeColoring::ByChain,
            representation: RepresentationKind::Cartoon,
        }
    }
}

/// Visual options applied to every rendered restraint.
#[derive(Debug, Clone, PartialEq)]
pub struct RestraintStyle {
    pub representation: RepresentationKind,
    pub residue_color: String,
    /// Defaults to the residue color.
    pub line_color: Option<String>,
    /// Defaults to the residue color.
    pub label_color: Option<String>,
    pub radius: f64,
    pub dash_length: f64,
    pub label_template: String,
    pub label_size: Option<f64>,
    /// Decimal places used for the restraint distance in labels.
    pub label_precision: usize,
    pub focus: bool,
    /// Narrow endpoint selections by `label_entity_id` as well as chain.
    pub include_entity_id: bool,
}

impl Default for RestraintStyle {
    fn default() -> Self {
        Self {
            representation: RepresentationKind::BallAndStick,
            residue_color: "red".to_string(),
            line_color: None,
            label_color: None,
            radius: 0.1,
            dash_length: 0.1,
            label_template: DEFAULT_LABEL_TEMPLATE.to_string(),
            label_size: None,
            label_precision: 1,
            focus: true,
            include_entity_id: false,
        }
    }
}

impl RestraintStyle {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidParameter {
                    name,
                    reason: format!("must be a positive number, got {}", value),
                })
            }
        };
        positive("radius", self.radius)?;
        positive("dash_length", self.dash_length)?;
        if let Some(size) = self.label_size {
            positive("label_size", size)?;
        }
        label::validate_template(&self.label_template)?;
        Ok(())
    }
}

/// Where the viewer fetches the structure the scene is drawn on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureSource {
    pub url: String,
    pub format: String,
    /// `None` draws the deposited model instead of an assembly.
    pub assembly_id: Option<String>,
}

impl StructureSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            format: "mmcif".to_string(),
            assembly_id: Some("1".to_string()),
        }
    }
}

/// Fills the `{id}` placeholder of a download URL template.
pub fn download_url(template: &str, id: &str) -> String {
    template.replace("{id}", id)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RestraintSelection {
    #[default]
    All,
    /// Zero-based row indices into the restraint table, rendered in this order.
    Indices(Vec<usize>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisualizationConfig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub source: StructureSource,
    pub macromolecule: MacromoleculeStyle,
    pub restraint: RestraintStyle,
    pub selection: RestraintSelection,
}

#[derive(Default)]
pub struct VisualizationConfigBuilder {
    title: Option<String>,
    description: Option<String>,
    source_url: Option<String>,
    assembly_id: Option<Option<String>>,
    macromolecule: Option<MacromoleculeStyle>,
    restraint: Option<RestraintStyle>,
    selection: Option<RestraintSelection>,
}

impl VisualizationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
    pub fn source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }
    pub fn assembly_id(mut self, assembly_id: Option<String>) -> Self {
        self.assembly_id = Some(assembly_id);
        self
    }
    pub fn macromolecule(mut self, style: MacromoleculeStyle) -> Self {
        self.macromolecule = Some(style);
        self
    }
    pub fn restraint(mut self, style: RestraintStyle) -> Self {
        self.restraint = Some(style);
        self
    }
    pub fn selection(mut self, selection: RestraintSelection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn build(self) -> Result<VisualizationConfig, ConfigError> {
        let mut source = StructureSource::new(
            self.source_url
                .ok_or(ConfigError::MissingParameter("source_url"))?,
        );
        if let Some(assembly_id) = self.assembly_id {
            source.assembly_id = assembly_id;
        }

        let restraint = self.restraint.unwrap_or_default();
        restraint.validate()?;

        Ok(VisualizationConfig {
            title: self.title,
            description: self.description,
            source,
            macromolecule: self.macromolecule.unwrap_or_default(),
            restraint,
            selection: self.selection.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_setting_recognizes_chains_keyword() {
        assert_eq!(
            MacromoleculeColoring::from_setting("chains"),
            Ok(MacromoleculeColoring::ByChain)
        );
    }

    #[test]
    fn from_setting_treats_other_values_as_single_color() {
        assert_eq!(
            MacromoleculeColoring::from_setting("grey"),
            Ok(MacromoleculeColoring::Named("grey".into()))
        );
        assert_eq!(
            MacromoleculeColoring::from_setting("#abcdef"),
            Ok(MacromoleculeColoring::Named("#abcdef".into()))
        );
    }

    #[test]
    fn from_setting_parses_chain_mapping() {
        assert_eq!(
            MacromoleculeColoring::from_setting("A=red, B=#00ff00"),
            Ok(MacromoleculeColoring::Mapping(vec![
                ("A".into(), "red".into()),
                ("B".into(), "#00ff00".into()),
            ]))
        );
    }

    #[test]
    fn from_setting_rejects_malformed_or_duplicate_mapping() {
        assert!(MacromoleculeColoring::from_setting("A=red,B").is_err());
        assert!(MacromoleculeColoring::from_setting("A=red,=blue").is_err());
        assert!(MacromoleculeColoring::from_setting("A=red,A=blue").is_err());
    }

    #[test]
    fn restraint_style_defaults() {
        let style = RestraintStyle::default();
        assert_eq!(style.representation, RepresentationKind::BallAndStick);
        assert_eq!(style.residue_color, "red");
        assert_eq!(style.radius, 0.1);
        assert_eq!(style.dash_length, 0.1);
        assert!(style.focus);
        assert!(style.line_color.is_none());
        assert!(style.validate().is_ok());
    }

    #[test]
    fn restraint_style_rejects_non_positive_geometry() {
        let style = RestraintStyle {
            radius: 0.0,
            ..RestraintStyle::default()
        };
        assert!(matches!(
            style.validate(),
            Err(ConfigError::InvalidParameter { name: "radius", .. })
        ));
        let style = RestraintStyle {
            dash_length: f64::NAN,
            ..RestraintStyle::default()
        };
        assert!(style.validate().is_err());
    }

    #[test]
    fn restraint_style_rejects_bad_template() {
        let style = RestraintStyle {
            label_template: "{nope}".into(),
            ..RestraintStyle::default()
        };
        assert!(matches!(
            style.validate(),
            Err(ConfigError::LabelTemplate(LabelError::UnknownPlaceholder(_)))
        ));
    }

    #[test]
    fn download_url_fills_identifier() {
        assert_eq!(
            download_url(DEFAULT_URL_TEMPLATE, "PDBDEV_00000001.cif"),
            "https://pdb-ihm.org/cif/PDBDEV_00000001.cif"
        );
    }

    #[test]
    fn builder_requires_source_url() {
        let result = VisualizationConfigBuilder::new().build();
        assert_eq!(result, Err(ConfigError::MissingParameter("source_url")));
    }

    #[test]
    fn builder_applies_defaults() {
        let config = VisualizationConfigBuilder::new()
            .source_url("https://example.org/x.cif")
            .title("with restraint")
            .build()
            .unwrap();
        assert_eq!(config.title.as_deref(), Some("with restraint"));
        assert_eq!(config.description, None);
        assert_eq!(config.source.format, "mmcif");
        assert_eq!(config.source.assembly_id.as_deref(), Some("1"));
        assert_eq!(config.macromolecule, MacromoleculeStyle::default());
        assert_eq!(config.selection, RestraintSelection::All);
    }

    #[test]
    fn builder_can_drop_assembly() {
        let config = VisualizationConfigBuilder::new()
            .source_url("u")
            .assembly_id(None)
            .build()
            .unwrap();
        assert!(config.source.assembly_id.is_none());
    }
}
