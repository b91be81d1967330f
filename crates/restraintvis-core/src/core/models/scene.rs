//! Declarative scene elements and the serialized MolViewSpec document.

use crate::core::color::HexColor;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Predicate over `label_*` identifiers selecting part of a structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentExpression {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_entity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_asym_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beg_label_seq_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_label_seq_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_atom_id: Option<String>,
}

impl ComponentExpression {
    pub fn chain(asym_id: impl Into<String>) -> Self {
        Self {
            label_asym_id: Some(asym_id.into()),
            ..Self::default()
        }
    }

    pub fn residue(asym_id: impl Into<String>, seq_id: i32) -> Self {
        Self {
            label_asym_id: Some(asym_id.into()),
            beg_label_seq_id: Some(seq_id),
            end_label_seq_id: Some(seq_id),
            ..Self::default()
        }
    }

    pub fn with_atom(mut self, atom_id: impl Into<String>) -> Self {
        self.label_atom_id = Some(atom_id.into());
        self
    }

    pub fn with_entity(mut self, entity_id: impl Into<String>) -> Self {
        self.label_entity_id = Some(entity_id.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StaticSelector {
    Polymer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Selector {
    Static(StaticSelector),
    Expression(ComponentExpression),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepresentationKind {
    Cartoon,
    BallAndStick,
    Spacefill,
    Carbohydrate,
    Surface,
}

impl RepresentationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cartoon => "cartoon",
            Self::BallAndStick => "ball_and_stick",
            Self::Spacefill => "spacefill",
            Self::Carbohydrate => "carbohydrate",
            Self::Surface => "surface",
        }
    }
}

impl fmt::Display for RepresentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "Unknown representation '{0}'. Expected one of: cartoon, ball-and-stick, spacefill, carbohydrate, surface."
)]
pub struct ParseRepresentationError(String);

impl FromStr for RepresentationKind {
    type Err = ParseRepresentationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "cartoon" => Ok(Self::Cartoon),
            "ball_and_stick" => Ok(Self::BallAndStick),
            "spacefill" => Ok(Self::Spacefill),
            "carbohydrate" => Ok(Self::Carbohydrate),
            "surface" => Ok(Self::Surface),
            _ => Err(ParseRepresentationError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Representation {
    pub kind: RepresentationKind,
    pub color: HexColor,
}

/// A component selection with the single representation drawn for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentElement {
    pub selector: Selector,
    pub representation: Representation,
}

/// A dashed distance line between two atom-level selections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistancePrimitive {
    pub start: ComponentExpression,
    pub end: ComponentExpression,
    pub color: HexColor,
    pub radius: f64,
    pub dash_length: f64,
    pub label_template: String,
    pub label_color: HexColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_size: Option<f64>,
}

/// An indivisible group of elements appended to a scene together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneFragment {
    pub components: Vec<ComponentElement>,
    pub primitives: Vec<DistancePrimitive>,
    /// Whether the camera should center on this fragment's last primitive.
    pub focus: bool,
}

impl SceneFragment {
    pub fn representation_count(&self) -> usize {
        self.components.len()
    }
}

/// One node of the MolViewSpec tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            params: None,
            children: Vec::new(),
        }
    }

    pub fn with_params(kind: &'static str, params: serde_json::Value) -> Self {
        Self {
            kind,
            params: Some(params),
            children: Vec::new(),
        }
    }

    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    /// Depth-first count of nodes of `kind`, this node included.
    pub fn count_kind(&self, kind: &str) -> usize {
        let own = usize::from(self.kind == kind);
        own + self.children.iter().map(|c| c.count_kind(kind)).sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// The final scene, ready to be written as MolViewSpec JSON (`.mvsj`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDocument {
    pub root: Node,
    pub metadata: Metadata,
}

impl SceneDocument {
    /// Indented JSON. Object keys and element order are stable, so equal
    /// documents always produce identical text.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut json = self.to_json()?;
        json.push('\n');
        std::fs::write(path, json)
    }
}
