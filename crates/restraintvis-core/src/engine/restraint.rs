use super::config::RestraintStyle;
use super::error::EngineError;
use crate::core::color::{HexColor, resolve_color};
use crate::core::label::format_label;
use crate::core::models::restraint::{RestraintEndpoint, RestraintRecord};
use crate::core::models::scene::{
    ComponentElement, ComponentExpression, DistancePrimitive, Representation, SceneFragment,
    Selector,
};
use tracing::trace;

/// Renders restraints with one style. Colors are resolved once up front so a
/// bad color name fails before any restraint is drawn.
#[derive(Debug, Clone)]
pub struct RestraintRenderer<'a> {
    style: &'a RestraintStyle,
    residue_color: HexColor,
    line_color: HexColor,
    label_color: HexColor,
}

impl<'a> RestraintRenderer<'a> {
    pub fn new(style: &'a RestraintStyle) -> Result<Self, EngineError> {
        let residue_color = resolve_color(&style.residue_color)?;
        let line_color = match &style.line_color {
            Some(name) => resolve_color(name)?,
            None => residue_color.clone(),
        };
        let label_color = match &style.label_color {
            Some(name) => resolve_color(name)?,
            None => residue_color.clone(),
        };
        Ok(Self {
            style,
            residue_color,
            line_color,
            label_color,
        })
    }

    fn residue_selection(&self, endpoint: &RestraintEndpoint) -> ComponentExpression {
        let expr = ComponentExpression::residue(endpoint.asym_id.as_str(), endpoint.seq_id);
        match (&endpoint.entity_id, self.style.include_entity_id) {
            (Some(entity), true) => expr.with_entity(entity.as_str()),
            _ => expr,
        }
    }

    fn residue_component(&self, endpoint: &RestraintEndpoint) -> ComponentElement {
        ComponentElement {
            selector: Selector::Expression(self.residue_selection(endpoint)),
            representation: Representation {
                kind: self.style.representation,
                color: self.residue_color.clone(),
            },
        }
    }

    /// Both endpoint residues, highlighted, plus a labeled dashed line between
    /// the two restraint atoms.
    pub fn render(&self, record: &RestraintRecord) -> Result<SceneFragment, EngineError> {
        let label_template = format_label(
            &self.style.label_template,
            record.restraint_type_or_empty(),
            record.distance_threshold,
            self.style.label_precision,
        )?;

        let primitive = DistancePrimitive {
            start: self
                .residue_selection(&record.start)
                .with_atom(record.start.atom_id.as_str()),
            end: self
                .residue_selection(&record.end)
                .with_atom(record.end.atom_id.as_str()),
            color: self.line_color.clone(),
            radius: self.style.radius,
            dash_length: self.style.dash_length,
            label_template,
            label_color: self.label_color.clone(),
            label_size: self.style.label_size,
        };
        trace!(start = %record.start, end = %record.end, "Rendered restraint");

        Ok(SceneFragment {
            components: vec![
                self.residue_component(&record.start),
                self.residue_component(&record.end),
            ],
            primitives: vec![primitive],
            focus: self.style.focus,
        })
    }
}

pub fn render_restraint(
    record: &RestraintRecord,
    style: &RestraintStyle,
) -> Result<SceneFragment, EngineError> {
    RestraintRenderer::new(style)?.render(record)
}
