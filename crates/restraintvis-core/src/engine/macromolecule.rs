use super::config::{MacromoleculeColoring, MacromoleculeStyle};
use super::error::EngineError;
use crate::core::color::{self, HexColor};
use crate::core::models::scene::{
    ComponentElement, ComponentExpression, Representation, RepresentationKind, SceneFragment,
    Selector, StaticSelector,
};
use tracing::{debug, instrument, warn};

/// Builds the base layer of the scene: the whole macromolecule, either in one
/// color or split into per-chain components.
///
/// `chain_ids` is only consulted for per-chain and mapped coloring.
#[instrument(skip_all)]
pub fn render_macromolecule(
    chain_ids: &[String],
    style: &MacromoleculeStyle,
) -> Result<SceneFragment, EngineError> {
    let components = match &style.coloring {
        MacromoleculeColoring::ByChain => render_by_chain(chain_ids, style.representation),
        MacromoleculeColoring::Named(name) => {
            vec![render_uniform(name, style.representation)?]
        }
        MacromoleculeColoring::Mapping(pairs) => {
            render_mapping(chain_ids, pairs, style.representation)?
        }
    };
    debug!("Macromolecule rendered as {} component(s).", components.len());

    Ok(SceneFragment {
        components,
        primitives: Vec::new(),
        focus: false,
    })
}

fn chain_component(chain: &str, kind: RepresentationKind, color: HexColor) -> ComponentElement {
    ComponentElement {
        selector: Selector::Expression(ComponentExpression::chain(chain)),
        representation: Representation { kind, color },
    }
}

/// One component per chain, colored by evenly sampling the qualitative palette
/// in chain-table order.
pub fn render_by_chain(chain_ids: &[String], kind: RepresentationKind) -> Vec<ComponentElement> {
    chain_ids
        .iter()
        .zip(color::sample_colors(chain_ids.len()))
        .map(|(chain, color)| chain_component(chain, kind, color))
        .collect()
}

pub fn render_uniform(name: &str, kind: RepresentationKind) -> Result<ComponentElement, EngineError> {
    Ok(ComponentElement {
        selector: Selector::Static(StaticSelector::Polymer),
        representation: Representation {
            kind,
            color: color::resolve_color(name)?,
        },
    })
}

/// Chains listed in the mapping get their color; unlisted chains are left out.
pub fn render_mapping(
    chain_ids: &[String],
    pairs: &[(String, String)],
    kind: RepresentationKind,
) -> Result<Vec<ComponentElement>, EngineError> {
    for (chain, _) in pairs {
        if !chain_ids.contains(chain) {
            warn!(chain = %chain, "Color mapping names a chain that is not in the structure.");
        }
    }

    let mut components = Vec::new();
    for chain in chain_ids {
        match pairs.iter().find(|(c, _)| c == chain) {
            Some((_, name)) => {
                components.push(chain_component(chain, kind, color::resolve_color(name)?))
            }
            None => debug!(chain = %chain, "Chain has no mapped color, skipping."),
        }
    }
    Ok(components)
}
