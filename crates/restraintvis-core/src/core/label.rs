//! Distance-label templating.
//!
//! A label template mixes two kinds of placeholders:
//!
//! - `{restraint_symbol}`, `{restraint_type}` and `{distance}` are filled in
//!   here from the restraint's metadata.
//! - `{{...}}` blocks are left untouched. The viewer substitutes them at render
//!   time with values measured on the live structure, e.g. `{{distance}}`.

use phf::{Map, phf_map};
use thiserror::Error;

pub const UNKNOWN_SYMBOL: &str = "?";

static RESTRAINT_TYPE_TO_SYMBOL: Map<&'static str, &'static str> = phf_map! {
    "upper bound" => "<",
    "lower bound" => ">",
    "harmonic" => "~",
};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LabelError {
    #[error("Unknown placeholder '{{{0}}}' in label template")]
    UnknownPlaceholder(String),
    #[error("Unclosed placeholder starting at byte {offset} of the label template")]
    UnclosedPlaceholder { offset: usize },
}

/// Comparison symbol for a restraint type keyword, `?` when unrecognized.
pub fn symbol_for(restraint_type: &str) -> &'static str {
    RESTRAINT_TYPE_TO_SYMBOL
        .get(restraint_type.trim().to_ascii_lowercase().as_str())
        .copied()
        .unwrap_or(UNKNOWN_SYMBOL)
}

pub fn format_label(
    template: &str,
    restraint_type: &str,
    distance: f64,
    precision: usize,
) -> Result<String, LabelError> {
    let mut out = String::with_capacity(template.len() + 8);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let offset = template.len() - tail.len();

        if let Some(inner) = tail.strip_prefix("{{") {
            let close = inner
                .find("}}")
                .ok_or(LabelError::UnclosedPlaceholder { offset })?;
            out.push_str(&tail[..close + 4]);
            rest = &inner[close + 2..];
            continue;
        }

        let close = tail
            .find('}')
            .ok_or(LabelError::UnclosedPlaceholder { offset })?;
        match &tail[1..close] {
            "restraint_symbol" => out.push_str(symbol_for(restraint_type)),
            "restraint_type" => out.push_str(restraint_type),
            "distance" => out.push_str(&format!("{:.*}", precision, distance)),
            other => return Err(LabelError::UnknownPlaceholder(other.to_string())),
        }
        rest = &tail[close + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Checks that a template only uses known placeholders and is well formed.
pub fn validate_template(template: &str) -> Result<(), LabelError> {
    format_label(template, "upper bound", 0.0, 1).map(|_| ())
}
