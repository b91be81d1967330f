use super::config::StructureSource;
use super::error::EngineError;
use crate::core::models::scene::{
    ComponentElement, DistancePrimitive, Metadata, Node, SceneDocument, SceneFragment, Selector,
};
use serde_json::{Value, json};
use tracing::debug;

pub const MVS_VERSION: &str = "1";

#[derive(Debug, Clone, PartialEq)]
enum SceneElement {
    Component(ComponentElement),
    Primitive(DistancePrimitive),
}

/// Accumulates scene fragments and turns them into a MolViewSpec document.
///
/// Elements keep their insertion order, which is also the order they are
/// serialized in. Nothing is removed or rewritten once added, except that the
/// focus marker moves to the most recent focused primitive.
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    source: StructureSource,
    title: Option<String>,
    description: Option<String>,
    elements: Vec<SceneElement>,
    focus: Option<usize>,
}

impl SceneBuilder {
    pub fn new(source: StructureSource) -> Self {
        Self {
            source,
            title: None,
            description: None,
            elements: Vec::new(),
            focus: None,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Appends a whole fragment: its components first, then its primitives.
    pub fn add_fragment(&mut self, fragment: SceneFragment) {
        self.elements
            .extend(fragment.components.into_iter().map(SceneElement::Component));
        for primitive in fragment.primitives {
            self.elements.push(SceneElement::Primitive(primitive));
            if fragment.focus {
                self.focus = Some(self.elements.len() - 1);
            }
        }
    }

    pub fn component_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, SceneElement::Component(_)))
            .count()
    }

    pub fn primitive_count(&self) -> usize {
        self.elements.len() - self.component_count()
    }

    pub fn has_focus(&self) -> bool {
        self.focus.is_some()
    }

    fn structure_node(&self) -> Node {
        let params = match &self.source.assembly_id {
            Some(id) => json!({ "type": "assembly", "assembly_id": id }),
            None => json!({ "type": "model" }),
        };
        Node::with_params("structure", params)
    }

    fn component_node(element: &ComponentElement) -> Result<Node, EngineError> {
        let selector = match &element.selector {
            Selector::Static(s) => serde_json::to_value(s)?,
            Selector::Expression(expr) => serde_json::to_value(expr)?,
        };
        let representation = &element.representation;
        Ok(Node::with_params("component", json!({ "selector": selector })).child(
            Node::with_params(
                "representation",
                json!({ "type": representation.kind.as_str() }),
            )
            .child(Node::with_params(
                "color",
                json!({ "color": representation.color }),
            )),
        ))
    }

    fn primitives_node(primitive: &DistancePrimitive, focused: bool) -> Result<Node, EngineError> {
        let mut params = serde_json::to_value(primitive)?;
        if let Value::Object(map) = &mut params {
            map.insert("kind".into(), json!("distance_measurement"));
        }
        let mut node = Node::new("primitives").child(Node::with_params("primitive", params));
        if focused {
            node = node.child(Node::new("focus"));
        }
        Ok(node)
    }

    /// Builds the document tree. Calling this twice on the same builder gives
    /// equal documents.
    pub fn serialize(&self) -> Result<SceneDocument, EngineError> {
        let mut structure = self.structure_node();
        for (index, element) in self.elements.iter().enumerate() {
            let node = match element {
                SceneElement::Component(c) => Self::component_node(c)?,
                SceneElement::Primitive(p) => Self::primitives_node(p, self.focus == Some(index))?,
            };
            structure = structure.child(node);
        }

        let root = Node::new("root").child(
            Node::with_params("download", json!({ "url": self.source.url })).child(
                Node::with_params("parse", json!({ "format": self.source.format }))
                    .child(structure),
            ),
        );
        debug!(
            components = self.component_count(),
            primitives = self.primitive_count(),
            "Serialized scene document"
        );

        Ok(SceneDocument {
            root,
            metadata: Metadata {
                version: MVS_VERSION,
                title: self.title.clone(),
                description: self.description.clone(),
                timestamp: None,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::resolve_color;
    use crate::core::models::scene::{
        ComponentExpression, Representation, RepresentationKind, StaticSelector,
    };

    fn source() -> StructureSource {
        StructureSource::new("https://example.org/x.cif")
    }

    fn polymer() -> SceneFragment {
        SceneFragment {
            components: vec![ComponentElement {
                selector: Selector::Static(StaticSelector::Polymer),
                representation: Representation {
                    kind: RepresentationKind::Cartoon,
                    color: resolve_color("grey").unwrap(),
                },
            }],
            primitives: Vec::new(),
            focus: false,
        }
    }

    fn line(seq: i32, focus: bool) -> SceneFragment {
        let color = resolve_color("red").unwrap();
        SceneFragment {
            components: Vec::new(),
            primitives: vec![DistancePrimitive {
                start: ComponentExpression::residue("A", seq).with_atom("CA"),
                end: ComponentExpression::residue("B", seq).with_atom("CA"),
                color: color.clone(),
                radius: 0.1,
                dash_length: 0.1,
                label_template: format!("line {}", seq),
                label_color: color,
                label_size: None,
            }],
            focus,
        }
    }

    fn structure_children(doc: &SceneDocument) -> &[Node] {
        &doc.root.children[0].children[0].children[0].children
    }

    #[test]
    fn root_chain_is_download_parse_structure() {
        let doc = SceneBuilder::new(source()).serialize().unwrap();
        let download = &doc.root.children[0];
        assert_eq!(download.kind, "download");
        assert_eq!(
            download.params,
            Some(json!({ "url": "https://example.org/x.cif" }))
        );
        let parse = &download.children[0];
        assert_eq!(parse.params, Some(json!({ "format": "mmcif" })));
        let structure = &parse.children[0];
        assert_eq!(
            structure.params,
            Some(json!({ "type": "assembly", "assembly_id": "1" }))
        );
    }

    #[test]
    fn structure_without_assembly_is_model() {
        let mut source = source();
        source.assembly_id = None;
        let doc = SceneBuilder::new(source).serialize().unwrap();
        assert_eq!(
            doc.root.children[0].children[0].children[0].params,
            Some(json!({ "type": "model" }))
        );
    }

    #[test]
    fn component_nests_representation_and_color() {
        let mut builder = SceneBuilder::new(source());
        builder.add_fragment(polymer());
        let doc = builder.serialize().unwrap();
        let component = &structure_children(&doc)[0];
        assert_eq!(component.params, Some(json!({ "selector": "polymer" })));
        let representation = &component.children[0];
        assert_eq!(representation.params, Some(json!({ "type": "cartoon" })));
        assert_eq!(
            representation.children[0].params,
            Some(json!({ "color": "#808080" }))
        );
    }

    #[test]
    fn primitive_is_distance_measurement() {
        let mut builder = SceneBuilder::new(source());
        builder.add_fragment(line(5, false));
        let doc = builder.serialize().unwrap();
        let primitives = &structure_children(&doc)[0];
        assert_eq!(primitives.kind, "primitives");
        let params = primitives.children[0].params.as_ref().unwrap();
        assert_eq!(params["kind"], "distance_measurement");
        assert_eq!(params["start"]["beg_label_seq_id"], 5);
        assert_eq!(params["color"], "#ff0000");
        assert!(params.get("label_size").is_none());
        assert_eq!(doc.root.count_kind("focus"), 0);
    }

    #[test]
    fn fragments_keep_insertion_order() {
        let mut builder = SceneBuilder::new(source());
        builder.add_fragment(polymer());
        builder.add_fragment(line(1, false));
        builder.add_fragment(line(2, false));
        assert_eq!(builder.component_count(), 1);
        assert_eq!(builder.primitive_count(), 2);

        let doc = builder.serialize().unwrap();
        let kinds: Vec<_> = structure_children(&doc).iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec!["component", "primitives", "primitives"]);
        let second = structure_children(&doc)[2].children[0].params.as_ref().unwrap();
        assert_eq!(second["label_template"], "line 2");
    }

    #[test]
    fn later_focus_replaces_earlier_one() {
        let mut builder = SceneBuilder::new(source());
        builder.add_fragment(line(1, true));
        builder.add_fragment(line(2, true));
        builder.add_fragment(line(3, false));
        assert!(builder.has_focus());

        let doc = builder.serialize().unwrap();
        assert_eq!(doc.root.count_kind("focus"), 1);
        let children = structure_children(&doc);
        assert_eq!(children[0].children.len(), 1);
        assert_eq!(children[1].children[1].kind, "focus");
        assert_eq!(children[2].children.len(), 1);
    }

    #[test]
    fn metadata_carries_title_without_timestamp() {
        let mut builder = SceneBuilder::new(source());
        builder.set_title("with restraint");
        let doc = builder.serialize().unwrap();
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value["metadata"],
            json!({ "version": "1", "title": "with restraint" })
        );
    }

    #[test]
    fn metadata_carries_description_when_set() {
        let mut builder = SceneBuilder::new(source());
        builder.set_description("two cross-links");
        let value = serde_json::to_value(builder.serialize().unwrap()).unwrap();
        assert_eq!(value["metadata"]["description"], "two cross-links");
        assert!(value["metadata"].get("title").is_none());
    }

    #[test]
    fn serialization_is_deterministic() {
        let mut builder = SceneBuilder::new(source());
        builder.add_fragment(polymer());
        builder.add_fragment(line(4, true));
        let first = builder.serialize().unwrap().to_json().unwrap();
        let second = builder.serialize().unwrap().to_json().unwrap();
        assert_eq!(first, second);
    }
}
