use crate::core::io::cif::Container;
use crate::core::models::restraint::RestraintRecord;
use crate::core::models::scene::SceneDocument;
use crate::engine::config::{MacromoleculeColoring, RestraintSelection, VisualizationConfig};
use crate::engine::error::EngineError;
use crate::engine::extract::{chain_ids, extract_restraints};
use crate::engine::macromolecule::render_macromolecule;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::restraint::RestraintRenderer;
use crate::engine::scene::SceneBuilder;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const OUTPUT_SUFFIX: &str = "_restraint.mvsj";

#[derive(Debug, Clone)]
pub struct VisualizationResult {
    pub document: SceneDocument,
    /// The restraints drawn, in drawing order.
    pub restraints: Vec<RestraintRecord>,
}

#[instrument(skip_all, name = "visualization_workflow")]
pub fn run(
    container: &Container,
    config: &VisualizationConfig,
    reporter: &ProgressReporter,
) -> Result<VisualizationResult, EngineError> {
    // === Phase 1: Extraction ===
    reporter.report(Progress::PhaseStart { name: "Extraction" });
    let all = extract_restraints(container)?;
    let restraints = select(all, &config.selection)?;
    reporter.report(Progress::PhaseFinish);
    info!("Selected {} restraint(s) for rendering.", restraints.len());
    if restraints.is_empty() {
        reporter.message("No cross-link restraints to draw; the scene shows the structure only.");
    }

    // === Phase 2: Base structure ===
    reporter.report(Progress::PhaseStart {
        name: "Macromolecule",
    });
    let chains = match config.macromolecule.coloring {
        MacromoleculeColoring::Named(_) => Vec::new(),
        MacromoleculeColoring::ByChain | MacromoleculeColoring::Mapping(_) => {
            chain_ids(container)?
        }
    };
    if let MacromoleculeColoring::Mapping(pairs) = &config.macromolecule.coloring {
        for (chain, _) in pairs.iter().filter(|(chain, _)| !chains.contains(chain)) {
            reporter.message(format!(
                "Chain '{}' is not in the structure; its color is unused.",
                chain
            ));
        }
    }
    let mut builder = SceneBuilder::new(config.source.clone());
    if let Some(title) = &config.title {
        builder.set_title(title.as_str());
    }
    if let Some(description) = &config.description {
        builder.set_description(description.as_str());
    }
    builder.add_fragment(render_macromolecule(&chains, &config.macromolecule)?);
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Restraints ===
    reporter.report(Progress::PhaseStart { name: "Restraints" });
    reporter.report(Progress::RestraintsFound {
        count: restraints.len() as u64,
    });
    let renderer = RestraintRenderer::new(&config.restraint)?;
    for (index, record) in restraints.iter().enumerate() {
        builder.add_fragment(renderer.render(record)?);
        reporter.report(Progress::RestraintRendered { index });
    }
    reporter.report(Progress::RenderingFinished);
    reporter.report(Progress::PhaseFinish);

    let document = builder.serialize()?;
    info!(
        components = builder.component_count(),
        primitives = builder.primitive_count(),
        "Scene document built."
    );

    Ok(VisualizationResult {
        document,
        restraints,
    })
}

fn select(
    records: Vec<RestraintRecord>,
    selection: &RestraintSelection,
) -> Result<Vec<RestraintRecord>, EngineError> {
    match selection {
        RestraintSelection::All => Ok(records),
        RestraintSelection::Indices(indices) => indices
            .iter()
            .map(|&index| {
                records
                    .get(index)
                    .cloned()
                    .ok_or(EngineError::RestraintIndexOutOfRange {
                        index,
                        count: records.len(),
                    })
            })
            .collect(),
    }
}

/// `<first four characters of the file stem>_restraint.mvsj`, relative to the
/// working directory.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let prefix: String = stem.chars().take(4).collect();
    PathBuf::from(format!("{}{}", prefix, OUTPUT_SUFFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::cif::parse_str;
    use crate::engine::config::{MacromoleculeStyle, VisualizationConfigBuilder};
    use crate::engine::extract::ExtractError;
    use std::sync::{Arc, Mutex};

    const DOC: &str = "data_demo
loop_
_struct_asym.id
_struct_asym.entity_id
A 1
B 2
loop_
_ihm_cross_link_restraint.id
_ihm_cross_link_restraint.asym_id_1
_ihm_cross_link_restraint.seq_id_1
_ihm_cross_link_restraint.atom_id_1
_ihm_cross_link_restraint.asym_id_2
_ihm_cross_link_restraint.seq_id_2
_ihm_cross_link_restraint.atom_id_2
_ihm_cross_link_restraint.distance_threshold
_ihm_cross_link_restraint.restraint_type
1 A 5 . B 12 . 25.0 'upper bound'
2 A 7 . B 3 . 18.5 'lower bound'
";

    fn container() -> Container {
        parse_str(DOC).unwrap().remove(0)
    }

    fn config() -> VisualizationConfigBuilder {
        VisualizationConfigBuilder::new()
            .source_url("https://pdb-ihm.org/cif/demo.cif")
            .title("with restraint")
    }

    #[test]
    fn renders_every_restraint_by_default() {
        let config = config().build().unwrap();
        let result = run(&container(), &config, &ProgressReporter::new()).unwrap();
        assert_eq!(result.restraints.len(), 2);
        let root = &result.document.root;
        // two chains plus two residues per restraint
        assert_eq!(root.count_kind("component"), 6);
        assert_eq!(root.count_kind("primitive"), 2);
        assert_eq!(root.count_kind("focus"), 1);
        assert_eq!(result.document.metadata.title.as_deref(), Some("with restraint"));
        assert_eq!(result.document.metadata.description, None);
    }

    #[test]
    fn description_is_written_to_metadata() {
        let config = config().description("PDBDEV_00000001").build().unwrap();
        let result = run(&container(), &config, &ProgressReporter::new()).unwrap();
        assert_eq!(
            result.document.metadata.description.as_deref(),
            Some("PDBDEV_00000001")
        );
    }

    #[test]
    fn selection_picks_rows_in_requested_order() {
        let config = config()
            .selection(RestraintSelection::Indices(vec![1, 0]))
            .build()
            .unwrap();
        let result = run(&container(), &config, &ProgressReporter::new()).unwrap();
        let ids: Vec<_> = result
            .restraints
            .iter()
            .map(|r| r.id.as_deref().unwrap())
            .collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn out_of_range_selection_fails() {
        let config = config()
            .selection(RestraintSelection::Indices(vec![5]))
            .build()
            .unwrap();
        assert!(matches!(
            run(&container(), &config, &ProgressReporter::new()),
            Err(EngineError::RestraintIndexOutOfRange { index: 5, count: 2 })
        ));
    }

    #[test]
    fn single_color_does_not_need_chain_table() {
        let doc = "data_x
loop_
_ihm_cross_link_restraint.asym_id_1
_ihm_cross_link_restraint.seq_id_1
_ihm_cross_link_restraint.asym_id_2
_ihm_cross_link_restraint.seq_id_2
_ihm_cross_link_restraint.distance_threshold
A 1 A 9 10
";
        let container = parse_str(doc).unwrap().remove(0);
        let by_chain = config().build().unwrap();
        assert!(matches!(
            run(&container, &by_chain, &ProgressReporter::new()),
            Err(EngineError::Extraction(ExtractError::MissingCategory { .. }))
        ));

        let uniform = config()
            .macromolecule(MacromoleculeStyle {
                coloring: MacromoleculeColoring::Named("grey".into()),
                ..MacromoleculeStyle::default()
            })
            .build()
            .unwrap();
        let result = run(&container, &uniform, &ProgressReporter::new()).unwrap();
        assert_eq!(result.document.root.count_kind("component"), 3);
    }

    #[test]
    fn progress_reports_each_restraint() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |p| {
            sink.lock().unwrap().push(p);
        }));
        run(&container(), &config().build().unwrap(), &reporter).unwrap();

        let events = events.lock().unwrap();
        let rendered = events
            .iter()
            .filter(|p| matches!(p, Progress::RestraintRendered { .. }))
            .count();
        assert_eq!(rendered, 2);
        assert!(
            events
                .iter()
                .any(|p| matches!(p, Progress::RestraintsFound { count: 2 }))
        );
    }

    fn collect_messages(container: &Container, config: &VisualizationConfig) -> Vec<String> {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = messages.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |p| {
            if let Progress::Message(text) = p {
                sink.lock().unwrap().push(text);
            }
        }));
        run(container, config, &reporter).unwrap();
        let messages = messages.lock().unwrap();
        messages.clone()
    }

    #[test]
    fn unknown_mapping_chains_are_reported() {
        let config = config()
            .macromolecule(MacromoleculeStyle {
                coloring: MacromoleculeColoring::Mapping(vec![
                    ("A".into(), "red".into()),
                    ("Z".into(), "blue".into()),
                ]),
                ..MacromoleculeStyle::default()
            })
            .build()
            .unwrap();
        let messages = collect_messages(&container(), &config);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("'Z'"));
    }

    #[test]
    fn empty_restraint_table_is_reported() {
        let doc = "data_x
_struct_asym.id A
loop_
_ihm_cross_link_restraint.asym_id_1
_ihm_cross_link_restraint.seq_id_1
_ihm_cross_link_restraint.asym_id_2
_ihm_cross_link_restraint.seq_id_2
_ihm_cross_link_restraint.distance_threshold
";
        let empty = parse_str(doc).unwrap().remove(0);
        let messages = collect_messages(&empty, &config().build().unwrap());
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("No cross-link restraints"));
        assert!(collect_messages(&container(), &config().build().unwrap()).is_empty());
    }

    #[test]
    fn default_output_path_uses_stem_prefix() {
        assert_eq!(
            default_output_path(Path::new("data/PDBDEV_00000001.cif")),
            PathBuf::from("PDBD_restraint.mvsj")
        );
        assert_eq!(
            default_output_path(Path::new("ab.cif")),
            PathBuf::from("ab_restraint.mvsj")
        );
    }
}
