use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileMacromoleculeConfig, FileRestraintConfig};
use super::models::AppConfig;
use crate::cli::RenderArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use restraintvis::engine::config as core_config;
use restraintvis::workflows::visualize::default_output_path;

pub fn build_config(args: &RenderArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let macro_file = file_config.macromolecule.take().unwrap_or_default();
    let macromolecule = merge_macromolecule(args, macro_file, &defaults)?;

    let restraint_file = file_config.restraint.take().unwrap_or_default();
    let restraint = merge_restraint(args, restraint_file)?;

    let url_template = args
        .url_template
        .as_deref()
        .or(file_config.url_template.as_deref())
        .unwrap_or(&defaults.url_template);
    let structure_id = args
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            CliError::Argument(format!(
                "Input path has no file name: {}",
                args.input.display()
            ))
        })?;
    let source_url = core_config::download_url(url_template, &structure_id);

    let assembly_id = if args.deposited_model {
        None
    } else {
        Some(
            args.assembly_id
                .clone()
                .or(file_config.assembly_id)
                .unwrap_or(defaults.assembly_id),
        )
    };

    let title = args
        .title
        .clone()
        .or(file_config.title)
        .unwrap_or(defaults.title);
    let description = args.description.clone().or(file_config.description);

    let selection = if args.restraints.is_empty() {
        core_config::RestraintSelection::All
    } else {
        core_config::RestraintSelection::Indices(args.restraints.clone())
    };

    let mut core_builder = core_config::VisualizationConfigBuilder::new().title(title);
    if let Some(description) = description {
        core_builder = core_builder.description(description);
    }
    let core_config = core_builder
        .source_url(source_url)
        .assembly_id(assembly_id)
        .macromolecule(macromolecule)
        .restraint(restraint)
        .selection(selection)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_path: args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.input)),
        core_config,
    })
}

fn merge_macromolecule(
    args: &RenderArgs,
    file_val: FileMacromoleculeConfig,
    defaults: &DefaultsConfig,
) -> Result<core_config::MacromoleculeStyle> {
    let color = args
        .color
        .as_deref()
        .or(file_val.color.as_deref())
        .unwrap_or(&defaults.color);
    let representation = args
        .representation
        .as_deref()
        .or(file_val.representation.as_deref())
        .unwrap_or(&defaults.representation);

    Ok(core_config::MacromoleculeStyle {
        coloring: core_config::MacromoleculeColoring::from_setting(color)
            .map_err(|e| CliError::Config(e.to_string()))?,
        representation: parser::parse_representation(representation)?,
    })
}

fn merge_restraint(
    args: &RenderArgs,
    file_val: FileRestraintConfig,
) -> Result<core_config::RestraintStyle> {
    let defaults = core_config::RestraintStyle::default();

    let representation = match args
        .restraint_representation
        .as_deref()
        .or(file_val.representation.as_deref())
    {
        Some(name) => parser::parse_representation(name)?,
        None => defaults.representation,
    };

    let focus = if args.no_focus {
        false
    } else {
        file_val.focus.unwrap_or(defaults.focus)
    };
    let include_entity_id =
        args.entity_ids || file_val.include_entity_id.unwrap_or(defaults.include_entity_id);

    Ok(core_config::RestraintStyle {
        representation,
        residue_color: args
            .residue_color
            .clone()
            .or(file_val.residue_color)
            .unwrap_or(defaults.residue_color),
        line_color: args.line_color.clone().or(file_val.line_color),
        label_color: args.label_color.clone().or(file_val.label_color),
        radius: args.radius.or(file_val.radius).unwrap_or(defaults.radius),
        dash_length: args
            .dash_length
            .or(file_val.dash_length)
            .unwrap_or(defaults.dash_length),
        label_template: args
            .label_template
            .clone()
            .or(file_val.label_template)
            .unwrap_or(defaults.label_template),
        label_size: args.label_size.or(file_val.label_size),
        label_precision: args
            .label_precision
            .or(file_val.label_precision)
            .unwrap_or(defaults.label_precision),
        focus,
        include_entity_id,
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value) = parser::parse_key_value(kv_pair)?;

        match key {
            "title" => config.title = Some(value.to_string()),
            "description" => config.description = Some(value.to_string()),
            "url-template" => config.url_template = Some(value.to_string()),
            "assembly-id" => config.assembly_id = Some(value.to_string()),
            "macromolecule.color" => {
                config
                    .macromolecule
                    .get_or_insert_with(Default::default)
                    .color = Some(value.to_string());
            }
            "macromolecule.representation" => {
                config
                    .macromolecule
                    .get_or_insert_with(Default::default)
                    .representation = Some(value.to_string());
            }
            _ => {
                let Some(field) = key.strip_prefix("restraint.") else {
                    return Err(unsupported(key));
                };
                apply_restraint_value(
                    config.restraint.get_or_insert_with(Default::default),
                    key,
                    field,
                    value,
                )?;
            }
        }
    }
    Ok(config)
}

fn apply_restraint_value(
    restraint: &mut FileRestraintConfig,
    key: &str,
    field: &str,
    value: &str,
) -> Result<()> {
    match field {
        "representation" => restraint.representation = Some(value.to_string()),
        "residue-color" => restraint.residue_color = Some(value.to_string()),
        "line-color" => restraint.line_color = Some(value.to_string()),
        "label-color" => restraint.label_color = Some(value.to_string()),
        "label-template" => restraint.label_template = Some(value.to_string()),
        "radius" => restraint.radius = Some(parser::parse_value(key, value, "float")?),
        "dash-length" => restraint.dash_length = Some(parser::parse_value(key, value, "float")?),
        "label-size" => restraint.label_size = Some(parser::parse_value(key, value, "float")?),
        "label-precision" => {
            restraint.label_precision = Some(parser::parse_value(key, value, "integer")?)
        }
        "focus" => restraint.focus = Some(parser::parse_value(key, value, "boolean")?),
        "include-entity-id" => {
            restraint.include_entity_id = Some(parser::parse_value(key, value, "boolean")?)
        }
        _ => return Err(unsupported(key)),
    }
    Ok(())
}

fn unsupported(key: &str) -> CliError {
    CliError::Config(format!(
        "Unsupported configuration key for --set: '{}'",
        key
    ))
}
