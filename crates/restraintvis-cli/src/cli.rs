use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "restraintvis - Render the distance restraints of integrative structure models as MolViewSpec scenes.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a MolViewSpec scene (.mvsj) showing the structure and its cross-link restraints.
    Render(RenderArgs),
    /// List the cross-link restraints found in a structure file.
    Restraints(RestraintsArgs),
}

/// Arguments for the `render` subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    // --- Core Arguments ---
    /// Path to the input mmCIF file containing `ihm_cross_link_restraint`.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output scene. Defaults to `<first 4 chars of input>_restraint.mvsj`.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Scene title stored in the document metadata.
    #[arg(short, long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Scene description stored in the document metadata.
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    // --- Structure Source ---
    /// URL template the viewer downloads the structure from; `{id}` is replaced
    /// by the input file name.
    #[arg(long, value_name = "TEMPLATE")]
    pub url_template: Option<String>,

    /// Assembly to display.
    #[arg(long, value_name = "ID", conflicts_with = "deposited_model")]
    pub assembly_id: Option<String>,

    /// Display the deposited model instead of an assembly.
    #[arg(long)]
    pub deposited_model: bool,

    // --- Macromolecule Overrides ---
    /// Macromolecule coloring: `chains`, a color name or hex code, or a
    /// per-chain mapping such as `A=red,B=#00ff00`.
    #[arg(long, value_name = "COLOR")]
    pub color: Option<String>,

    /// Macromolecule representation (cartoon, ball-and-stick, spacefill, carbohydrate, surface).
    #[arg(long, value_name = "STYLE")]
    pub representation: Option<String>,

    // --- Restraint Overrides ---
    /// Representation of the restrained residues.
    #[arg(long, value_name = "STYLE")]
    pub restraint_representation: Option<String>,

    /// Color of the restrained residues.
    #[arg(long, value_name = "COLOR")]
    pub residue_color: Option<String>,

    /// Color of the distance line. Defaults to the residue color.
    #[arg(long, value_name = "COLOR")]
    pub line_color: Option<String>,

    /// Color of the distance label. Defaults to the residue color.
    #[arg(long, value_name = "COLOR")]
    pub label_color: Option<String>,

    /// Radius of the distance line.
    #[arg(long, value_name = "FLOAT")]
    pub radius: Option<f64>,

    /// Dash length of the distance line.
    #[arg(long, value_name = "FLOAT")]
    pub dash_length: Option<f64>,

    /// Label text. `{restraint_symbol}`, `{restraint_type}` and `{distance}` are
    /// filled from the restraint; `{{distance}}` is left for the viewer.
    #[arg(long, value_name = "TEMPLATE")]
    pub label_template: Option<String>,

    /// Size of the distance label.
    #[arg(long, value_name = "FLOAT")]
    pub label_size: Option<f64>,

    /// Decimal places of the restraint distance in labels.
    #[arg(long, value_name = "INT")]
    pub label_precision: Option<usize>,

    /// Do not move the camera to the last restraint.
    #[arg(long)]
    pub no_focus: bool,

    /// Also match restraint endpoints by entity id.
    #[arg(long)]
    pub entity_ids: bool,

    /// Render only these restraint rows (zero-based). Can be used multiple times.
    #[arg(short, long = "restraint", value_name = "INDEX")]
    pub restraints: Vec<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S restraint.radius=0.2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `restraints` subcommand.
#[derive(Args, Debug)]
pub struct RestraintsArgs {
    /// Path to the input mmCIF file.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Write the restraints as CSV to this path instead of printing a table.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}
