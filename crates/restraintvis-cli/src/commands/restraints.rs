use crate::cli::RestraintsArgs;
use crate::error::{CliError, Result};
use restraintvis::core::io::cif::CifFile;
use restraintvis::core::io::export::write_restraints_csv;
use restraintvis::core::models::restraint::RestraintRecord;
use restraintvis::engine::error::EngineError;
use restraintvis::engine::extract::extract_restraints;
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

pub fn run(args: RestraintsArgs) -> Result<()> {
    info!("Loading input structure from {:?}", &args.input);
    let container = CifFile::read_first_block(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;
    let records = extract_restraints(&container).map_err(EngineError::from)?;

    match &args.csv {
        Some(path) => {
            let file = File::create(path)?;
            write_restraints_csv(&records, BufWriter::new(file)).map_err(|e| {
                CliError::Output {
                    path: path.clone(),
                    source: e.into(),
                }
            })?;
            println!(
                "✓ {} restraint(s) written to: {}",
                records.len(),
                path.display()
            );
        }
        None => print!("{}", format_table(&records)),
    }
    Ok(())
}

fn format_table(records: &[RestraintRecord]) -> String {
    let mut out = format!(
        "{:>5}  {:<16} {:<16} {:>10}  {}\n",
        "#", "start", "end", "distance", "type"
    );
    for (index, r) in records.iter().enumerate() {
        out.push_str(&format!(
            "{:>5}  {:<16} {:<16} {:>10.2}  {}\n",
            index,
            r.start.to_string(),
            r.end.to_string(),
            r.distance_threshold,
            r.restraint_type.as_deref().unwrap_or("-")
        ));
    }
    out
}
