use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use ws22_explore::DatasetStore;
use ws22_explore::io::Format;
use ws22_explore::io::xyz::writer::write as write_xyz;

use crate::cli::StructureArgs;
use crate::config::{build_source, parse_molecule};
use crate::display::{Context as DisplayContext, Progress, print_structure_summary};
use crate::io::{create_output, infer_output_format};

const TOTAL_STEPS: u8 = 2;

pub fn run_structure(args: StructureArgs, ctx: DisplayContext) -> Result<()> {
    let molecule = parse_molecule(&args.molecule)?;
    if args.geometry == 0 {
        bail!("Conformation numbers are 1-based; use 1 for the first geometry.");
    }
    let outputs = resolve_outputs(&args)?;

    let source = build_source(&args.source);
    let origin_substep = super::origin_substep(&source, molecule);

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Loading dataset");
    let mut store = DatasetStore::new(source);
    let dataset = store
        .load(molecule)
        .with_context(|| format!("Failed to load the {} dataset", molecule))?;

    let total = dataset.conformation_count();
    let shape = format!("{} conformations of {} atoms", total, dataset.atom_count());
    progress.complete_step("Loading dataset", &[origin_substep.as_str(), shape.as_str()]);

    progress.step("Exporting structure");
    let geometry = dataset
        .geometry(args.geometry - 1)
        .with_context(|| format!("Failed to select conformation {}", args.geometry))?;

    let mut export_substeps = vec![format!("Select conformation {} of {}", args.geometry, total)];
    for target in &outputs {
        let writer = create_output(target.as_deref())?;
        write_xyz(writer, &geometry).context("Failed to write XYZ structure")?;

        let path_str = target
            .as_ref()
            .map(|p| {
                p.file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .into_owned()
            })
            .unwrap_or_else(|| "stdout".to_string());
        export_substeps.push(format!("Write XYZ → {}", path_str));
    }

    let export_substeps_ref: Vec<&str> = export_substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Exporting structure", &export_substeps_ref);

    if ctx.interactive {
        print_structure_summary(&geometry, args.geometry, total);
    }

    progress.finish();

    Ok(())
}

fn resolve_outputs(args: &StructureArgs) -> Result<Vec<Option<PathBuf>>> {
    if args.io.output.is_empty() {
        return Ok(vec![None]);
    }

    let mut outputs = Vec::with_capacity(args.io.output.len());
    for path in &args.io.output {
        match infer_output_format(path) {
            Some(Format::Xyz) => outputs.push(Some(path.clone())),
            Some(other) => bail!(
                "Structures export as XYZ, not {}: {}",
                other,
                path.display()
            ),
            None => bail!(
                "Cannot infer format from '{}'. Use a .xyz extension.",
                path.display()
            ),
        }
    }

    Ok(outputs)
}
