use anyhow::{Context, Result};

use ws22_explore::DatasetStore;

use crate::cli::InfoArgs;
use crate::config::{build_source, parse_molecule};
use crate::display::{
    Context as DisplayContext, Progress, print_dataset_summary, print_element_distribution,
    print_family_distribution, print_field_shapes,
};

const TOTAL_STEPS: u8 = 1;

pub fn run_info(args: InfoArgs, ctx: DisplayContext) -> Result<()> {
    let molecule = parse_molecule(&args.molecule)?;
    let source = build_source(&args.source);
    let origin = super::source_label(&source, molecule);
    let origin_substep = super::origin_substep(&source, molecule);

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Loading dataset");
    let mut store = DatasetStore::new(source);
    let dataset = store
        .load(molecule)
        .with_context(|| format!("Failed to load the {} dataset", molecule))?;

    let shape = format!(
        "{} conformations of {} atoms",
        dataset.conformation_count(),
        dataset.atom_count()
    );
    progress.complete_step("Loading dataset", &[origin_substep.as_str(), shape.as_str()]);

    print_dataset_summary(&dataset, molecule, &origin)?;
    print_field_shapes(&dataset)?;
    print_element_distribution(&dataset)?;
    print_family_distribution(&dataset)?;

    progress.finish();

    Ok(())
}
