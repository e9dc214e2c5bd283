mod geometry;
mod info;
mod list;
mod property;
mod structure;

use geometry::run_geometry;
use info::run_info;
use list::run_list;
use property::run_property;
use structure::run_structure;

use anyhow::Result;

use ws22_explore::io::fetch::archive_url;
use ws22_explore::{DatasetSource, Molecule};

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::List(args) => run_list(args),
        Command::Info(args) => run_info(args, ctx),
        Command::Property(args) => run_property(args, ctx),
        Command::Geometry(args) => run_geometry(args, ctx),
        Command::Structure(args) => run_structure(args, ctx),
    }
}

/// Where a molecule's archive comes from, as shown to the user.
fn source_label(source: &DatasetSource, molecule: Molecule) -> String {
    match source {
        DatasetSource::Zenodo { base_url } => archive_url(base_url, molecule),
        DatasetSource::Local { dir } => dir.join(molecule.archive_name()).display().to_string(),
    }
}

fn origin_substep(source: &DatasetSource, molecule: Molecule) -> String {
    let label = source_label(source, molecule);
    match source {
        DatasetSource::Zenodo { .. } => format!("Fetch {}", label),
        DatasetSource::Local { .. } => format!("Read {}", label),
    }
}
