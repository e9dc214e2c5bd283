use std::io::{self, Write};

use anyhow::Result;

use ws22_explore::Molecule;

use crate::cli::ListArgs;
use crate::config::build_source;

pub fn run_list(args: ListArgs) -> Result<()> {
    let source = build_source(&args.source);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for molecule in Molecule::ALL {
        let location = super::source_label(&source, molecule);
        writeln!(
            out,
            "{:<14} {:<22} {}",
            molecule.name(),
            molecule.archive_name(),
            location
        )?;
    }

    Ok(())
}
