use anyhow::{Context, Result, bail};

use ws22_explore::io::Format;
use ws22_explore::io::csv::writer::{
    write_stats as write_csv_stats, write_table as write_csv_table,
};
use ws22_explore::io::json::writer::{
    write_stats as write_json_stats, write_table as write_json_table,
};
use ws22_explore::{CoordSpec, DataTable, DatasetStore, StatsTable, build_table, summarize};

use crate::cli::GeometryArgs;
use crate::config::{build_source, parse_molecule};
use crate::display::{Context as DisplayContext, Progress, print_family_stats, print_histogram};
use crate::io::{OutputSpec, create_output, infer_output_format, stdout_is_tty};

pub fn run_geometry(args: GeometryArgs, ctx: DisplayContext) -> Result<()> {
    let molecule = parse_molecule(&args.molecule)?;
    let specs = CoordSpec::parse_list(&args.coords)?;
    let output_specs = resolve_outputs(&args)?;

    if args.stats && !output_specs.is_empty() && specs.len() != 1 {
        bail!(
            "Summary export needs exactly one coordinate spec; got {}",
            specs.len()
        );
    }

    let source = build_source(&args.source);
    let origin_substep = super::origin_substep(&source, molecule);

    let total_steps = if output_specs.is_empty() { 2 } else { 3 };
    let mut progress = Progress::new(ctx.interactive, total_steps);

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

    progress.step("Measuring coordinates");
    let table =
        build_table(&dataset, &specs).context("Failed to measure internal coordinates")?;

    let summaries = if args.stats || ctx.interactive {
        let mut collected = Vec::with_capacity(specs.len());
        for column in table.columns().iter().take(specs.len()) {
            let stats = summarize(&table, &column.name)
                .with_context(|| format!("Failed to summarize {}", column.name))?;
            collected.push((column.name.clone(), stats));
        }
        collected
    } else {
        Vec::new()
    };

    let measure_substeps = build_measure_substeps(&specs, &table);
    let measure_substeps_ref: Vec<&str> = measure_substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Measuring coordinates", &measure_substeps_ref);

    if ctx.interactive {
        for (column, stats) in &summaries {
            if let Some(values) = table.float_column(column) {
                print_histogram(column, values);
            }
            print_family_stats(column, stats);
        }
    }

    if !output_specs.is_empty() {
        progress.step("Writing output");
        let exported = if args.stats {
            summaries.first().map(|(_, stats)| stats)
        } else {
            None
        };
        write_outputs(&table, exported, &output_specs)?;

        let write_substeps = build_write_substeps(&output_specs, args.stats);
        let write_substeps_ref: Vec<&str> = write_substeps.iter().map(|s| s.as_str()).collect();
        progress.complete_step("Writing output", &write_substeps_ref);
    }

    progress.finish();

    Ok(())
}

fn build_measure_substeps(specs: &[CoordSpec], table: &DataTable) -> Vec<String> {
    let mut steps: Vec<String> = specs
        .iter()
        .zip(table.columns())
        .map(|(spec, column)| format!("Measure {} {}", spec.kind(), column.name))
        .collect();
    steps.push(format!("{} result rows", table.row_count()));
    steps
}

fn build_write_substeps(specs: &[OutputSpec], stats: bool) -> Vec<String> {
    let payload = if stats { "summary" } else { "table" };

    specs
        .iter()
        .map(|spec| {
            let path_str = spec
                .path
                .as_ref()
                .map(|p| {
                    p.file_name()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .into_owned()
                })
                .unwrap_or_else(|| "stdout".to_string());

            format!("Write {} {} → {}", spec.format, payload, path_str)
        })
        .collect()
}

fn resolve_outputs(args: &GeometryArgs) -> Result<Vec<OutputSpec>> {
    if args.io.output.is_empty() {
        if stdout_is_tty() {
            return Ok(Vec::new());
        }
        let format = args.outfmt.map(Format::from).unwrap_or(Format::Csv);
        return Ok(vec![OutputSpec { path: None, format }]);
    }

    let mut specs = Vec::with_capacity(args.io.output.len());

    let first = &args.io.output[0];
    let first_format = if let Some(fmt) = args.outfmt {
        fmt.into()
    } else if let Some(fmt) = infer_output_format(first) {
        fmt
    } else {
        bail!(
            "Cannot infer format from '{}'. Use --outfmt to specify.",
            first.display()
        );
    };
    specs.push(OutputSpec {
        path: Some(first.clone()),
        format: first_format,
    });

    for path in &args.io.output[1..] {
        let format = infer_output_format(path).ok_or_else(|| {
            anyhow::anyhow!(
                "Cannot infer format from '{}'. Use explicit extension.",
                path.display()
            )
        })?;
        specs.push(OutputSpec {
            path: Some(path.clone()),
            format,
        });
    }

    Ok(specs)
}

fn write_outputs(
    table: &DataTable,
    stats: Option<&StatsTable>,
    specs: &[OutputSpec],
) -> Result<()> {
    for spec in specs {
        let mut writer = create_output(spec.path.as_deref())?;

        match (spec.format, stats) {
            (Format::Csv, Some(stats)) => {
                write_csv_stats(&mut writer, stats).context("Failed to write CSV summary")?
            }
            (Format::Csv, None) => {
                write_csv_table(&mut writer, table).context("Failed to write CSV table")?
            }
            (Format::Json, Some(stats)) => {
                write_json_stats(&mut writer, stats).context("Failed to write JSON summary")?
            }
            (Format::Json, None) => {
                write_json_table(&mut writer, table).context("Failed to write JSON table")?
            }
            (Format::Xyz, _) => {
                bail!("XYZ holds structures; export tables as CSV or JSON")
            }
        }
    }

    Ok(())
}
