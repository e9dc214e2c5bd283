use anyhow::{Context, Result, bail};

use ws22_explore::io::Format;
use ws22_explore::io::csv::writer::{
    write_stats as write_csv_stats, write_table as write_csv_table,
};
use ws22_explore::io::json::writer::{
    write_stats as write_json_stats, write_table as write_json_table,
};
use ws22_explore::{
    DataTable, DatasetStore, DipoleComponent, ForceComponent, Property, QuadrupoleComponent,
    StatsTable, extract, summarize,
};

use crate::cli::PropertyArgs;
use crate::config::{build_property, build_source, parse_molecule};
use crate::display::{Context as DisplayContext, Progress, print_family_stats, print_histogram};
use crate::io::{OutputSpec, create_output, infer_output_format, stdout_is_tty};

pub fn run_property(args: PropertyArgs, ctx: DisplayContext) -> Result<()> {
    let molecule = parse_molecule(&args.molecule)?;
    let property = build_property(args.property, &args.selection)?;
    let output_specs = resolve_outputs(&args)?;

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

    progress.step("Extracting property");
    let column = property.value_column();
    let table =
        extract(&dataset, &property).with_context(|| format!("Failed to extract {}", column))?;

    let stats = if args.stats || ctx.interactive {
        Some(summarize(&table, column).context("Failed to summarize the extracted table")?)
    } else {
        None
    };

    let extract_substeps = build_extract_substeps(&property, &table, stats.as_ref());
    let extract_substeps_ref: Vec<&str> = extract_substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Extracting property", &extract_substeps_ref);

    if ctx.interactive {
        if let Some(values) = table.float_column(column) {
            print_histogram(column, values);
        }
        if let Some(stats) = &stats {
            print_family_stats(column, stats);
        }
    }

    if !output_specs.is_empty() {
        progress.step("Writing output");
        let exported = if args.stats { stats.as_ref() } else { None };
        write_outputs(&table, exported, &output_specs)?;

        let write_substeps = build_write_substeps(&output_specs, args.stats);
        let write_substeps_ref: Vec<&str> = write_substeps.iter().map(|s| s.as_str()).collect();
        progress.complete_step("Writing output", &write_substeps_ref);
    }

    progress.finish();

    Ok(())
}

fn build_extract_substeps(
    property: &Property,
    table: &DataTable,
    stats: Option<&StatsTable>,
) -> Vec<String> {
    let mut steps = vec![describe_selection(property)];
    steps.push(format!("{} result rows", table.row_count()));

    if let Some(stats) = stats {
        steps.push(format!("Summarized {} conformation families", stats.rows.len()));
    }

    steps
}

fn describe_selection(property: &Property) -> String {
    match property {
        Property::PotentialEnergy => "Shift energies to a zero minimum".to_string(),
        Property::Forces(component) => match component {
            ForceComponent::Total => "Force norm over all three axes".to_string(),
            ForceComponent::Fx => "Force norm over the x axis".to_string(),
            ForceComponent::Fy => "Force norm over the y axis".to_string(),
            ForceComponent::Fz => "Force norm over the z axis".to_string(),
        },
        Property::MullikenCharges(None) => "Per-atom charges for every element".to_string(),
        Property::MullikenCharges(Some(element)) => {
            format!("Per-atom charges for {} only", element.symbol())
        }
        Property::DipoleMoment(component) => match component {
            DipoleComponent::Total => "Dipole vector norm".to_string(),
            DipoleComponent::Dx => "Dipole x component".to_string(),
            DipoleComponent::Dy => "Dipole y component".to_string(),
            DipoleComponent::Dz => "Dipole z component".to_string(),
        },
        Property::QuadrupoleMoment(component) => match component {
            QuadrupoleComponent::Norm => "Quadrupole Frobenius norm".to_string(),
            other => format!("Quadrupole {} entry", quadrupole_name(*other)),
        },
        Property::Polarizability => "All components in long form".to_string(),
        Property::VibrationalFrequencies(mode) => format!("Mode {}", mode),
        Property::ElectronicThermal(kinds) => {
            if kinds.is_empty() {
                "No energy kinds selected".to_string()
            } else {
                let labels: Vec<&str> = kinds.iter().map(|k| k.label()).collect();
                labels.join(", ")
            }
        }
        Property::HomoLumoGap => "LUMO minus HOMO".to_string(),
        Property::SpatialExtent => "Flattened as stored".to_string(),
    }
}

fn quadrupole_name(component: QuadrupoleComponent) -> &'static str {
    match component {
        QuadrupoleComponent::Norm => "norm",
        QuadrupoleComponent::Xx => "xx",
        QuadrupoleComponent::Yy => "yy",
        QuadrupoleComponent::Zz => "zz",
        QuadrupoleComponent::Xy => "xy",
        QuadrupoleComponent::Xz => "xz",
        QuadrupoleComponent::Yz => "yz",
    }
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

fn resolve_outputs(args: &PropertyArgs) -> Result<Vec<OutputSpec>> {
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
