//! Property extraction from a dataset into long-form result tables.
//!
//! Each property arm turns the relevant archive field into value columns;
//! the dispatch then appends the conformation-id column uniformly, so every
//! extracted table ends with [`CONFORMATION_COLUMN`]. Long-form reshapes
//! stack source columns block by block (all conformations of the first
//! column, then the second, and so on), which keeps block-level filters
//! aligned with whole conformation cycles.

use ndarray::Array2;

use crate::model::dataset::{Dataset, Field};
use crate::model::element::Element;
use crate::model::table::DataTable;

use super::error::Error;
use super::property::{
    DipoleComponent, EnergyKind, ForceComponent, Property, QuadrupoleComponent,
};

/// Extracts the selected property as a table of value columns plus the
/// conformation-id column.
pub fn extract(dataset: &Dataset, property: &Property) -> Result<DataTable, Error> {
    let values = match property {
        Property::PotentialEnergy => potential_energy(dataset)?,
        Property::Forces(component) => force_norms(dataset, *component)?,
        Property::MullikenCharges(filter) => mulliken_charges(dataset, *filter)?,
        Property::DipoleMoment(component) => dipole_moment(dataset, *component)?,
        Property::QuadrupoleMoment(component) => quadrupole_moment(dataset, *component)?,
        Property::Polarizability => polarizability(dataset)?,
        Property::VibrationalFrequencies(mode) => vibrational_frequencies(dataset, *mode)?,
        Property::ElectronicThermal(kinds) => electronic_thermal(dataset, kinds)?,
        Property::HomoLumoGap => {
            let mut table = DataTable::new();
            let orbitals = dataset.matrix(Field::Hl)?;
            let gaps = orbitals.rows().into_iter().map(|row| row[1] - row[0]).collect();
            table.push_float("HOMO-LUMO gap", gaps)?;
            table
        }
        Property::SpatialExtent => {
            let mut table = DataTable::new();
            table.push_float("Electronic spatial extent", dataset.flat(Field::R2)?)?;
            table
        }
    };

    let ids = dataset.conformations()?;
    Ok(values.with_conformations(&ids)?)
}

fn potential_energy(dataset: &Dataset) -> Result<DataTable, Error> {
    let energies = dataset.flat(Field::E)?;
    let minimum = energies.iter().copied().fold(f64::INFINITY, f64::min);
    let shifted = energies.iter().map(|e| e - minimum).collect();
    let mut table = DataTable::new();
    table.push_float("Potential energy", shifted)?;
    Ok(table)
}

fn force_norms(dataset: &Dataset, component: ForceComponent) -> Result<DataTable, Error> {
    let forces = dataset.tensor3(Field::F)?;
    let axes = component.axes();
    let norms = forces
        .outer_iter()
        .map(|conformation| {
            conformation
                .outer_iter()
                .map(|atom| axes.iter().map(|&a| atom[a] * atom[a]).sum::<f64>())
                .sum::<f64>()
                .sqrt()
        })
        .collect();
    let mut table = DataTable::new();
    table.push_float("Forces", norms)?;
    Ok(table)
}

fn mulliken_charges(dataset: &Dataset, filter: Option<Element>) -> Result<DataTable, Error> {
    let charges = dataset.matrix(Field::Q)?;
    let names: Vec<String> = dataset
        .atom_labels()?
        .iter()
        .enumerate()
        .map(|(i, element)| format!("{}{}", element, i + 1))
        .collect();
    let symbol = filter.map(|element| element.symbol());
    let (labels, values) = melt(&charges, &names, |name| {
        symbol.is_none_or(|s| name.contains(s))
    });
    let mut table = DataTable::new();
    table.push_text("atom_labels", labels)?;
    table.push_float("Mulliken charges", values)?;
    Ok(table)
}

fn dipole_moment(dataset: &Dataset, component: DipoleComponent) -> Result<DataTable, Error> {
    let dipoles = dataset.matrix(Field::Dp)?;
    let values = match component {
        DipoleComponent::Total => dipoles
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|v| v * v).sum::<f64>().sqrt())
            .collect(),
        DipoleComponent::Dx => dipoles.column(0).to_vec(),
        DipoleComponent::Dy => dipoles.column(1).to_vec(),
        DipoleComponent::Dz => dipoles.column(2).to_vec(),
    };
    let mut table = DataTable::new();
    table.push_float("Dipole moment", values)?;
    Ok(table)
}

fn quadrupole_moment(
    dataset: &Dataset,
    component: QuadrupoleComponent,
) -> Result<DataTable, Error> {
    let tensors = dataset.tensor3(Field::Qp)?;
    let values = match component.entry() {
        None => tensors
            .outer_iter()
            .map(|tensor| tensor.iter().map(|v| v * v).sum::<f64>().sqrt())
            .collect(),
        Some((i, j)) => tensors.outer_iter().map(|tensor| tensor[[i, j]]).collect(),
    };
    let mut table = DataTable::new();
    table.push_float("Quadrupole moment", values)?;
    Ok(table)
}

fn polarizability(dataset: &Dataset) -> Result<DataTable, Error> {
    let components = dataset.matrix(Field::P)?;
    let indices: Vec<i64> = (0..components.ncols() as i64).collect();
    let (labels, values) = melt(&components, &indices, |_| true);
    let mut table = DataTable::new();
    table.push_int("components", labels)?;
    table.push_float("Polarizability", values)?;
    Ok(table)
}

fn vibrational_frequencies(dataset: &Dataset, mode: usize) -> Result<DataTable, Error> {
    let frequencies = dataset.matrix(Field::Freq)?;
    let count = frequencies.ncols();
    // The selection range is inclusive of `count` itself: the top of the
    // range filters every mode away and yields a valid empty table.
    if mode > count {
        return Err(Error::ModeOutOfRange { mode, count });
    }
    let indices: Vec<i64> = (0..count as i64).collect();
    let (labels, values) = melt(&frequencies, &indices, |&m| m == mode as i64);
    let mut table = DataTable::new();
    table.push_int("modes", labels)?;
    table.push_float("Vibrational frequencies", values)?;
    Ok(table)
}

fn electronic_thermal(dataset: &Dataset, kinds: &[EnergyKind]) -> Result<DataTable, Error> {
    let energies = dataset.matrix(Field::Eth)?;
    let (labels, values) = melt(&energies, &EnergyKind::ALL, |kind| kinds.contains(kind));
    let types = labels.iter().map(|kind| kind.label().to_string()).collect();
    let mut table = DataTable::new();
    table.push_text("types", types)?;
    table.push_float("Electronic + thermal", values)?;
    Ok(table)
}

/// Melts a `(conformations, columns)` matrix to long form, one block of
/// rows per kept source column.
fn melt<L: Clone>(
    matrix: &Array2<f64>,
    labels: &[L],
    keep: impl Fn(&L) -> bool,
) -> (Vec<L>, Vec<f64>) {
    let mut variables = Vec::new();
    let mut values = Vec::new();
    for (column, label) in matrix.columns().into_iter().zip(labels) {
        if !keep(label) {
            continue;
        }
        for &value in column.iter() {
            variables.push(label.clone());
            values.push(value);
        }
    }
    (variables, values)
}
