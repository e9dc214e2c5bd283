use std::str::FromStr;

use anyhow::{Result, bail};
use ws22_explore::io::Format;
use ws22_explore::{
    DatasetSource, DipoleComponent, Element as LibElement, EnergyKind as LibEnergyKind,
    ForceComponent, Molecule, Property, QuadrupoleComponent,
};

use crate::cli;

/// Resolves a molecule name from the command line against the catalog.
pub fn parse_molecule(name: &str) -> Result<Molecule> {
    match Molecule::from_str(name) {
        Ok(molecule) => Ok(molecule),
        Err(_) => {
            let catalog = Molecule::ALL.map(|m| m.name()).join(", ");
            bail!("Unknown molecule: {}\n\nAvailable molecules: {}", name, catalog)
        }
    }
}

/// Picks the dataset source from the shared source flags.
pub fn build_source(opts: &cli::SourceOptions) -> DatasetSource {
    if let Some(dir) = &opts.data_dir {
        DatasetSource::Local { dir: dir.clone() }
    } else if let Some(url) = &opts.base_url {
        DatasetSource::Zenodo { base_url: url.clone() }
    } else {
        DatasetSource::default()
    }
}

/// Combines the property choice with its selection flags into a library
/// [`Property`], rejecting flags that do not apply to the chosen property.
pub fn build_property(
    kind: cli::PropertyKind,
    selection: &cli::SelectionOptions,
) -> Result<Property> {
    check_unused_selections(kind, selection)?;

    Ok(match kind {
        cli::PropertyKind::PotentialEnergy => Property::PotentialEnergy,
        cli::PropertyKind::Forces => Property::Forces(force_component(selection.component)?),
        cli::PropertyKind::MullikenCharges => {
            Property::MullikenCharges(selection.element.map(LibElement::from))
        }
        cli::PropertyKind::DipoleMoment => {
            Property::DipoleMoment(dipole_component(selection.component)?)
        }
        cli::PropertyKind::QuadrupoleMoment => {
            Property::QuadrupoleMoment(quadrupole_component(selection.component)?)
        }
        cli::PropertyKind::Polarizability => Property::Polarizability,
        cli::PropertyKind::VibrationalFrequencies => {
            Property::VibrationalFrequencies(selection.mode.unwrap_or(0))
        }
        cli::PropertyKind::ElectronicThermal => {
            Property::ElectronicThermal(energy_kinds(&selection.energy_kinds))
        }
        cli::PropertyKind::HomoLumoGap => Property::HomoLumoGap,
        cli::PropertyKind::SpatialExtent => Property::SpatialExtent,
    })
}

fn check_unused_selections(
    kind: cli::PropertyKind,
    selection: &cli::SelectionOptions,
) -> Result<()> {
    if selection.component.is_some()
        && !matches!(
            kind,
            cli::PropertyKind::Forces
                | cli::PropertyKind::DipoleMoment
                | cli::PropertyKind::QuadrupoleMoment
        )
    {
        bail!("--component applies to forces and the dipole and quadrupole moments");
    }
    if selection.element.is_some() && kind != cli::PropertyKind::MullikenCharges {
        bail!("--element applies to Mulliken charges");
    }
    if selection.mode.is_some() && kind != cli::PropertyKind::VibrationalFrequencies {
        bail!("--mode applies to vibrational frequencies");
    }
    if !selection.energy_kinds.is_empty() && kind != cli::PropertyKind::ElectronicThermal {
        bail!("--energy-kind applies to the electronic + thermal property");
    }
    Ok(())
}

fn force_component(component: Option<cli::Component>) -> Result<ForceComponent> {
    Ok(match component.unwrap_or(cli::Component::Total) {
        cli::Component::Total => ForceComponent::Total,
        cli::Component::X => ForceComponent::Fx,
        cli::Component::Y => ForceComponent::Fy,
        cli::Component::Z => ForceComponent::Fz,
        other => bail!(
            "Forces have no {} component; pick total, x, y or z",
            component_name(other)
        ),
    })
}

fn dipole_component(component: Option<cli::Component>) -> Result<DipoleComponent> {
    Ok(match component.unwrap_or(cli::Component::Total) {
        cli::Component::Total => DipoleComponent::Total,
        cli::Component::X => DipoleComponent::Dx,
        cli::Component::Y => DipoleComponent::Dy,
        cli::Component::Z => DipoleComponent::Dz,
        other => bail!(
            "The dipole moment has no {} entry; pick total, x, y or z",
            component_name(other)
        ),
    })
}

fn quadrupole_component(component: Option<cli::Component>) -> Result<QuadrupoleComponent> {
    Ok(match component.unwrap_or(cli::Component::Total) {
        cli::Component::Total => QuadrupoleComponent::Norm,
        cli::Component::Xx => QuadrupoleComponent::Xx,
        cli::Component::Yy => QuadrupoleComponent::Yy,
        cli::Component::Zz => QuadrupoleComponent::Zz,
        cli::Component::Xy => QuadrupoleComponent::Xy,
        cli::Component::Xz => QuadrupoleComponent::Xz,
        cli::Component::Yz => QuadrupoleComponent::Yz,
        other => bail!(
            "The quadrupole moment has no {} entry; pick total or a tensor entry (xx..yz)",
            component_name(other)
        ),
    })
}

fn component_name(component: cli::Component) -> &'static str {
    match component {
        cli::Component::Total => "total",
        cli::Component::X => "x",
        cli::Component::Y => "y",
        cli::Component::Z => "z",
        cli::Component::Xx => "xx",
        cli::Component::Yy => "yy",
        cli::Component::Zz => "zz",
        cli::Component::Xy => "xy",
        cli::Component::Xz => "xz",
        cli::Component::Yz => "yz",
    }
}

fn energy_kinds(kinds: &[cli::EnergyKind]) -> Vec<LibEnergyKind> {
    if kinds.is_empty() {
        return LibEnergyKind::ALL.to_vec();
    }

    let mut resolved: Vec<LibEnergyKind> = Vec::new();
    for kind in kinds {
        let kind = LibEnergyKind::from(*kind);
        if !resolved.contains(&kind) {
            resolved.push(kind);
        }
    }
    resolved
}

impl From<cli::Element> for LibElement {
    fn from(element: cli::Element) -> Self {
        match element {
            cli::Element::H => LibElement::H,
            cli::Element::C => LibElement::C,
            cli::Element::N => LibElement::N,
            cli::Element::O => LibElement::O,
        }
    }
}

impl From<cli::EnergyKind> for LibEnergyKind {
    fn from(kind: cli::EnergyKind) -> Self {
        match kind {
            cli::EnergyKind::Energies => LibEnergyKind::Energies,
            cli::EnergyKind::Enthalpies => LibEnergyKind::Enthalpies,
            cli::EnergyKind::FreeEnergies => LibEnergyKind::FreeEnergies,
        }
    }
}

impl From<cli::OutputFormat> for Format {
    fn from(format: cli::OutputFormat) -> Self {
        match format {
            cli::OutputFormat::Csv => Format::Csv,
            cli::OutputFormat::Json => Format::Json,
            cli::OutputFormat::Xyz => Format::Xyz,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_selection() -> cli::SelectionOptions {
        cli::SelectionOptions {
            component: None,
            element: None,
            mode: None,
            energy_kinds: Vec::new(),
        }
    }

    #[test]
    fn force_axis_maps_to_axis_norm() {
        let selection = cli::SelectionOptions {
            component: Some(cli::Component::X),
            ..no_selection()
        };
        let property = build_property(cli::PropertyKind::Forces, &selection).unwrap();
        assert_eq!(property, Property::Forces(ForceComponent::Fx));
    }

    #[test]
    fn tensor_entry_is_rejected_for_forces() {
        let selection = cli::SelectionOptions {
            component: Some(cli::Component::Xy),
            ..no_selection()
        };
        assert!(build_property(cli::PropertyKind::Forces, &selection).is_err());
    }

    #[test]
    fn quadrupole_defaults_to_norm() {
        let property =
            build_property(cli::PropertyKind::QuadrupoleMoment, &no_selection()).unwrap();
        assert_eq!(property, Property::QuadrupoleMoment(QuadrupoleComponent::Norm));
    }

    #[test]
    fn component_on_scalar_property_is_rejected() {
        let selection = cli::SelectionOptions {
            component: Some(cli::Component::Total),
            ..no_selection()
        };
        assert!(build_property(cli::PropertyKind::PotentialEnergy, &selection).is_err());
    }

    #[test]
    fn mode_applies_only_to_frequencies() {
        let selection = cli::SelectionOptions { mode: Some(3), ..no_selection() };
        assert!(build_property(cli::PropertyKind::Forces, &selection).is_err());

        let property =
            build_property(cli::PropertyKind::VibrationalFrequencies, &selection).unwrap();
        assert_eq!(property, Property::VibrationalFrequencies(3));
    }

    #[test]
    fn omitted_energy_kinds_select_all_three() {
        let property =
            build_property(cli::PropertyKind::ElectronicThermal, &no_selection()).unwrap();
        assert_eq!(property, Property::ElectronicThermal(LibEnergyKind::ALL.to_vec()));
    }

    #[test]
    fn repeated_energy_kinds_are_deduplicated_in_order() {
        let selection = cli::SelectionOptions {
            energy_kinds: vec![
                cli::EnergyKind::Enthalpies,
                cli::EnergyKind::Energies,
                cli::EnergyKind::Enthalpies,
            ],
            ..no_selection()
        };
        let property = build_property(cli::PropertyKind::ElectronicThermal, &selection).unwrap();
        assert_eq!(
            property,
            Property::ElectronicThermal(vec![
                LibEnergyKind::Enthalpies,
                LibEnergyKind::Energies,
            ])
        );
    }

    #[test]
    fn unknown_molecule_lists_the_catalog() {
        let err = parse_molecule("benzene").unwrap_err();
        assert!(err.to_string().contains("Available molecules"));
        assert!(err.to_string().contains("urea"));
    }

    #[test]
    fn source_defaults_to_zenodo() {
        let opts = cli::SourceOptions { data_dir: None, base_url: None };
        assert!(matches!(build_source(&opts), DatasetSource::Zenodo { .. }));
    }

    #[test]
    fn data_dir_selects_the_local_source() {
        let opts = cli::SourceOptions {
            data_dir: Some(std::path::PathBuf::from("/tmp/ws22")),
            base_url: None,
        };
        assert!(matches!(build_source(&opts), DatasetSource::Local { .. }));
    }
}
