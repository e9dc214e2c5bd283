use crate::model::element::Element;

/// Force-norm component selection.
///
/// `Total` takes the root-sum-of-squares over all three Cartesian axes;
/// the single-axis variants restrict the norm to one axis before summing
/// over atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceComponent {
    #[default]
    Total,
    Fx,
    Fy,
    Fz,
}

impl ForceComponent {
    /// Cartesian axes entering the norm.
    pub fn axes(&self) -> &'static [usize] {
        match self {
            ForceComponent::Total => &[0, 1, 2],
            ForceComponent::Fx => &[0],
            ForceComponent::Fy => &[1],
            ForceComponent::Fz => &[2],
        }
    }
}

/// Dipole-moment component selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DipoleComponent {
    /// Euclidean norm of the dipole vector.
    #[default]
    Total,
    Dx,
    Dy,
    Dz,
}

/// Quadrupole-moment component selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuadrupoleComponent {
    /// Frobenius norm of the full tensor.
    #[default]
    Norm,
    Xx,
    Yy,
    Zz,
    Xy,
    Xz,
    Yz,
}

impl QuadrupoleComponent {
    /// Tensor entry addressed by this component, `None` for the norm.
    pub fn entry(&self) -> Option<(usize, usize)> {
        match self {
            QuadrupoleComponent::Norm => None,
            QuadrupoleComponent::Xx => Some((0, 0)),
            QuadrupoleComponent::Yy => Some((1, 1)),
            QuadrupoleComponent::Zz => Some((2, 2)),
            QuadrupoleComponent::Xy => Some((0, 1)),
            QuadrupoleComponent::Xz => Some((0, 2)),
            QuadrupoleComponent::Yz => Some((1, 2)),
        }
    }
}

/// One of the electronic + thermal energy columns of the `ETH` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyKind {
    Energies,
    Enthalpies,
    FreeEnergies,
}

impl EnergyKind {
    /// Column order of the `ETH` field.
    pub const ALL: [EnergyKind; 3] =
        [EnergyKind::Energies, EnergyKind::Enthalpies, EnergyKind::FreeEnergies];

    /// Name used in the melted `types` column.
    pub fn label(&self) -> &'static str {
        match self {
            EnergyKind::Energies => "energies",
            EnergyKind::Enthalpies => "enthalpies",
            EnergyKind::FreeEnergies => "free energies",
        }
    }
}

/// A property selection: which physical quantity to extract, plus its
/// property-dependent sub-selection.
///
/// The set is closed, so every extraction path is checked for exhaustiveness
/// at compile time instead of branching on property-name strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    /// Total energy shifted so the lowest-energy conformation reads zero.
    PotentialEnergy,
    /// Per-conformation force norm over the selected axes and all atoms.
    Forces(ForceComponent),
    /// Per-atom partial charges in long form, optionally restricted to one
    /// element.
    MullikenCharges(Option<Element>),
    /// Dipole norm or one vector component.
    DipoleMoment(DipoleComponent),
    /// Quadrupole Frobenius norm or one tensor entry.
    QuadrupoleMoment(QuadrupoleComponent),
    /// All polarizability components in long form.
    Polarizability,
    /// One vibrational mode, selected by index out of the long form.
    VibrationalFrequencies(usize),
    /// The selected subset of the energies/enthalpies/free-energies triplet
    /// in long form. An empty subset is a valid zero-row selection.
    ElectronicThermal(Vec<EnergyKind>),
    /// LUMO minus HOMO.
    HomoLumoGap,
    /// Electronic spatial extent, flattened as stored.
    SpatialExtent,
}

impl Property {
    /// Name of the value column in the extracted table.
    pub fn value_column(&self) -> &'static str {
        match self {
            Property::PotentialEnergy => "Potential energy",
            Property::Forces(_) => "Forces",
            Property::MullikenCharges(_) => "Mulliken charges",
            Property::DipoleMoment(_) => "Dipole moment",
            Property::QuadrupoleMoment(_) => "Quadrupole moment",
            Property::Polarizability => "Polarizability",
            Property::VibrationalFrequencies(_) => "Vibrational frequencies",
            Property::ElectronicThermal(_) => "Electronic + thermal",
            Property::HomoLumoGap => "HOMO-LUMO gap",
            Property::SpatialExtent => "Electronic spatial extent",
        }
    }
}
