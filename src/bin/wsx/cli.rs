use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "wsx",
    about = "Explore the WS22 molecular dataset collection",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every molecule in the collection with its archive location
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Summarize a molecule's archive contents and composition
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Extract a property table across every conformation
    #[command(visible_alias = "p")]
    Property(PropertyArgs),

    /// Measure internal coordinates (distances, angles, dihedrals)
    #[command(visible_alias = "g")]
    Geometry(GeometryArgs),

    /// Export a single conformation as an XYZ structure
    #[command(visible_alias = "s")]
    Structure(StructureArgs),
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceOptions,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Molecule to inspect (e.g. urea, toluene, o-hbdi)
    #[arg(value_name = "MOLECULE")]
    pub molecule: String,

    #[command(flatten)]
    pub source: SourceOptions,

    /// Suppress progress output (useful for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct PropertyArgs {
    /// Molecule to read (e.g. urea, toluene, o-hbdi)
    #[arg(value_name = "MOLECULE")]
    pub molecule: String,

    /// Property to extract
    #[arg(short, long, value_name = "PROPERTY")]
    pub property: PropertyKind,

    #[command(flatten)]
    pub selection: SelectionOptions,

    /// Export the per-family summary instead of the raw table
    #[arg(long)]
    pub stats: bool,

    /// Table format when it cannot be inferred from the output path
    #[arg(long, value_name = "FORMAT")]
    pub outfmt: Option<OutputFormat>,

    #[command(flatten)]
    pub source: SourceOptions,

    #[command(flatten)]
    pub io: IoOptions,
}

#[derive(Args)]
pub struct GeometryArgs {
    /// Molecule to read (e.g. urea, toluene, o-hbdi)
    #[arg(value_name = "MOLECULE")]
    pub molecule: String,

    /// Coordinate specs: 0-based atom indices separated by ',', several
    /// specs joined by '-'. Two atoms measure a distance, three an angle,
    /// four a dihedral (e.g. "0,1-0,1,2").
    #[arg(short, long, value_name = "SPECS")]
    pub coords: String,

    /// Export the per-family summary instead of the raw table
    #[arg(long)]
    pub stats: bool,

    /// Table format when it cannot be inferred from the output path
    #[arg(long, value_name = "FORMAT")]
    pub outfmt: Option<OutputFormat>,

    #[command(flatten)]
    pub source: SourceOptions,

    #[command(flatten)]
    pub io: IoOptions,
}

#[derive(Args)]
pub struct StructureArgs {
    /// Molecule to read (e.g. urea, toluene, o-hbdi)
    #[arg(value_name = "MOLECULE")]
    pub molecule: String,

    /// Conformation number to export (1-based)
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    pub geometry: usize,

    #[command(flatten)]
    pub source: SourceOptions,

    #[command(flatten)]
    pub io: IoOptions,
}

#[derive(Args)]
#[command(next_help_heading = "Property Selection")]
pub struct SelectionOptions {
    /// Cartesian component or tensor entry for vector and tensor properties
    #[arg(long, value_name = "COMPONENT")]
    pub component: Option<Component>,

    /// Restrict per-atom charges to one element
    #[arg(long, value_name = "ELEMENT")]
    pub element: Option<Element>,

    /// Normal mode for vibrational frequencies (0-based)
    #[arg(long, value_name = "MODE")]
    pub mode: Option<usize>,

    /// Energy kinds for the electronic + thermal property (repeat or
    /// comma-separate; all three when omitted)
    #[arg(long = "energy-kind", value_name = "KIND", value_delimiter = ',')]
    pub energy_kinds: Vec<EnergyKind>,
}

#[derive(Args)]
#[command(next_help_heading = "Dataset Source")]
pub struct SourceOptions {
    /// Directory holding already-downloaded .npz archives
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Base URL to fetch archives from (defaults to the Zenodo record)
    #[arg(long, value_name = "URL", conflicts_with = "data_dir")]
    pub base_url: Option<String>,
}

#[derive(Args)]
#[command(next_help_heading = "Output Options")]
pub struct IoOptions {
    /// Output file (repeatable; the format follows the extension)
    #[arg(short, long, value_name = "FILE", action = ArgAction::Append)]
    pub output: Vec<PathBuf>,

    /// Suppress progress output (useful for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PropertyKind {
    /// Potential energy shifted to a zero minimum
    #[value(name = "potential-energy", alias = "energy")]
    PotentialEnergy,

    /// Atomic force vectors, reduced per conformation
    #[value(name = "forces")]
    Forces,

    /// Per-atom Mulliken partial charges
    #[value(name = "mulliken-charges", alias = "charges")]
    MullikenCharges,

    /// Dipole moment vector
    #[value(name = "dipole-moment", alias = "dipole")]
    DipoleMoment,

    /// Quadrupole moment tensor
    #[value(name = "quadrupole-moment", alias = "quadrupole")]
    QuadrupoleMoment,

    /// Isotropic polarizability
    #[value(name = "polarizability")]
    Polarizability,

    /// Harmonic vibrational frequencies, one mode at a time
    #[value(name = "vibrational-frequencies", alias = "frequencies")]
    VibrationalFrequencies,

    /// Electronic + thermal energies in their three kinds
    #[value(name = "electronic-thermal", alias = "thermal")]
    ElectronicThermal,

    /// HOMO-LUMO gap
    #[value(name = "homo-lumo-gap", alias = "gap")]
    HomoLumoGap,

    /// Electronic spatial extent
    #[value(name = "spatial-extent", alias = "extent")]
    SpatialExtent,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Component {
    /// Norm of the vector or tensor
    Total,
    /// Cartesian x component
    X,
    /// Cartesian y component
    Y,
    /// Cartesian z component
    Z,
    /// Tensor xx entry
    Xx,
    /// Tensor yy entry
    Yy,
    /// Tensor zz entry
    Zz,
    /// Tensor xy entry
    Xy,
    /// Tensor xz entry
    Xz,
    /// Tensor yz entry
    Yz,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Element {
    /// Hydrogen
    #[value(name = "H", alias = "h")]
    H,
    /// Carbon
    #[value(name = "C", alias = "c")]
    C,
    /// Nitrogen
    #[value(name = "N", alias = "n")]
    N,
    /// Oxygen
    #[value(name = "O", alias = "o")]
    O,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnergyKind {
    /// Electronic energy
    Energies,
    /// Enthalpy
    Enthalpies,
    /// Gibbs free energy
    #[value(name = "free-energies", alias = "free")]
    FreeEnergies,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values
    Csv,
    /// JSON records
    Json,
    /// XYZ structure (structures only)
    Xyz,
}

pub fn parse() -> Cli {
    Cli::parse()
}
