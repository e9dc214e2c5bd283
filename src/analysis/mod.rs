mod error;
mod extract;
mod geometry;
mod property;
mod stats;

pub use error::Error;
pub use extract::extract;
pub use geometry::{CoordSpec, build_table, compute};
pub use property::{DipoleComponent, EnergyKind, ForceComponent, Property, QuadrupoleComponent};
pub use stats::summarize;
