mod banner;
mod error;
mod progress;
mod tables;

pub use banner::{banner_for_help, print_banner};
pub use error::print_error;
pub use progress::Progress;
pub use tables::{
    print_dataset_summary, print_element_distribution, print_family_distribution,
    print_family_stats, print_field_shapes, print_histogram, print_structure_summary,
};

/// Rendering context resolved once at startup.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    /// Spinners, banners and summary tables are drawn only when this is set.
    pub interactive: bool,
}

impl Context {
    /// Detects terminal capabilities from the standard error stream.
    pub fn detect() -> Self {
        Self { interactive: crate::io::stderr_is_tty() }
    }

    /// Degrades to non-interactive rendering when `--quiet` is given.
    pub fn with_quiet(self, quiet: bool) -> Self {
        Self { interactive: self.interactive && !quiet }
    }
}
