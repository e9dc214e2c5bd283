use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown molecule name: '{0}' (expected one of the WS22 catalog entries)")]
pub struct ParseMoleculeError(String);

/// The ten molecules published in the WS22 database.
///
/// Each molecule maps to one archive on the Zenodo record. Archive stems are
/// the catalog names lowercased with the `2-` prefix dropped, which is also
/// how free-form user input is normalized before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Molecule {
    Acrolein,
    Alanine,
    Dmabn,
    Nitrophenol,
    Ohbdi,
    Sma,
    Thymine,
    Toluene,
    Urea,
    Urocanic,
}

impl Molecule {
    /// Catalog order of the published record.
    pub const ALL: [Molecule; 10] = [
        Molecule::Acrolein,
        Molecule::Alanine,
        Molecule::Dmabn,
        Molecule::Nitrophenol,
        Molecule::Ohbdi,
        Molecule::Sma,
        Molecule::Thymine,
        Molecule::Toluene,
        Molecule::Urea,
        Molecule::Urocanic,
    ];

    /// Catalog spelling, as published.
    pub fn name(&self) -> &'static str {
        match self {
            Molecule::Acrolein => "acrolein",
            Molecule::Alanine => "alanine",
            Molecule::Dmabn => "DMABN",
            Molecule::Nitrophenol => "2-nitrophenol",
            Molecule::Ohbdi => "o-HBDI",
            Molecule::Sma => "SMA",
            Molecule::Thymine => "thymine",
            Molecule::Toluene => "toluene",
            Molecule::Urea => "urea",
            Molecule::Urocanic => "urocanic",
        }
    }

    /// Normalized stem used in archive file names.
    pub fn archive_stem(&self) -> &'static str {
        match self {
            Molecule::Acrolein => "acrolein",
            Molecule::Alanine => "alanine",
            Molecule::Dmabn => "dmabn",
            Molecule::Nitrophenol => "nitrophenol",
            Molecule::Ohbdi => "o-hbdi",
            Molecule::Sma => "sma",
            Molecule::Thymine => "thymine",
            Molecule::Toluene => "toluene",
            Molecule::Urea => "urea",
            Molecule::Urocanic => "urocanic",
        }
    }

    /// File name of the molecule's NPZ archive.
    pub fn archive_name(&self) -> String {
        format!("ws22_{}.npz", self.archive_stem())
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Molecule {
    type Err = ParseMoleculeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace("2-", "");
        match key.as_str() {
            "acrolein" => Ok(Molecule::Acrolein),
            "alanine" => Ok(Molecule::Alanine),
            "dmabn" => Ok(Molecule::Dmabn),
            "nitrophenol" => Ok(Molecule::Nitrophenol),
            "o-hbdi" => Ok(Molecule::Ohbdi),
            "sma" => Ok(Molecule::Sma),
            "thymine" => Ok(Molecule::Thymine),
            "toluene" => Ok(Molecule::Toluene),
            "urea" => Ok(Molecule::Urea),
            "urocanic" => Ok(Molecule::Urocanic),
            _ => Err(ParseMoleculeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!(Molecule::from_str("Thymine").unwrap(), Molecule::Thymine);
        assert_eq!(Molecule::from_str("thymine").unwrap(), Molecule::Thymine);
        assert_eq!(Molecule::from_str("DMABN").unwrap(), Molecule::Dmabn);
        assert_eq!(Molecule::from_str("dmabn").unwrap(), Molecule::Dmabn);
    }

    #[test]
    fn from_str_drops_nitrophenol_prefix() {
        assert_eq!(
            Molecule::from_str("2-nitrophenol").unwrap(),
            Molecule::Nitrophenol
        );
        assert_eq!(
            Molecule::from_str("nitrophenol").unwrap(),
            Molecule::Nitrophenol
        );
    }

    #[test]
    fn from_str_unknown() {
        let err = Molecule::from_str("caffeine").unwrap_err();
        assert_eq!(
            format!("{}", err),
            "unknown molecule name: 'caffeine' (expected one of the WS22 catalog entries)"
        );
    }

    #[test]
    fn archive_names() {
        assert_eq!(Molecule::Thymine.archive_name(), "ws22_thymine.npz");
        assert_eq!(Molecule::Nitrophenol.archive_name(), "ws22_nitrophenol.npz");
        assert_eq!(Molecule::Ohbdi.archive_name(), "ws22_o-hbdi.npz");
    }

    #[test]
    fn catalog_size_and_display() {
        assert_eq!(Molecule::ALL.len(), 10);
        assert_eq!(Molecule::Ohbdi.to_string(), "o-HBDI");
        assert_eq!(Molecule::Nitrophenol.to_string(), "2-nitrophenol");
    }
}
