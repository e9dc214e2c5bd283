use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("atomic number {0} is outside the supported element set (H, C, N, O)")]
pub struct UnknownElementError(pub i64);

/// Chemical elements occurring in the WS22 molecule catalog.
///
/// The database covers flexible organic molecules built from H, C, N, and O
/// only, so the mapping from atomic number is a closed lookup. Any other
/// atomic number in a dataset is rejected with [`UnknownElementError`]
/// rather than passed through as a bare numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Element {
    H = 1,
    C = 6,
    N = 7,
    O = 8,
}

impl Element {
    pub fn from_atomic_number(number: i64) -> Result<Self, UnknownElementError> {
        match number {
            1 => Ok(Element::H),
            6 => Ok(Element::C),
            7 => Ok(Element::N),
            8 => Ok(Element::O),
            other => Err(UnknownElementError(other)),
        }
    }

    #[inline]
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Element::H => "H",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "H" | "h" => Ok(Element::H),
            "C" | "c" => Ok(Element::C),
            "N" | "n" => Ok(Element::N),
            "O" | "o" => Ok(Element::O),
            _ => Err(ParseElementError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn from_atomic_number_known() {
        assert_eq!(Element::from_atomic_number(1).unwrap(), Element::H);
        assert_eq!(Element::from_atomic_number(6).unwrap(), Element::C);
        assert_eq!(Element::from_atomic_number(7).unwrap(), Element::N);
        assert_eq!(Element::from_atomic_number(8).unwrap(), Element::O);
    }

    #[test]
    fn from_atomic_number_unknown() {
        let err = Element::from_atomic_number(26).unwrap_err();
        let s = format!("{}", err);
        assert_eq!(
            s,
            "atomic number 26 is outside the supported element set (H, C, N, O)"
        );
    }

    #[test]
    fn symbol_display_and_number() {
        assert_eq!(Element::N.symbol(), "N");
        assert_eq!(Element::N.to_string(), "N");
        assert_eq!(Element::N.atomic_number(), 7u8);
    }

    #[test]
    fn from_str_both_cases() {
        assert_eq!(Element::from_str("H").unwrap(), Element::H);
        assert_eq!(Element::from_str("o").unwrap(), Element::O);
        let err = Element::from_str("Fe").unwrap_err();
        assert_eq!(
            format!("{}", err),
            "invalid or unsupported element symbol: 'Fe'"
        );
    }
}
