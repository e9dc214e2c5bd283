use std::io::Write;

use crate::io::error::Error;
use crate::model::dataset::Geometry;

/// Writes a single geometry in minimal XYZ layout: atom count line, comment
/// line, then one left-justified symbol plus three fixed-precision
/// coordinates per atom.
pub fn write<W: Write>(mut writer: W, geometry: &Geometry) -> Result<(), Error> {
    writeln!(writer, "{}", geometry.atom_count())?;
    writeln!(writer)?;
    for (element, [x, y, z]) in geometry.elements.iter().zip(&geometry.coordinates) {
        writeln!(
            writer,
            "{:<6} {:12.8} {:12.8} {:12.8} ",
            element.symbol(),
            x,
            y,
            z
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::element::Element;

    #[test]
    fn renders_the_fixed_width_layout() {
        let geometry = Geometry {
            elements: vec![Element::H, Element::C],
            coordinates: vec![[0.0, 0.0, 0.0], [1.25, -0.5, 0.0]],
        };
        let mut buf = Vec::new();
        write(&mut buf, &geometry).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "2\n\
             \n\
             H        0.00000000   0.00000000   0.00000000 \n\
             C        1.25000000  -0.50000000   0.00000000 \n"
        );
    }

    #[test]
    fn counts_match_the_atom_list() {
        let geometry = Geometry {
            elements: vec![Element::O; 3],
            coordinates: vec![[0.0, 0.0, 0.0]; 3],
        };
        let mut buf = Vec::new();
        write(&mut buf, &geometry).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().next(), Some("3"));
        assert_eq!(text.lines().count(), 5);
        assert!(text.ends_with('\n'));
    }
}
