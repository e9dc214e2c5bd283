//! Internal coordinates computed from the stored conformer geometries.
//!
//! A [`CoordSpec`] selects 2, 3, or 4 atoms by 0-based index and measures a
//! distance, a bond angle, or a torsion angle for every conformation in the
//! dataset. Specs also parse from the text form used at the interface
//! boundary: comma-separated indices, with several specs joined by `-`.

use ndarray::{ArrayView2, ArrayView3};

use crate::model::dataset::{Dataset, Field};
use crate::model::element::Element;
use crate::model::table::DataTable;

use super::error::Error;

/// A validated internal-coordinate selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordSpec {
    Distance(usize, usize),
    Angle(usize, usize, usize),
    Dihedral(usize, usize, usize, usize),
}

impl CoordSpec {
    /// Builds a spec from atom indices. Only 2 (distance), 3 (angle), and
    /// 4 (dihedral) indices are meaningful; any other arity is rejected.
    pub fn new(indices: &[usize]) -> Result<Self, Error> {
        match *indices {
            [i, j] => Ok(CoordSpec::Distance(i, j)),
            [i, j, k] => Ok(CoordSpec::Angle(i, j, k)),
            [i, j, k, l] => Ok(CoordSpec::Dihedral(i, j, k, l)),
            _ => Err(Error::InvalidCoordinateSpec { arity: indices.len() }),
        }
    }

    /// Parses one comma-separated spec, e.g. `1,0,2,3`.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let indices = text
            .trim()
            .split(',')
            .map(|token| {
                token
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| Error::spec_parse(text.trim(), e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&indices)
    }

    /// Parses a dash-joined multi-spec string, e.g. `1,0,2,3-0,1`.
    pub fn parse_list(text: &str) -> Result<Vec<Self>, Error> {
        text.split('-').map(Self::parse).collect()
    }

    /// Atom indices in selection order.
    pub fn indices(&self) -> Vec<usize> {
        match *self {
            CoordSpec::Distance(i, j) => vec![i, j],
            CoordSpec::Angle(i, j, k) => vec![i, j, k],
            CoordSpec::Dihedral(i, j, k, l) => vec![i, j, k, l],
        }
    }

    /// Kind of measurement this spec performs.
    pub fn kind(&self) -> &'static str {
        match self {
            CoordSpec::Distance(..) => "distance",
            CoordSpec::Angle(..) => "angle",
            CoordSpec::Dihedral(..) => "dihedral",
        }
    }

    fn value(&self, frame: &ArrayView2<'_, f64>) -> f64 {
        let p = |i: usize| [frame[[i, 0]], frame[[i, 1]], frame[[i, 2]]];
        match *self {
            CoordSpec::Distance(i, j) => distance(p(i), p(j)),
            CoordSpec::Angle(i, j, k) => bond_angle(p(i), p(j), p(k)),
            CoordSpec::Dihedral(i, j, k, l) => {
                let torsion = dihedral(p(i), p(j), p(k), p(l));
                // Torsions above 180 degrees are folded back instead of
                // kept in the signed convention, so reversing the atom
                // order gives the same folded value.
                if torsion > 180.0 { 360.0 - torsion } else { torsion }
            }
        }
    }
}

/// Computes the spec's value for every conformation, in conformation order.
pub fn compute(coords: ArrayView3<'_, f64>, spec: CoordSpec) -> Result<Vec<f64>, Error> {
    let count = coords.shape()[1];
    if let Some(&index) = spec.indices().iter().find(|&&i| i >= count) {
        return Err(Error::AtomIndex { index, count });
    }
    Ok(coords.outer_iter().map(|frame| spec.value(&frame)).collect())
}

/// Computes one named column per spec across all conformations, plus the
/// conformation-id column. Column names concatenate `<element><index>` for
/// each selected atom, joined by `-` (indices as selected, 0-based).
pub fn build_table(dataset: &Dataset, specs: &[CoordSpec]) -> Result<DataTable, Error> {
    let coords = dataset.tensor3(Field::R)?;
    let labels = dataset.atom_labels()?;
    let mut table = DataTable::new();
    for spec in specs {
        let values = compute(coords.view(), *spec)?;
        table.push_float(column_name(spec, &labels), values)?;
    }
    let ids = dataset.conformations()?;
    Ok(table.with_conformations(&ids)?)
}

fn column_name(spec: &CoordSpec, labels: &[Element]) -> String {
    let parts: Vec<String> =
        spec.indices().iter().map(|&i| format!("{}{}", labels[i], i)).collect();
    parts.join("-")
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

fn normalize(a: [f64; 3]) -> [f64; 3] {
    let n = norm(a);
    [a[0] / n, a[1] / n, a[2] / n]
}

fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    norm(sub(b, a))
}

/// Angle at `b` between the `b→a` and `b→c` directions, in degrees.
fn bond_angle(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> f64 {
    let u = sub(a, b);
    let v = sub(c, b);
    let cosine = dot(u, v) / (norm(u) * norm(v));
    cosine.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Torsion angle of the `b-c` bond in degrees, mapped to `[0, 360)`.
fn dihedral(a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]) -> f64 {
    let b1 = sub(b, a);
    let b2 = sub(c, b);
    let b3 = sub(d, c);
    let n1 = cross(b1, b2);
    let n2 = cross(b2, b3);
    let m1 = cross(n1, normalize(b2));
    let x = dot(n1, n2);
    let y = dot(m1, n2);
    let mut degrees = y.atan2(x).to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    degrees
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dataset::Field;
    use crate::model::table::CONFORMATION_COLUMN;
    use ndarray::{Array3, ArrayD, IxDyn};
    use std::collections::HashMap;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn frames(values: Vec<f64>, conformations: usize, atoms: usize) -> Array3<f64> {
        Array3::from_shape_vec((conformations, atoms, 3), values).unwrap()
    }

    #[test]
    fn unit_distance_along_x() {
        let coords = frames(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0], 1, 2);
        let values = compute(coords.view(), CoordSpec::Distance(0, 1)).unwrap();
        assert_eq!(values, vec![1.0]);
    }

    #[test]
    fn right_angle_at_the_middle_atom() {
        let coords = frames(vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0], 1, 3);
        let values = compute(coords.view(), CoordSpec::Angle(0, 1, 2)).unwrap();
        assert!(approx_eq(values[0], 90.0, 1e-9));
    }

    #[test]
    fn dihedral_folds_above_180_degrees() {
        // Atoms set up for a 120-degree torsion around the x-axis bond; the
        // mirrored fourth atom gives the reflex 240-degree torsion, which
        // the fold maps back onto 120.
        let half = 3.0_f64.sqrt() / 2.0;
        let plus = frames(
            vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, -0.5, half],
            1,
            4,
        );
        let minus = frames(
            vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, -0.5, -half],
            1,
            4,
        );
        let spec = CoordSpec::Dihedral(0, 1, 2, 3);
        let a = compute(plus.view(), spec).unwrap()[0];
        let b = compute(minus.view(), spec).unwrap()[0];
        assert!(approx_eq(a, 120.0, 1e-9), "got {}", a);
        assert!(approx_eq(b, 120.0, 1e-9), "got {}", b);
    }

    #[test]
    fn reversed_dihedral_gives_the_same_folded_value() {
        let coords = frames(
            vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0],
            1,
            4,
        );
        let forward = compute(coords.view(), CoordSpec::Dihedral(0, 1, 2, 3)).unwrap()[0];
        let reversed = compute(coords.view(), CoordSpec::Dihedral(3, 2, 1, 0)).unwrap()[0];
        assert!(approx_eq(forward, 90.0, 1e-9), "got {}", forward);
        assert!(approx_eq(forward, reversed, 1e-9));
    }

    #[test]
    fn invalid_arities_are_rejected() {
        let err = CoordSpec::new(&[0]).unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinateSpec { arity: 1 }));
        let err = CoordSpec::new(&[0, 1, 2, 3, 4]).unwrap_err();
        assert_eq!(
            format!("{}", err),
            "invalid atom selection: the number of indices must be 2 (distance), 3 (angle) or 4 (dihedral), got 5"
        );
    }

    #[test]
    fn out_of_range_atom_index() {
        let coords = frames(vec![0.0; 6], 1, 2);
        let err = compute(coords.view(), CoordSpec::Distance(0, 5)).unwrap_err();
        assert!(matches!(err, Error::AtomIndex { index: 5, count: 2 }));
    }

    #[test]
    fn spec_parsing() {
        assert_eq!(CoordSpec::parse("1,0,2,3").unwrap(), CoordSpec::Dihedral(1, 0, 2, 3));
        assert_eq!(CoordSpec::parse(" 0 , 1 ").unwrap(), CoordSpec::Distance(0, 1));
        assert_eq!(
            CoordSpec::parse_list("1,0,2,3-0,1").unwrap(),
            vec![CoordSpec::Dihedral(1, 0, 2, 3), CoordSpec::Distance(0, 1)]
        );
        assert!(matches!(
            CoordSpec::parse("a,b").unwrap_err(),
            Error::SpecParse { .. }
        ));
        assert_eq!(CoordSpec::Dihedral(1, 0, 2, 3).kind(), "dihedral");
    }

    fn dataset() -> Dataset {
        let mut arrays = HashMap::new();
        arrays.insert(
            Field::Z,
            ArrayD::from_shape_vec(IxDyn(&[1, 3]), vec![1.0, 6.0, 8.0]).unwrap(),
        );
        arrays.insert(
            Field::R,
            ArrayD::from_shape_vec(
                IxDyn(&[2, 3, 3]),
                vec![
                    0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, //
                    0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 2.0, 2.0, 0.0,
                ],
            )
            .unwrap(),
        );
        arrays.insert(
            Field::Conf,
            ArrayD::from_shape_vec(IxDyn(&[2, 1]), vec![1.0, 2.0]).unwrap(),
        );
        Dataset::from_arrays(arrays).unwrap()
    }

    #[test]
    fn table_columns_are_named_by_label_and_index() {
        let ds = dataset();
        let table = build_table(
            &ds,
            &[CoordSpec::Distance(0, 1), CoordSpec::Angle(0, 1, 2)],
        )
        .unwrap();
        assert_eq!(table.float_column("H0-C1").unwrap(), &[1.0, 2.0]);
        let angles = table.float_column("H0-C1-O2").unwrap();
        assert!(approx_eq(angles[0], 90.0, 1e-9));
        assert_eq!(table.int_column(CONFORMATION_COLUMN).unwrap(), &[1, 2]);
    }

    #[test]
    fn no_specs_still_yields_the_conformation_column() {
        let table = build_table(&dataset(), &[]).unwrap();
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.int_column(CONFORMATION_COLUMN).unwrap(), &[1, 2]);
    }
}
