use std::collections::HashMap;
use std::fmt;

use ndarray::{Array2, ArrayD, ArrayView3, Axis, Ix3};

use super::element::Element;
use super::error::ModelError;

/// Named array fields stored in a WS22 molecule archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Atomic number per atom.
    Z,
    /// Cartesian coordinates, one `(atoms, 3)` block per conformation.
    R,
    /// Mulliken partial charge per atom.
    Q,
    /// Force vector per atom.
    F,
    /// Dipole vector.
    Dp,
    /// Quadrupole tensor.
    Qp,
    /// Polarizability tensor components.
    P,
    /// Vibrational frequency per normal mode.
    Freq,
    /// Electronic + thermal energy triplet.
    Eth,
    /// Total potential energy.
    E,
    /// HOMO and LUMO orbital energies.
    Hl,
    /// Electronic spatial extent.
    R2,
    /// Conformation-family identifier.
    Conf,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Z,
        Field::R,
        Field::Q,
        Field::F,
        Field::Dp,
        Field::Qp,
        Field::P,
        Field::Freq,
        Field::Eth,
        Field::E,
        Field::Hl,
        Field::R2,
        Field::Conf,
    ];

    /// Archive entry name (NPZ member stem).
    pub fn key(&self) -> &'static str {
        match self {
            Field::Z => "Z",
            Field::R => "R",
            Field::Q => "Q",
            Field::F => "F",
            Field::Dp => "DP",
            Field::Qp => "QP",
            Field::P => "P",
            Field::Freq => "FREQ",
            Field::Eth => "ETH",
            Field::E => "E",
            Field::Hl => "HL",
            Field::R2 => "R2",
            Field::Conf => "CONF",
        }
    }

    /// Looks up a field by archive entry name. Unknown names return `None`
    /// so the decoder can skip entries outside the data model.
    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.key() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One conformation's structure: element labels plus Cartesian coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub elements: Vec<Element>,
    pub coordinates: Vec<[f64; 3]>,
}

impl Geometry {
    #[inline]
    pub fn atom_count(&self) -> usize {
        self.coordinates.len()
    }
}

/// A decoded WS22 molecule dataset.
///
/// Holds the archive's named arrays as `f64` n-dimensional arrays, validated
/// on construction: coordinates fix the conformation and atom counts, every
/// other field except `Z` must match the conformation axis, and the per-atom
/// fields must match the atom axis. `Z` is shared by all conformations and
/// only its first `atom_count` entries are the atom list, which is exactly
/// how downstream per-atom labeling consumes it.
#[derive(Debug, Clone)]
pub struct Dataset {
    arrays: HashMap<Field, ArrayD<f64>>,
    conformation_count: usize,
    atom_count: usize,
}

impl Dataset {
    /// Builds a dataset from decoded archive arrays, checking the structural
    /// invariants of the data model.
    pub fn from_arrays(arrays: HashMap<Field, ArrayD<f64>>) -> Result<Self, ModelError> {
        let coords = arrays.get(&Field::R).ok_or(ModelError::MissingField(Field::R))?;
        if coords.ndim() != 3 || coords.shape()[2] != 3 {
            return Err(ModelError::field_shape(
                Field::R,
                format!("expected (conformations, atoms, 3), got {:?}", coords.shape()),
            ));
        }
        let conformation_count = coords.shape()[0];
        let atom_count = coords.shape()[1];
        if conformation_count == 0 || atom_count == 0 {
            return Err(ModelError::field_shape(Field::R, "empty coordinate array"));
        }

        let numbers = arrays.get(&Field::Z).ok_or(ModelError::MissingField(Field::Z))?;
        if numbers.len() < atom_count {
            return Err(ModelError::field_shape(
                Field::Z,
                format!("{} atomic numbers for {} atoms", numbers.len(), atom_count),
            ));
        }

        let families = arrays.get(&Field::Conf).ok_or(ModelError::MissingField(Field::Conf))?;
        if families.len() != conformation_count {
            return Err(ModelError::field_shape(
                Field::Conf,
                format!("{} ids for {} conformations", families.len(), conformation_count),
            ));
        }

        for (&field, array) in &arrays {
            if field == Field::Z {
                continue;
            }
            if array.shape().first() != Some(&conformation_count) {
                return Err(ModelError::field_shape(
                    field,
                    format!(
                        "leading axis {:?} does not match {} conformations",
                        array.shape().first(),
                        conformation_count
                    ),
                ));
            }
        }

        if let Some(charges) = arrays.get(&Field::Q) {
            if charges.len() != conformation_count * atom_count {
                return Err(ModelError::field_shape(
                    Field::Q,
                    format!("{} charges for {} atom rows", charges.len(), conformation_count * atom_count),
                ));
            }
        }
        if let Some(forces) = arrays.get(&Field::F) {
            if forces.shape() != [conformation_count, atom_count, 3] {
                return Err(ModelError::field_shape(
                    Field::F,
                    format!("expected (conformations, atoms, 3), got {:?}", forces.shape()),
                ));
            }
        }
        if let Some(quadrupole) = arrays.get(&Field::Qp) {
            if quadrupole.shape() != [conformation_count, 3, 3] {
                return Err(ModelError::field_shape(
                    Field::Qp,
                    format!("expected (conformations, 3, 3), got {:?}", quadrupole.shape()),
                ));
            }
        }
        for (field, width) in [(Field::Dp, 3), (Field::Eth, 3), (Field::Hl, 2)] {
            if let Some(array) = arrays.get(&field) {
                if array.len() != conformation_count * width {
                    return Err(ModelError::field_shape(
                        field,
                        format!("expected {} values per conformation", width),
                    ));
                }
            }
        }
        for field in [Field::E, Field::R2] {
            if let Some(array) = arrays.get(&field) {
                if array.len() != conformation_count {
                    return Err(ModelError::field_shape(field, "expected one value per conformation"));
                }
            }
        }
        if let Some(freq) = arrays.get(&Field::Freq) {
            if freq.ndim() != 2 {
                return Err(ModelError::field_shape(
                    Field::Freq,
                    format!("expected (conformations, modes), got {:?}", freq.shape()),
                ));
            }
        }

        Ok(Self { arrays, conformation_count, atom_count })
    }

    #[inline]
    pub fn conformation_count(&self) -> usize {
        self.conformation_count
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atom_count
    }

    /// Number of vibrational normal modes in the `FREQ` field.
    pub fn mode_count(&self) -> Result<usize, ModelError> {
        Ok(self.array(Field::Freq)?.len() / self.conformation_count)
    }

    /// Fields present in this dataset, in data-model order.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = self.arrays.keys().copied().collect();
        fields.sort();
        fields
    }

    /// Raw array access for a field.
    pub fn array(&self, field: Field) -> Result<&ArrayD<f64>, ModelError> {
        self.arrays.get(&field).ok_or(ModelError::MissingField(field))
    }

    /// A field's values flattened in row-major order.
    pub fn flat(&self, field: Field) -> Result<Vec<f64>, ModelError> {
        Ok(self.array(field)?.iter().copied().collect())
    }

    /// A field reshaped to `(conformations, values_per_conformation)`.
    pub fn matrix(&self, field: Field) -> Result<Array2<f64>, ModelError> {
        let array = self.array(field)?;
        let rows = self.conformation_count;
        if array.len() % rows != 0 {
            return Err(ModelError::field_shape(
                field,
                format!("{} values cannot fill {} conformation rows", array.len(), rows),
            ));
        }
        let flat: Vec<f64> = array.iter().copied().collect();
        Array2::from_shape_vec((rows, flat.len() / rows), flat)
            .map_err(|e| ModelError::field_shape(field, e.to_string()))
    }

    /// A field viewed as a 3-dimensional array.
    pub fn tensor3(&self, field: Field) -> Result<ArrayView3<'_, f64>, ModelError> {
        let array = self.array(field)?;
        array.view().into_dimensionality::<Ix3>().map_err(|_| {
            ModelError::field_shape(
                field,
                format!("expected a 3-dimensional array, got shape {:?}", array.shape()),
            )
        })
    }

    /// Atomic numbers of the atom list (first `atom_count` entries of `Z`).
    pub fn atomic_numbers(&self) -> Result<Vec<i64>, ModelError> {
        let numbers = self.array(Field::Z)?;
        Ok(numbers.iter().take(self.atom_count).map(|v| v.round() as i64).collect())
    }

    /// Element labels for the atom list, in atom order.
    pub fn atom_labels(&self) -> Result<Vec<Element>, ModelError> {
        self.atomic_numbers()?
            .into_iter()
            .map(|n| Element::from_atomic_number(n).map_err(ModelError::from))
            .collect()
    }

    /// Conformation-family id per conformation, flattened from `CONF`.
    pub fn conformations(&self) -> Result<Vec<i64>, ModelError> {
        let families = self.array(Field::Conf)?;
        Ok(families.iter().map(|v| v.round() as i64).collect())
    }

    /// Extracts one conformation's structure by 0-based index.
    pub fn geometry(&self, index: usize) -> Result<Geometry, ModelError> {
        if index >= self.conformation_count {
            return Err(ModelError::GeometryIndex { index, count: self.conformation_count });
        }
        let elements = self.atom_labels()?;
        let coords = self.tensor3(Field::R)?;
        let frame = coords.index_axis(Axis(0), index);
        let coordinates = frame.outer_iter().map(|row| [row[0], row[1], row[2]]).collect();
        Ok(Geometry { elements, coordinates })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, IxDyn};

    fn array(shape: &[usize], values: Vec<f64>) -> ArrayD<f64> {
        ArrayD::from_shape_vec(IxDyn(shape), values).unwrap()
    }

    fn water_like() -> Dataset {
        // 2 conformations of a 3-atom H/C/O system.
        let mut arrays = HashMap::new();
        arrays.insert(Field::Z, array(&[1, 3], vec![1.0, 6.0, 8.0]));
        arrays.insert(
            Field::R,
            array(
                &[2, 3, 3],
                vec![
                    0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
                    0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0, 0.0,
                ],
            ),
        );
        arrays.insert(Field::Conf, array(&[2, 1], vec![1.0, 2.0]));
        Dataset::from_arrays(arrays).unwrap()
    }

    #[test]
    fn counts_come_from_coordinates() {
        let ds = water_like();
        assert_eq!(ds.conformation_count(), 2);
        assert_eq!(ds.atom_count(), 3);
    }

    #[test]
    fn missing_coordinates_is_an_error() {
        let mut arrays = HashMap::new();
        arrays.insert(Field::Z, array(&[1, 3], vec![1.0, 6.0, 8.0]));
        let err = Dataset::from_arrays(arrays).unwrap_err();
        assert!(matches!(err, ModelError::MissingField(Field::R)));
    }

    #[test]
    fn mismatched_conformation_axis_is_rejected() {
        let mut arrays = HashMap::new();
        arrays.insert(Field::Z, array(&[1, 1], vec![1.0]));
        arrays.insert(Field::R, array(&[2, 1, 3], vec![0.0; 6]));
        arrays.insert(Field::Conf, array(&[2], vec![1.0, 1.0]));
        arrays.insert(Field::E, array(&[3], vec![0.0; 3]));
        let err = Dataset::from_arrays(arrays).unwrap_err();
        assert!(matches!(err, ModelError::FieldShape { field: Field::E, .. }));
    }

    #[test]
    fn labels_follow_the_fixed_lookup() {
        let ds = water_like();
        let labels = ds.atom_labels().unwrap();
        assert_eq!(labels, vec![Element::H, Element::C, Element::O]);
    }

    #[test]
    fn unknown_atomic_number_is_an_error() {
        let mut arrays = HashMap::new();
        arrays.insert(Field::Z, array(&[1, 1], vec![26.0]));
        arrays.insert(Field::R, array(&[1, 1, 3], vec![0.0; 3]));
        arrays.insert(Field::Conf, array(&[1], vec![1.0]));
        let ds = Dataset::from_arrays(arrays).unwrap();
        let err = ds.atom_labels().unwrap_err();
        assert!(matches!(err, ModelError::UnknownElement(_)));
    }

    #[test]
    fn geometry_extraction_and_bounds() {
        let ds = water_like();
        let geometry = ds.geometry(1).unwrap();
        assert_eq!(geometry.atom_count(), 3);
        assert_eq!(geometry.coordinates[1], [2.0, 0.0, 0.0]);

        let err = ds.geometry(2).unwrap_err();
        assert!(matches!(err, ModelError::GeometryIndex { index: 2, count: 2 }));
    }

    #[test]
    fn matrix_reshapes_per_conformation() {
        let mut arrays = HashMap::new();
        arrays.insert(Field::Z, array(&[1, 2], vec![1.0, 1.0]));
        arrays.insert(Field::R, array(&[2, 2, 3], vec![0.0; 12]));
        arrays.insert(Field::Conf, array(&[2], vec![1.0, 2.0]));
        arrays.insert(Field::Q, array(&[2, 2, 1], vec![0.1, 0.2, 0.3, 0.4]));
        let ds = Dataset::from_arrays(arrays).unwrap();
        let q = ds.matrix(Field::Q).unwrap();
        assert_eq!(q.shape(), &[2, 2]);
        assert_eq!(q[[1, 0]], 0.3);
    }

    #[test]
    fn field_keys_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("UNKNOWN"), None);
    }
}
