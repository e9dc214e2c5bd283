use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};

use ndarray::{ArrayD, IxDyn};
use zip::ZipArchive;

use crate::io::error::Error;
use crate::model::dataset::{Dataset, Field};

const NPY_MAGIC: &[u8] = b"\x93NUMPY";

/// Reads a dataset from a seekable NPZ source.
pub fn read<R: Read + Seek>(source: R) -> Result<Dataset, Error> {
    let mut archive = ZipArchive::new(source)?;
    let mut arrays = HashMap::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();
        let Some(field) = name.strip_suffix(".npy").and_then(Field::from_key) else {
            continue;
        };
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;
        arrays.insert(field, decode_array(&name, &bytes)?);
    }
    Ok(Dataset::from_arrays(arrays)?)
}

/// Reads a dataset from an in-memory NPZ image.
pub fn read_bytes(bytes: &[u8]) -> Result<Dataset, Error> {
    read(Cursor::new(bytes))
}

/// Decodes one `.npy` member into an `f64` array of its declared shape.
///
/// Supports format versions 1 through 3 with C-order little-endian numeric
/// dtypes, which is all the database uses.
fn decode_array(entry: &str, bytes: &[u8]) -> Result<ArrayD<f64>, Error> {
    if bytes.len() < 10 || &bytes[..6] != NPY_MAGIC {
        return Err(Error::decode(entry, "not an NPY array"));
    }
    let (header, payload) = match bytes[6] {
        1 => {
            let len = u16::from_le_bytes([bytes[8], bytes[9]]) as usize;
            split_header(entry, &bytes[10..], len)?
        }
        2 | 3 => {
            if bytes.len() < 12 {
                return Err(Error::decode(entry, "truncated header"));
            }
            let len = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize;
            split_header(entry, &bytes[12..], len)?
        }
        other => {
            return Err(Error::decode(
                entry,
                format!("unsupported NPY format version {other}"),
            ));
        }
    };

    let descr = dict_str(header, "descr")
        .ok_or_else(|| Error::decode(entry, "header is missing 'descr'"))?;
    let fortran = dict_flag(header, "fortran_order")
        .ok_or_else(|| Error::decode(entry, "header is missing 'fortran_order'"))?;
    if fortran {
        return Err(Error::decode(entry, "Fortran-order arrays are not supported"));
    }
    let shape = dict_shape(header)
        .ok_or_else(|| Error::decode(entry, "header is missing 'shape'"))?;

    let values = decode_values(entry, &descr, payload)?;
    if values.len() != shape.iter().product::<usize>() {
        return Err(Error::decode(
            entry,
            format!("{} values do not fill shape {:?}", values.len(), shape),
        ));
    }
    ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(|e| Error::decode(entry, e.to_string()))
}

fn split_header<'a>(entry: &str, rest: &'a [u8], len: usize) -> Result<(&'a str, &'a [u8]), Error> {
    if rest.len() < len {
        return Err(Error::decode(entry, "truncated header"));
    }
    let (header, payload) = rest.split_at(len);
    let header = std::str::from_utf8(header)
        .map_err(|_| Error::decode(entry, "header is not valid UTF-8"))?;
    Ok((header, payload))
}

/// Text after `'key':` in the header's Python-dict literal.
fn dict_value<'a>(header: &'a str, key: &str) -> Option<&'a str> {
    let pattern = format!("'{key}':");
    let start = header.find(&pattern)? + pattern.len();
    Some(header[start..].trim_start())
}

fn dict_str(header: &str, key: &str) -> Option<String> {
    let rest = dict_value(header, key)?;
    let rest = rest.strip_prefix(['\'', '"'])?;
    let end = rest.find(['\'', '"'])?;
    Some(rest[..end].to_string())
}

fn dict_flag(header: &str, key: &str) -> Option<bool> {
    let rest = dict_value(header, key)?;
    if rest.starts_with("True") {
        Some(true)
    } else if rest.starts_with("False") {
        Some(false)
    } else {
        None
    }
}

fn dict_shape(header: &str) -> Option<Vec<usize>> {
    let rest = dict_value(header, "shape")?;
    let rest = rest.strip_prefix('(')?;
    let end = rest.find(')')?;
    rest[..end]
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().ok())
        .collect()
}

fn decode_values(entry: &str, descr: &str, payload: &[u8]) -> Result<Vec<f64>, Error> {
    let values = match descr {
        "<f8" => widen(payload, f64::from_le_bytes),
        "<f4" => widen(payload, |raw| f32::from_le_bytes(raw) as f64),
        "<i8" => widen(payload, |raw| i64::from_le_bytes(raw) as f64),
        "<i4" => widen(payload, |raw| i32::from_le_bytes(raw) as f64),
        "<i2" => widen(payload, |raw| i16::from_le_bytes(raw) as f64),
        "|i1" => widen(payload, |raw: [u8; 1]| raw[0] as i8 as f64),
        "<u8" => widen(payload, |raw| u64::from_le_bytes(raw) as f64),
        "<u4" => widen(payload, |raw| u32::from_le_bytes(raw) as f64),
        "<u2" => widen(payload, |raw| u16::from_le_bytes(raw) as f64),
        "|u1" => widen(payload, |raw: [u8; 1]| raw[0] as f64),
        _ => {
            return Err(Error::decode(entry, format!("unsupported dtype '{descr}'")));
        }
    };
    values.ok_or_else(|| {
        Error::decode(entry, format!("payload is not a whole number of '{descr}' values"))
    })
}

fn widen<const N: usize>(payload: &[u8], convert: impl Fn([u8; N]) -> f64) -> Option<Vec<f64>> {
    if payload.len() % N != 0 {
        return None;
    }
    let values = payload
        .chunks_exact(N)
        .map(|chunk| {
            let mut raw = [0u8; N];
            raw.copy_from_slice(chunk);
            convert(raw)
        })
        .collect();
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::write::SimpleFileOptions;

    fn npy(descr: &str, shape_repr: &str, payload: &[u8]) -> Vec<u8> {
        let header =
            format!("{{'descr': '{descr}', 'fortran_order': False, 'shape': {shape_repr}, }}\n");
        let mut out = Vec::from(NPY_MAGIC);
        out.push(1);
        out.push(0);
        out.extend_from_slice(&(header.len() as u16).to_le_bytes());
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(payload);
        out
    }

    fn f8(values: &[f64]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    fn archive(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, bytes) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(bytes).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn minimal_entries() -> Vec<(&'static str, Vec<u8>)> {
        vec![
            ("Z.npy", npy("<f8", "(1, 3)", &f8(&[1.0, 6.0, 8.0]))),
            ("R.npy", npy("<f8", "(2, 3, 3)", &f8(&[0.5; 18]))),
            ("CONF.npy", npy("<f8", "(2, 1)", &f8(&[1.0, 2.0]))),
            ("E.npy", npy("<f8", "(2, 1)", &f8(&[-5.0, -3.0]))),
        ]
    }

    #[test]
    fn reads_a_small_archive() {
        let dataset = read_bytes(&archive(&minimal_entries())).unwrap();
        assert_eq!(dataset.conformation_count(), 2);
        assert_eq!(dataset.atom_count(), 3);
        assert_eq!(dataset.flat(Field::E).unwrap(), vec![-5.0, -3.0]);
        assert_eq!(dataset.atomic_numbers().unwrap(), vec![1, 6, 8]);
    }

    #[test]
    fn entries_outside_the_data_model_are_skipped() {
        let mut entries = minimal_entries();
        entries.push(("README.txt", b"not an array".to_vec()));
        entries.push(("EXTRA.npy", npy("<f8", "(1,)", &f8(&[9.0]))));
        let dataset = read_bytes(&archive(&entries)).unwrap();
        assert_eq!(dataset.fields().len(), 4);
    }

    #[test]
    fn missing_coordinates_surface_as_malformed() {
        let entries: Vec<_> = minimal_entries()
            .into_iter()
            .filter(|(name, _)| *name != "R.npy")
            .collect();
        let err = read_bytes(&archive(&entries)).unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
    }

    #[test]
    fn fortran_order_is_rejected() {
        let header = "{'descr': '<f8', 'fortran_order': True, 'shape': (2, 1), }\n";
        let mut member = Vec::from(NPY_MAGIC);
        member.push(1);
        member.push(0);
        member.extend_from_slice(&(header.len() as u16).to_le_bytes());
        member.extend_from_slice(header.as_bytes());
        member.extend_from_slice(&f8(&[1.0, 2.0]));
        let mut entries = minimal_entries();
        entries[2] = ("CONF.npy", member);
        let err = read_bytes(&archive(&entries)).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn big_endian_dtypes_are_rejected() {
        let mut entries = minimal_entries();
        entries[3] = ("E.npy", npy(">f8", "(2, 1)", &f8(&[-5.0, -3.0])));
        let err = read_bytes(&archive(&entries)).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn truncated_payloads_are_rejected() {
        let mut entries = minimal_entries();
        let mut short = npy("<f8", "(2, 1)", &f8(&[-5.0, -3.0]));
        short.truncate(short.len() - 4);
        entries[3] = ("E.npy", short);
        let err = read_bytes(&archive(&entries)).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn integer_and_single_precision_values_widen() {
        let mut entries = minimal_entries();
        let z: Vec<u8> = [1i64, 6, 8].iter().flat_map(|v| v.to_le_bytes()).collect();
        entries[0] = ("Z.npy", npy("<i8", "(1, 3)", &z));
        let e: Vec<u8> = [-5.0f32, -3.0].iter().flat_map(|v| v.to_le_bytes()).collect();
        entries[3] = ("E.npy", npy("<f4", "(2, 1)", &e));
        let dataset = read_bytes(&archive(&entries)).unwrap();
        assert_eq!(dataset.atomic_numbers().unwrap(), vec![1, 6, 8]);
        assert_eq!(dataset.flat(Field::E).unwrap(), vec![-5.0, -3.0]);
    }

    #[test]
    fn version_two_headers_parse() {
        let header = "{'descr': '<f8', 'fortran_order': False, 'shape': (2, 1), }\n";
        let mut member = Vec::from(NPY_MAGIC);
        member.push(2);
        member.push(0);
        member.extend_from_slice(&(header.len() as u32).to_le_bytes());
        member.extend_from_slice(header.as_bytes());
        member.extend_from_slice(&f8(&[-5.0, -3.0]));
        let mut entries = minimal_entries();
        entries[3] = ("E.npy", member);
        let dataset = read_bytes(&archive(&entries)).unwrap();
        assert_eq!(dataset.flat(Field::E).unwrap(), vec![-5.0, -3.0]);
    }
}
