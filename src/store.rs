//! Dataset loading with an explicit per-molecule cache.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

use crate::io::error::Error;
use crate::io::{fetch, npz};
use crate::model::dataset::Dataset;
use crate::model::molecule::Molecule;

/// Where dataset archives come from.
#[derive(Debug, Clone)]
pub enum DatasetSource {
    /// Download from a Zenodo-style file listing.
    Zenodo { base_url: String },
    /// Read previously downloaded archives from a directory.
    Local { dir: PathBuf },
}

impl Default for DatasetSource {
    fn default() -> Self {
        DatasetSource::Zenodo {
            base_url: fetch::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Loads molecule datasets and caches them for the lifetime of the store.
///
/// Each molecule is fetched and decoded at most once; later loads hand out
/// the same shared dataset.
#[derive(Debug, Default)]
pub struct DatasetStore {
    source: DatasetSource,
    cache: HashMap<Molecule, Arc<Dataset>>,
}

impl DatasetStore {
    pub fn new(source: DatasetSource) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    /// Loads a molecule's dataset, hitting the source only on a cache miss.
    pub fn load(&mut self, molecule: Molecule) -> Result<Arc<Dataset>, Error> {
        if let Some(dataset) = self.cache.get(&molecule) {
            return Ok(Arc::clone(dataset));
        }
        let dataset = Arc::new(self.read_from_source(molecule)?);
        self.cache.insert(molecule, Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Molecules currently held in the cache, in catalog order.
    pub fn loaded(&self) -> Vec<Molecule> {
        let mut loaded: Vec<Molecule> = self.cache.keys().copied().collect();
        loaded.sort();
        loaded
    }

    fn read_from_source(&self, molecule: Molecule) -> Result<Dataset, Error> {
        match &self.source {
            DatasetSource::Zenodo { base_url } => {
                let bytes = fetch::fetch_archive(base_url, molecule)?;
                npz::reader::read_bytes(&bytes)
            }
            DatasetSource::Local { dir } => {
                let path = dir.join(molecule.archive_name());
                let file = match File::open(&path) {
                    Ok(file) => file,
                    Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                        return Err(Error::not_found(
                            molecule.name(),
                            path.display().to_string(),
                        ));
                    }
                    Err(err) => return Err(err.into()),
                };
                npz::reader::read(BufReader::new(file))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write as _;
    use std::str::FromStr;

    fn npy_f8(shape_repr: &str, values: &[f64]) -> Vec<u8> {
        let header =
            format!("{{'descr': '<f8', 'fortran_order': False, 'shape': {shape_repr}, }}\n");
        let mut out = Vec::from(&b"\x93NUMPY"[..]);
        out.push(1);
        out.push(0);
        out.extend_from_slice(&(header.len() as u16).to_le_bytes());
        out.extend_from_slice(header.as_bytes());
        for v in values {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out
    }

    fn write_archive(path: &std::path::Path) {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        let entries = [
            ("Z.npy", npy_f8("(1, 3)", &[1.0, 6.0, 8.0])),
            ("R.npy", npy_f8("(2, 3, 3)", &[0.25; 18])),
            ("CONF.npy", npy_f8("(2, 1)", &[1.0, 2.0])),
        ];
        for (name, bytes) in entries {
            writer.start_file(name, options).unwrap();
            writer.write_all(&bytes).unwrap();
        }
        let bytes = writer.finish().unwrap().into_inner();
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn loads_are_cached_per_molecule() {
        let dir = std::env::temp_dir().join("ws22_store_cache_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(Molecule::Thymine.archive_name());
        write_archive(&path);

        let mut store = DatasetStore::new(DatasetSource::Local { dir: dir.clone() });
        let first = store.load(Molecule::from_str("Thymine").unwrap()).unwrap();

        // The second lookup must not touch the source again.
        fs::remove_file(&path).unwrap();
        let second = store.load(Molecule::from_str("thymine").unwrap()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.loaded(), vec![Molecule::Thymine]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_local_archive_is_not_found() {
        let dir = std::env::temp_dir().join("ws22_store_missing_test");
        fs::create_dir_all(&dir).unwrap();
        let mut store = DatasetStore::new(DatasetSource::Local { dir: dir.clone() });
        let err = store.load(Molecule::Urea).unwrap_err();
        assert!(matches!(err, Error::DatasetNotFound { .. }));
        let _ = fs::remove_dir_all(&dir);
    }
}
