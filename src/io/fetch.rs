//! Archive download from the WS22 Zenodo record.

use std::io::Read;

use crate::io::error::Error;
use crate::model::molecule::Molecule;

/// Zenodo record hosting the WS22 database archives.
pub const DEFAULT_BASE_URL: &str = "https://zenodo.org/record/7032334/files";

/// User-Agent header for HTTP requests.
const USER_AGENT: &str = concat!("ws22-explore/", env!("CARGO_PKG_VERSION"));

/// Builds the download URL for a molecule's archive.
pub fn archive_url(base_url: &str, molecule: Molecule) -> String {
    format!(
        "{}/{}?download=1",
        base_url.trim_end_matches('/'),
        molecule.archive_name()
    )
}

/// Downloads a molecule's archive and returns the raw NPZ bytes.
///
/// A 404 maps to [`Error::DatasetNotFound`]; any other transport or HTTP
/// failure maps to [`Error::Transfer`]. Nothing is retried.
pub fn fetch_archive(base_url: &str, molecule: Molecule) -> Result<Vec<u8>, Error> {
    let url = archive_url(base_url, molecule);

    let response = match ureq::get(&url).header("User-Agent", USER_AGENT).call() {
        Ok(response) => response,
        Err(ureq::Error::StatusCode(404)) => {
            return Err(Error::not_found(molecule.name(), url));
        }
        Err(err) => return Err(Error::transfer(url, err.to_string())),
    };

    let mut bytes = Vec::new();
    response
        .into_body()
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|err| Error::transfer(url, err.to_string()))?;
    Ok(bytes)
}
