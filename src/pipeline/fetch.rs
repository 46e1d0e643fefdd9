//! One-shot download and extraction of the survey archive.
//!
//! The extract is published as a zip archive holding a single CSV. The fetch
//! is a blocking GET with no retry logic; a failed download aborts the run.

use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::pipeline::error::AnalysisError;

/// Published location of the SCF full public extract.
pub const DEFAULT_ARCHIVE_URL: &str =
    "https://www.federalreserve.gov/econres/files/scfp2019csv.zip";

/// Download the archive into memory.
pub fn download_archive(url: &str) -> Result<Vec<u8>, AnalysisError> {
    let response = reqwest::blocking::get(url)?;
    let response = response.error_for_status().map_err(|err| AnalysisError::Io {
        stage: "fetch",
        message: format!("server rejected the request: {err}"),
    })?;
    let bytes = response.bytes()?;
    Ok(bytes.to_vec())
}

/// Extract the single CSV data file from the downloaded archive.
///
/// The archive must contain exactly one CSV entry; anything else means we
/// were handed the wrong file and parsing would fail confusingly later.
pub fn extract_data_file(archive: &[u8]) -> Result<Vec<u8>, AnalysisError> {
    let mut zip = ZipArchive::new(Cursor::new(archive)).map_err(|err| AnalysisError::Format {
        message: format!("downloaded payload is not a zip archive: {err}"),
    })?;

    let mut csv_names: Vec<String> = Vec::new();
    for index in 0..zip.len() {
        let entry = zip.by_index(index)?;
        if entry.is_file() && entry.name().to_ascii_lowercase().ends_with(".csv") {
            csv_names.push(entry.name().to_string());
        }
    }

    let name = match csv_names.as_slice() {
        [name] => name.clone(),
        [] => {
            return Err(AnalysisError::Format {
                message: "archive contains no CSV data file".to_string(),
            })
        }
        many => {
            return Err(AnalysisError::Format {
                message: format!(
                    "expected a single CSV data file in the archive, found {}",
                    many.len()
                ),
            })
        }
    };

    let mut entry = zip.by_name(&name)?;
    let mut payload = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut payload).map_err(|err| AnalysisError::Io {
        stage: "unzip",
        message: format!("failed to decompress '{name}': {err}"),
    })?;
    Ok(payload)
}
