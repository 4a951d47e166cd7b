//! Resolves which files a job reads, following the compute-to-data layout
//! `<inputs_dir>/<did>/<n>`.

use crate::utils::error::{AgeStatsError, Result};
use std::path::Path;
use walkdir::WalkDir;

pub const DIDS_ENV: &str = "DIDS";

/// Explicit files win. Otherwise `dids` selects `<inputs_dir>/<did>/*`,
/// and with no dids every file under `inputs_dir` is used.
pub fn discover_inputs(
    inputs_dir: &str,
    explicit: &[String],
    dids: Option<&[String]>,
) -> Result<Vec<String>> {
    if !explicit.is_empty() {
        return Ok(explicit.to_vec());
    }

    let root = Path::new(inputs_dir);
    if !root.is_dir() {
        tracing::warn!("Inputs directory {} does not exist", inputs_dir);
        return Ok(Vec::new());
    }

    let files = match dids {
        Some(dids) => {
            let mut files = Vec::new();
            for did in dids {
                let did_dir = root.join(did);
                if !did_dir.is_dir() {
                    tracing::warn!("No inputs found for dataset {}", did);
                    continue;
                }
                files.extend(list_files(&did_dir, Some(1))?);
            }
            files
        }
        None => list_files(root, None)?,
    };

    Ok(files)
}

/// Parses the JSON array carried by the `DIDS` variable.
pub fn parse_dids(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw).map_err(|e| AgeStatsError::ConfigError {
        message: format!("{} must be a JSON array of strings: {}", DIDS_ENV, e),
    })
}

pub fn dids_from_env() -> Result<Option<Vec<String>>> {
    match std::env::var(DIDS_ENV) {
        Ok(raw) if !raw.trim().is_empty() => parse_dids(&raw).map(Some),
        _ => Ok(None),
    }
}

fn list_files(dir: &Path, max_depth: Option<usize>) -> Result<Vec<String>> {
    // hosts commonly mount dataset files as symlinks
    let mut walker = WalkDir::new(dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    if let Some(depth) = max_depth {
        walker = walker.max_depth(depth);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            AgeStatsError::file_operation(format!("Cannot list {}: {}", dir.display(), e))
        })?;
        if entry.file_type().is_file() {
            files.push(entry.path().to_string_lossy().into_owned());
        }
    }
    Ok(files)
}
