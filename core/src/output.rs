//! Output file naming
//!
//! Each run writes `{dir}/{stem}{NN}.png` using the lowest counter (from 1)
//! whose file is not already in the directory. The check is a plain
//! directory listing, not a reservation: two simultaneous runs may pick the
//! same name.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Highest counter probed before giving up
pub const MAX_OUTPUT_INDEX: u32 = 999;

const OUTPUT_EXTENSION: &str = "png";

/// Strip any extension from a requested output name: `aarshjul.png` -> `aarshjul`
pub fn output_stem(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// File name for counter `n`, zero padded to two digits
pub fn numbered_name(stem: &str, n: u32) -> String {
    format!("{stem}{n:02}.{OUTPUT_EXTENSION}")
}

/// First free numbered output path in `dir`
pub fn resolve_output_path(dir: &Path, name: &str) -> Result<PathBuf> {
    resolve_output_path_bounded(dir, name, MAX_OUTPUT_INDEX)
}

/// First free numbered output path in `dir`, probing counters `1..=limit`
pub fn resolve_output_path_bounded(dir: &Path, name: &str, limit: u32) -> Result<PathBuf> {
    let stem = output_stem(name);
    let existing: HashSet<String> = fs::read_dir(dir)
        .map_err(|e| Error::OutputDirectory {
            path: dir.to_path_buf(),
            source: e,
        })?
        .flatten()
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();

    for n in 1..=limit {
        let candidate = numbered_name(stem, n);
        if !existing.contains(&candidate) {
            let path = dir.join(candidate);
            tracing::debug!(path = %path.display(), "Resolved output path");
            return Ok(path);
        }
    }

    Err(Error::OutputExhausted {
        dir: dir.to_path_buf(),
        stem: stem.to_string(),
        limit,
    })
}
