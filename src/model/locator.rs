//! Resolve where the trained model artifact lives.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{PredictError, Result};

pub const MODEL_FILE_NAME: &str = "clf.json";

fn relative_artifact() -> PathBuf {
    Path::new("data").join("outputs").join("model").join(MODEL_FILE_NAME)
}

/// Places an artifact is looked for when none is configured explicitly:
/// the working directory and its parent, then the same two relative to
/// the running executable.
pub fn default_candidates() -> Vec<PathBuf> {
    let rel = relative_artifact();
    let mut candidates = vec![rel.clone(), Path::new("..").join(&rel)];
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join(&rel));
        candidates.push(exe_dir.join("..").join(&rel));
    }
    candidates
}

/// Pick the model artifact to load.
///
/// An explicit path must exist. Otherwise the first existing candidate wins.
pub fn locate(explicit: Option<&Path>, candidates: &[PathBuf]) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(PredictError::not_found(format!(
            "model artifact {} does not exist",
            path.display()
        )));
    }

    for candidate in candidates {
        debug!("Checking for model artifact at {}", candidate.display());
        if candidate.is_file() {
            return Ok(candidate.clone());
        }
    }

    let checked = candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(PredictError::not_found(format!(
        "could not find {}; checked: {}",
        MODEL_FILE_NAME, checked
    )))
}
