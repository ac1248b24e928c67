//! Bundle directory names: `{date}__{model}__{voice}__n{label}`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use longform_domain::GenerationError;

/// Base name shared by the audio, plot and metadata files in a bundle.
pub const BASE_FILENAME: &str = "audio";

/// Date string used in bundle names and metadata.
pub fn date_string() -> String {
    chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string()
}

/// Title of a result: the voice plus the slot label, e.g. `emma__n0` or
/// `emma__n_long_0`.
pub fn title(voice: &str, label: &str) -> String {
    format!("{voice}__n{label}")
}

/// Label for slot `slot` of a concatenated track.
pub fn long_label(slot: usize) -> String {
    format!("_long_{slot}")
}

/// Replace anything that is not safe in a single path component.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '_' | '-' | '.' | '&' => c,
            _ => '_',
        })
        .collect()
}

/// Create a fresh bundle directory under `output_dir` and return its path.
///
/// The directory is created with `create_dir`, so an existing bundle is never
/// reused; on a clash `__1`, `__2`, ... is appended until one is free.
pub fn create_bundle_dir(
    output_dir: &Path,
    date: &str,
    model: &str,
    title: &str,
) -> Result<PathBuf, GenerationError> {
    fs::create_dir_all(output_dir).map_err(|e| {
        GenerationError::persistence(format!("create {}: {e}", output_dir.display()))
    })?;

    let base = format!("{date}__{model}__{}", sanitize(title));
    let mut candidate = output_dir.join(&base);
    let mut serial = 0u32;
    loop {
        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                serial += 1;
                tracing::warn!(bundle = %candidate.display(), serial, "bundle exists, bumping suffix");
                candidate = output_dir.join(format!("{base}__{serial}"));
            }
            Err(e) => {
                return Err(GenerationError::persistence(format!(
                    "create {}: {e}",
                    candidate.display()
                )));
            }
        }
    }
}
