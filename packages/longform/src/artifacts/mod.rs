//! Persistence boundary: one result in, a bundle of files out.
//!
//! [`FsArtifactWriter`] lays each result out as
//!
//! ```text
//! {output_dir}/{date}__{model}__{voice}__n{label}/audio.wav
//!                                                /audio.png
//!                                                /audio.json
//! ```

pub mod naming;
pub mod plot;
pub mod wav;

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use longform_domain::{Artifacts, AudioBuffer, GenerationError, GenerationParameters};

use crate::config::LongformConfig;

/// Writes a generated clip with its plot and metadata.
///
/// `label` tells results of one run apart: the slot index for segment
/// results, [`naming::long_label`] for concatenated tracks.
pub trait ArtifactWriter {
    fn persist(
        &self,
        audio: &AudioBuffer,
        params: &GenerationParameters,
        candidates: usize,
        label: &str,
    ) -> Result<Artifacts, GenerationError>;
}

impl<W: ArtifactWriter + ?Sized> ArtifactWriter for &W {
    fn persist(
        &self,
        audio: &AudioBuffer,
        params: &GenerationParameters,
        candidates: usize,
        label: &str,
    ) -> Result<Artifacts, GenerationError> {
        (**self).persist(audio, params, candidates, label)
    }
}

impl<W: ArtifactWriter + ?Sized> ArtifactWriter for Box<W> {
    fn persist(
        &self,
        audio: &AudioBuffer,
        params: &GenerationParameters,
        candidates: usize,
        label: &str,
    ) -> Result<Artifacts, GenerationError> {
        (**self).persist(audio, params, candidates, label)
    }
}

/// Writes bundles to the local filesystem.
#[derive(Debug, Clone)]
pub struct FsArtifactWriter {
    config: LongformConfig,
}

impl FsArtifactWriter {
    pub fn new(config: LongformConfig) -> Self {
        Self { config }
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// Metadata document for one result:
    /// `{_version, _type, date, candidates, ...params}`.
    pub fn metadata(
        &self,
        params: &GenerationParameters,
        date: &str,
        candidates: usize,
    ) -> Map<String, Value> {
        let mut doc = params.to_metadata_mapping(&self.config.model_tag);
        doc.insert(
            "_version".into(),
            Value::from(self.config.metadata_version.clone()),
        );
        doc.insert("date".into(), Value::from(date));
        doc.insert("candidates".into(), Value::from(candidates));
        doc
    }
}

impl ArtifactWriter for FsArtifactWriter {
    fn persist(
        &self,
        audio: &AudioBuffer,
        params: &GenerationParameters,
        candidates: usize,
        label: &str,
    ) -> Result<Artifacts, GenerationError> {
        let date = naming::date_string();
        let title = naming::title(&params.voice, label);
        let bundle_dir = naming::create_bundle_dir(
            &self.config.output_dir,
            &date,
            &self.config.model_tag,
            &title,
        )?;

        let file = |ext: &str| -> PathBuf {
            bundle_dir.join(format!("{}.{ext}", naming::BASE_FILENAME))
        };
        let artifacts = Artifacts {
            audio_path: file("wav"),
            image_path: file("png"),
            metadata_path: file("json"),
            bundle_dir: bundle_dir.clone(),
        };

        wav::write_wav(&artifacts.audio_path, audio)?;
        plot::save_waveform_plot(&artifacts.image_path, audio, &self.config.plot)?;

        let doc = self.metadata(params, &date, candidates);
        let json = serde_json::to_string_pretty(&doc)
            .map_err(|e| GenerationError::persistence(format!("encode metadata: {e}")))?;
        fs::write(&artifacts.metadata_path, json).map_err(|e| {
            GenerationError::persistence(format!("{}: {e}", artifacts.metadata_path.display()))
        })?;

        tracing::debug!(bundle = %bundle_dir.display(), label, "persisted result");
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use longform_domain::Seed;

    #[test]
    fn persist_writes_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FsArtifactWriter::new(LongformConfig {
            output_dir: dir.path().to_path_buf(),
            ..LongformConfig::default()
        });
        let params = GenerationParameters::new("Hello.", "emma")
            .with_seed(Seed::Fixed(17))
            .with_option("preset", "fast");
        let audio = AudioBuffer::new(24_000, vec![0.1; 240]);

        let artifacts = writer.persist(&audio, &params, 3, "0").unwrap();

        assert!(artifacts.audio_path.is_file());
        assert!(artifacts.image_path.is_file());
        assert_eq!(artifacts.audio_path.parent(), Some(artifacts.bundle_dir.as_path()));
        let name = artifacts.bundle_dir.file_name().unwrap().to_string_lossy();
        assert!(name.ends_with("__tortoise__emma__n0"), "{name}");

        let doc: Value =
            serde_json::from_str(&fs::read_to_string(&artifacts.metadata_path).unwrap()).unwrap();
        assert_eq!(doc["_version"], "0.0.1");
        assert_eq!(doc["_type"], "tortoise");
        assert_eq!(doc["candidates"], 3);
        assert_eq!(doc["seed"], 17);
        assert_eq!(doc["preset"], "fast");
        assert!(doc["date"].is_string());
    }

    #[test]
    fn unwritable_output_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"not a dir").unwrap();

        let writer = FsArtifactWriter::new(LongformConfig {
            output_dir: blocker,
            ..LongformConfig::default()
        });
        let err = writer
            .persist(
                &AudioBuffer::silence(24_000, 1),
                &GenerationParameters::new("x", "emma"),
                1,
                "0",
            )
            .unwrap_err();
        assert!(matches!(err, GenerationError::Persistence(_)));
    }
}
