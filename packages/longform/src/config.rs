use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use longform_domain::{DEFAULT_KIND, GenerationError, METADATA_VERSION};

/// Sample rate of the tortoise vocoder output.
pub const SAMPLE_RATE: u32 = 24_000;

// ------------ Plot -----------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    /// RGB background
    pub background: [u8; 3],
    /// RGB waveform colour
    pub foreground: [u8; 3],
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 200,
            background: [255, 255, 255],
            foreground: [31, 119, 180],
        }
    }
}

// ------------ LongformConfig (root) -------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongformConfig {
    /// Root under which every result bundle directory is created.
    pub output_dir: PathBuf,
    /// Rate the preview model renders at; written results keep their own rate.
    pub sample_rate: u32,
    /// Model tag used in bundle names and as the metadata `_type`.
    pub model_tag: String,
    pub metadata_version: String,
    pub plot: PlotConfig,
}

impl Default for LongformConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("outputs"),
            sample_rate: SAMPLE_RATE,
            model_tag: DEFAULT_KIND.to_string(),
            metadata_version: METADATA_VERSION.to_string(),
            plot: PlotConfig::default(),
        }
    }
}

impl LongformConfig {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.sample_rate == 0 {
            return Err(GenerationError::Configuration(
                "sample_rate must be > 0".to_string(),
            ));
        }
        if self.model_tag.trim().is_empty() {
            return Err(GenerationError::Configuration(
                "model_tag must not be empty".to_string(),
            ));
        }
        if self.plot.width == 0 || self.plot.height == 0 {
            return Err(GenerationError::Configuration(format!(
                "plot must be at least 1x1, got {}x{}",
                self.plot.width, self.plot.height
            )));
        }
        Ok(())
    }

    /// Load a JSON config from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GenerationError> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path).map_err(|e| {
            GenerationError::Configuration(format!("read {}: {e}", path.display()))
        })?;
        let cfg: LongformConfig = serde_json::from_str(&txt).map_err(|e| {
            GenerationError::Configuration(format!("parse {}: {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save to disk (pretty‑printed).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("longform.json");

        let mut cfg = LongformConfig::default();
        cfg.output_dir = dir.path().join("out");
        cfg.plot.width = 320;
        cfg.save(&path).unwrap();

        assert_eq!(LongformConfig::load(&path).unwrap(), cfg);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, r#"{ "model_tag": "preview" }"#).unwrap();

        let cfg = LongformConfig::load(&path).unwrap();
        assert_eq!(cfg.model_tag, "preview");
        assert_eq!(cfg.sample_rate, SAMPLE_RATE);
    }

    #[test]
    fn rejects_zero_sample_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, r#"{ "sample_rate": 0 }"#).unwrap();
        assert!(matches!(
            LongformConfig::load(&path),
            Err(GenerationError::Configuration(_))
        ));
    }
}
