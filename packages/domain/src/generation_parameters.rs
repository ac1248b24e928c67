//! Per-request parameter bundle and its derived views.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::generation_error::GenerationError;
use crate::seed::Seed;
use crate::voice_id::VoiceSelection;

/// Version tag written into every metadata document.
pub const METADATA_VERSION: &str = "0.0.1";

/// Generation kind label written into every metadata document.
pub const DEFAULT_KIND: &str = "tortoise";

/// Field names passed to the model explicitly rather than through the
/// options bag.
pub const RESERVED_FIELDS: [&str; 4] = ["text", "voice", "split_prompt", "seed"];

const MAX_OPTION_KEY_LEN: usize = 100;

/// Everything one user-initiated generation request was asked for.
///
/// `options` is the open set of model-decoding knobs (`preset`,
/// `temperature`, `top_p`, ...). They are forwarded untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub text: String,
    /// One voice, or several joined with `&`
    pub voice: String,
    /// Generate each non-blank line as its own segment
    #[serde(default)]
    pub split_prompt: bool,
    #[serde(default)]
    pub seed: Seed,
    #[serde(default, flatten)]
    pub options: BTreeMap<String, Value>,
}

impl GenerationParameters {
    pub fn new(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
            split_prompt: false,
            seed: Seed::Random,
            options: BTreeMap::new(),
        }
    }

    pub fn with_split_prompt(mut self, split_prompt: bool) -> Self {
        self.split_prompt = split_prompt;
        self
    }

    /// Return the same request pinned to `seed`.
    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = seed.into();
        self
    }

    /// Set one model-decoding option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Parsed voice list.
    pub fn voice_selection(&self) -> Result<VoiceSelection, GenerationError> {
        VoiceSelection::parse(&self.voice)
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        self.voice_selection()?;

        if let Some(key) = self
            .options
            .keys()
            .find(|key| key.is_empty() || key.len() > MAX_OPTION_KEY_LEN)
        {
            return Err(GenerationError::Configuration(format!(
                "option name must be 1..={MAX_OPTION_KEY_LEN} bytes, got {} bytes",
                key.len()
            )));
        }
        Ok(())
    }

    /// Options forwarded to the model as an opaque bag.
    ///
    /// Never contains a [`RESERVED_FIELDS`] key, even if one was inserted into
    /// `options` by hand.
    pub fn to_call_mapping(&self) -> Map<String, Value> {
        self.options
            .iter()
            .filter(|(key, _)| !RESERVED_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Flattened snapshot of every field for persistence, tagged with the
    /// schema version and the `kind` label. The seed is whatever the request
    /// currently holds, so a resolved seed replaces the sentinel.
    pub fn to_metadata_mapping(&self, kind: &str) -> Map<String, Value> {
        let mut map = self.to_call_mapping();
        map.insert("_version".into(), Value::from(METADATA_VERSION));
        map.insert("_type".into(), Value::from(kind));
        map.insert("text".into(), Value::from(self.text.clone()));
        map.insert("voice".into(), Value::from(self.voice.clone()));
        map.insert("split_prompt".into(), Value::from(self.split_prompt));
        map.insert("seed".into(), self.seed.to_json());
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GenerationParameters {
        GenerationParameters::new("Hello.\nWorld.", "emma&tom")
            .with_split_prompt(true)
            .with_option("preset", "fast")
            .with_option("temperature", 0.8)
    }

    #[test]
    fn call_mapping_excludes_reserved_fields() {
        let params = sample()
            .with_option("seed", 99)
            .with_option("text", "sneaky");
        let call = params.to_call_mapping();

        for reserved in RESERVED_FIELDS {
            assert!(!call.contains_key(reserved), "{reserved} leaked");
        }
        assert_eq!(call.get("preset"), Some(&Value::from("fast")));
        assert_eq!(call.len(), 2);
    }

    #[test]
    fn metadata_mapping_tracks_current_seed() {
        let params = sample();
        let before = params.to_metadata_mapping(DEFAULT_KIND);
        assert_eq!(before["seed"], Value::from(-1));
        assert_eq!(before["_version"], Value::from(METADATA_VERSION));
        assert_eq!(before["_type"], Value::from(DEFAULT_KIND));
        assert_eq!(before["voice"], Value::from("emma&tom"));
        assert_eq!(before["temperature"], Value::from(0.8));

        let after = params.with_seed(Seed::Fixed(1234)).to_metadata_mapping(DEFAULT_KIND);
        assert_eq!(after["seed"], Value::from(1234));
    }

    #[test]
    fn metadata_seed_survives_full_u64_range() {
        for seed in [u64::MAX, 1 << 63] {
            let doc = sample()
                .with_seed(Seed::Fixed(seed))
                .to_metadata_mapping(DEFAULT_KIND);
            assert_eq!(doc["seed"], Value::from(seed));
            let reloaded: Seed = serde_json::from_value(doc["seed"].clone()).unwrap();
            assert_eq!(reloaded, Seed::Fixed(seed));

            let params: GenerationParameters =
                serde_json::from_value(Value::Object(doc)).unwrap();
            assert_eq!(params.seed, Seed::Fixed(seed));
        }
    }

    #[test]
    fn validate_rejects_missing_voice() {
        assert!(sample().validate().is_ok());
        assert!(GenerationParameters::new("hi", "").validate().is_err());
    }

    #[test]
    fn deserializes_flattened_options() {
        let params: GenerationParameters = serde_json::from_str(
            r#"{"text":"a","voice":"v","seed":-1,"split_prompt":true,"top_p":0.9}"#,
        )
        .unwrap();
        assert_eq!(params.seed, Seed::Random);
        assert!(params.split_prompt);
        assert_eq!(params.options.get("top_p"), Some(&Value::from(0.9)));
    }
}
