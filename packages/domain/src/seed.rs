//! Reproducibility seed with an "unset" sentinel.
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Integer written to disk and accepted on input for [`Seed::Random`].
pub const RANDOM_SEED_SENTINEL: i64 = -1;

/// Seed for one generation request.
///
/// `Random` lets the model pick; once the model reports the seed it actually
/// used, the request continues with `Fixed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Seed {
    #[default]
    Random,
    Fixed(u64),
}

impl Seed {
    /// The pinned seed, if any.
    pub fn pinned(self) -> Option<u64> {
        match self {
            Seed::Random => None,
            Seed::Fixed(seed) => Some(seed),
        }
    }

    /// JSON form used in metadata documents. Covers the full `u64` range.
    pub fn to_json(self) -> serde_json::Value {
        match self {
            Seed::Random => serde_json::Value::from(RANDOM_SEED_SENTINEL),
            Seed::Fixed(seed) => serde_json::Value::from(seed),
        }
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        if value < 0 {
            Seed::Random
        } else {
            Seed::Fixed(value as u64)
        }
    }
}

impl From<Option<u64>> for Seed {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Seed::Random, Seed::Fixed)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Random => write!(f, "random"),
            Seed::Fixed(seed) => write!(f, "{seed}"),
        }
    }
}

impl Serialize for Seed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Seed::Random => serializer.serialize_i64(RANDOM_SEED_SENTINEL),
            Seed::Fixed(seed) => serializer.serialize_u64(*seed),
        }
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Number::deserialize(deserializer)?;
        if let Some(seed) = value.as_u64() {
            Ok(Seed::Fixed(seed))
        } else if value.as_i64().is_some() {
            Ok(Seed::Random)
        } else {
            Err(serde::de::Error::custom(format!(
                "seed must be an integer, got {value}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_round_trips_through_json() {
        assert_eq!(serde_json::to_string(&Seed::Random).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&Seed::Fixed(42)).unwrap(), "42");
        assert_eq!(serde_json::from_str::<Seed>("-1").unwrap(), Seed::Random);
        assert_eq!(serde_json::from_str::<Seed>("7").unwrap(), Seed::Fixed(7));
        assert!(serde_json::from_str::<Seed>("1.5").is_err());
    }

    #[test]
    fn negative_integers_mean_random() {
        assert_eq!(Seed::from(-5), Seed::Random);
        assert_eq!(Seed::from(3), Seed::Fixed(3));
        assert_eq!(Seed::Fixed(3).pinned(), Some(3));
        assert_eq!(Seed::Random.to_json(), serde_json::Value::from(RANDOM_SEED_SENTINEL));
    }

    #[test]
    fn seeds_above_i64_max_stay_fixed() {
        for seed in [u64::MAX, 1 << 63] {
            let json = Seed::Fixed(seed).to_json();
            assert_eq!(json, serde_json::Value::from(seed));
            assert_eq!(serde_json::from_value::<Seed>(json).unwrap(), Seed::Fixed(seed));
        }
    }
}
