use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::error::TileError;

/// Which subset of a row-band a provider hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SampleType {
    /// 80% split, augmented with rotations and reshuffled.
    Training,
    /// 20% split, returned as is.
    Validation,
    /// Every tile of the row-band, no split.
    Test,
}

impl SampleType {
    pub const ALL: [SampleType; 3] = [SampleType::Training, SampleType::Validation, SampleType::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            SampleType::Training => "training",
            SampleType::Validation => "validation",
            SampleType::Test => "test",
        }
    }

    /// Training and validation draw from the same seeded split.
    pub fn is_split(&self) -> bool {
        matches!(self, SampleType::Training | SampleType::Validation)
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SampleType {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "training" => Ok(SampleType::Training),
            "validation" => Ok(SampleType::Validation),
            "test" => Ok(SampleType::Test),
            _ => Err(TileError::UnsupportedSampleType(s.to_string())),
        }
    }
}

/// What to do with the pixels left over when the raster extent is not a
/// multiple of the tile size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RemainderPolicy {
    /// Drop the trailing rows and columns that do not fill a whole tile.
    #[default]
    Truncate,
    /// Refuse rasters whose extents are not multiples of the tile size.
    Reject,
}

impl fmt::Display for RemainderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemainderPolicy::Truncate => f.write_str("truncate"),
            RemainderPolicy::Reject => f.write_str("reject"),
        }
    }
}

pub const DEFAULT_VAL_FRACTION: f64 = 0.2;
pub const DEFAULT_SPLIT_SEED: u64 = 11;
pub const DEFAULT_SHUFFLE_SEED: u64 = 7;

/// Knobs shared by every provider built from the same dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilingConfig {
    pub remainder: RemainderPolicy,
    /// Share of each row-band's tiles held out for validation.
    pub val_fraction: f64,
    /// Seed of the train/validation permutation.
    pub split_seed: u64,
    /// Seed of the permutation applied after augmentation.
    pub shuffle_seed: u64,
}

impl Default for TilingConfig {
    fn default() -> Self {
        TilingConfig {
            remainder: RemainderPolicy::Truncate,
            val_fraction: DEFAULT_VAL_FRACTION,
            split_seed: DEFAULT_SPLIT_SEED,
            shuffle_seed: DEFAULT_SHUFFLE_SEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_sample_types() {
        assert_eq!("training".parse::<SampleType>().unwrap(), SampleType::Training);
        assert_eq!(" Validation ".parse::<SampleType>().unwrap(), SampleType::Validation);
        assert_eq!("TEST".parse::<SampleType>().unwrap(), SampleType::Test);
    }

    #[test]
    fn rejects_unknown_sample_type() {
        let err = "holdout".parse::<SampleType>().unwrap_err();
        assert!(matches!(err, TileError::UnsupportedSampleType(ref s) if s == "holdout"));
        assert!(err.to_string().contains("holdout"));
    }

    #[test]
    fn defaults_match_cli_defaults() {
        let cfg = TilingConfig::default();
        assert_eq!(cfg.remainder, RemainderPolicy::Truncate);
        assert_eq!(cfg.val_fraction, 0.2);
        assert_eq!(cfg.split_seed, 11);
        assert_eq!(cfg.shuffle_seed, 7);
    }
}
