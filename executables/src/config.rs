//! Loading the configuration shared by the binaries.
use std::path::Path;

use algorithms::{
    scheduling::{DEFAULT_HI, DEFAULT_LO},
    segment_tree::DynamicSegmentTree,
};
use common::{SegError, SegResult};
use serde::Deserialize;

/// See config/replay/default.dhall for documentation on the fields
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ReplayConfig {
    /// Lowest position of the tree.
    pub lo: i64,
    /// Highest position of the tree.
    pub hi: i64,
    /// Value every position holds before the first update.
    pub initial_value: i64,
    /// Bookings allowed at the same time by the bounded calendar.
    pub max_overlap: i64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            lo: DEFAULT_LO,
            hi: DEFAULT_HI,
            initial_value: 0,
            max_overlap: 2,
        }
    }
}

impl ReplayConfig {
    /// Reads and validates the dhall config at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SegResult<Self> {
        let conf: ReplayConfig = serde_dhall::from_file(path)
            .parse()
            .map_err(|err| SegError::RethrowSegError("Could not read config".into(), Box::new(err)))?;
        conf.validated()
    }

    /// Parses a config from dhall source, mostly useful for tests.
    pub fn from_dhall_str(source: &str) -> SegResult<Self> {
        let conf: ReplayConfig = serde_dhall::from_str(source).parse()?;
        conf.validated()
    }

    fn validated(self) -> SegResult<Self> {
        if self.lo > self.hi {
            return Err(format!("Config: lo = {} is bigger than hi = {}", self.lo, self.hi).into());
        }
        if self.max_overlap < 1 {
            return Err(format!("Config: max_overlap = {} has to be positive", self.max_overlap).into());
        }
        Ok(self)
    }

    /// A fresh tree with the configured borders and initial value.
    pub fn tree(&self) -> SegResult<DynamicSegmentTree> {
        DynamicSegmentTree::new(self.lo, self.hi, self.initial_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_config() -> SegResult<()> {
        let source = include_str!("../../config/replay/default.dhall");
        assert_eq!(ReplayConfig::from_dhall_str(source)?, ReplayConfig::default());
        Ok(())
    }

    #[test]
    fn negative_values_parse() -> SegResult<()> {
        let conf = ReplayConfig::from_dhall_str(
            "{ lo = -10, hi = +10, initial_value = -3, max_overlap = 1 }",
        )?;
        assert_eq!(conf.lo, -10);
        assert_eq!(conf.initial_value, -3);
        assert_eq!(conf.tree()?.point_query(0)?, -3);
        Ok(())
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert!(
            ReplayConfig::from_dhall_str("{ lo = 5, hi = 4, initial_value = 0, max_overlap = 1 }")
                .is_err()
        );
        assert!(
            ReplayConfig::from_dhall_str("{ lo = 0, hi = 4, initial_value = 0, max_overlap = 0 }")
                .is_err()
        );
        assert!(ReplayConfig::from_dhall_str("{ lo = 0 }").is_err());
    }
}
