//! Scenario keys and the file names they resolve to.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A (climate model, emissions pathway) pair selecting one modeled
/// collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScenarioKey {
    pub gcm: String,
    pub rcp: String,
}

impl ScenarioKey {
    pub fn new(gcm: impl Into<String>, rcp: impl Into<String>) -> Self {
        Self {
            gcm: gcm.into(),
            rcp: rcp.into(),
        }
    }

    /// File name of this scenario's collection, e.g. `AR5_2015_GFDL-CM3_rcp60.json`.
    pub fn file_name(&self, prefix: &str) -> String {
        format!("{}_{}_{}.json", prefix, self.gcm, self.rcp)
    }

    /// Inverse of [`ScenarioKey::file_name`]. Returns `None` for names that
    /// do not carry the prefix or do not split into model and pathway.
    pub fn from_file_name(prefix: &str, file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(".json")?;
        let rest = stem.strip_prefix(prefix)?.strip_prefix('_')?;
        let (gcm, rcp) = rest.rsplit_once('_')?;
        if gcm.is_empty() || rcp.is_empty() {
            return None;
        }
        Some(Self::new(gcm, rcp))
    }
}

impl fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.gcm, self.rcp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_parses_back() {
        let key = ScenarioKey::new("IPSL-CM5A-LR", "rcp85");
        let name = key.file_name("AR5_2015");
        assert_eq!(name, "AR5_2015_IPSL-CM5A-LR_rcp85.json");
        assert_eq!(ScenarioKey::from_file_name("AR5_2015", &name), Some(key));
    }

    #[test]
    fn foreign_names_are_ignored() {
        assert_eq!(ScenarioKey::from_file_name("AR5_2015", "AR5_2015_Observed.json"), None);
        assert_eq!(ScenarioKey::from_file_name("AR5_2015", "notes.txt"), None);
        assert_eq!(ScenarioKey::from_file_name("AR5_2015", "CMIP_GFDL-CM3_rcp60.json"), None);
    }
}
