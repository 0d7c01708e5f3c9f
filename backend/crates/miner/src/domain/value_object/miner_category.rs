//! Miner Category Value Object
//!
//! A miner is either a título holder (`titular`) or a subsistence miner
//! (`subsistencia`). The category is fixed at registration and selects
//! the required document set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{MinerError, MinerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinerCategory {
    #[serde(rename = "titular")]
    TitleHolder,
    #[serde(rename = "subsistencia")]
    Subsistence,
}

impl MinerCategory {
    pub const ALL: [MinerCategory; 2] = [MinerCategory::TitleHolder, MinerCategory::Subsistence];

    /// Wire and storage representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            MinerCategory::TitleHolder => "titular",
            MinerCategory::Subsistence => "subsistencia",
        }
    }

    /// Parse the wire representation (case-insensitive, trimmed)
    pub fn parse(s: &str) -> MinerResult<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| MinerError::InvalidCategory(s.trim().to_string()))
    }
}

impl fmt::Display for MinerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MinerCategory {
    type Err = MinerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_categories() {
        assert_eq!(MinerCategory::parse("titular").unwrap(), MinerCategory::TitleHolder);
        assert_eq!(
            MinerCategory::parse(" Subsistencia ").unwrap(),
            MinerCategory::Subsistence
        );
    }

    #[test]
    fn test_parse_unknown_category() {
        match MinerCategory::parse("artisanal") {
            Err(MinerError::InvalidCategory(c)) => assert_eq!(c, "artisanal"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(MinerCategory::parse("").is_err());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&MinerCategory::Subsistence).unwrap();
        assert_eq!(json, "\"subsistencia\"");
        let parsed: MinerCategory = serde_json::from_str("\"titular\"").unwrap();
        assert_eq!(parsed, MinerCategory::TitleHolder);
    }
}
