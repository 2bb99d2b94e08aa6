use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How to settle a day recorded both locally and remotely. Only
/// [`ConflictStrategy::CloudWins`] is implemented; the others have no agreed
/// semantics yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictStrategy {
    CloudWins,
    LocalWins,
    NewerWins,
    Merge,
}

impl fmt::Display for ConflictStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictStrategy::CloudWins => write!(f, "cloud-wins"),
            ConflictStrategy::LocalWins => write!(f, "local-wins"),
            ConflictStrategy::NewerWins => write!(f, "newer-wins"),
            ConflictStrategy::Merge => write!(f, "merge"),
        }
    }
}

impl FromStr for ConflictStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "cloud-wins" | "cloud" => Ok(ConflictStrategy::CloudWins),
            "local-wins" | "local" => Ok(ConflictStrategy::LocalWins),
            "newer-wins" | "newer" => Ok(ConflictStrategy::NewerWins),
            "merge" => Ok(ConflictStrategy::Merge),
            _ => Err(format!(
                "Invalid conflict strategy: {}. Valid options: cloud-wins, local-wins, newer-wins, merge",
                s
            )),
        }
    }
}
