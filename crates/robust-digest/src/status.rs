//! Classification of a point estimate within a digest

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a digest classified one estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Part of a stable, ready sampling distribution
    Consistent,
    /// Kept, but the distribution is not yet stable enough
    Outlier,
    /// Dropped to respect the maximum digest size
    Rejected,
}

impl Status {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Consistent => "consistent",
            Self::Outlier => "outlier",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
