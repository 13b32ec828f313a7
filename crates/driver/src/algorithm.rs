use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A ParOpt optimization algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Interior point.
    #[default]
    Ip,

    /// Trust region.
    Tr,

    /// Method of moving asymptotes.
    Mma,
}

impl Algorithm {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ip => "ip",
            Self::Tr => "tr",
            Self::Mma => "mma",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown algorithm `{0}`, expected one of: ip, tr, mma")]
pub struct ParseAlgorithmError(String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ip" => Ok(Self::Ip),
            "tr" => Ok(Self::Tr),
            "mma" => Ok(Self::Mma),
            other => Err(ParseAlgorithmError(other.to_owned())),
        }
    }
}
