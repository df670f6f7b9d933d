use std::fmt;
use std::str::FromStr;

use strum_macros::EnumIter;

use crate::error::EncoderError;

/// Rule collapsing per-position vectors into one vector per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Aggregation {
    MeanPool,
    MaxPool,
    FinalState,
}

impl Aggregation {
    pub fn name(&self) -> &'static str {
        match self {
            Aggregation::MeanPool => "meanpool",
            Aggregation::MaxPool => "maxpool",
            Aggregation::FinalState => "final_state",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Aggregation {
    type Err = EncoderError;

    /// Exact match only; whitespace and case are significant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meanpool" => Ok(Aggregation::MeanPool),
            "maxpool" => Ok(Aggregation::MaxPool),
            "final_state" => Ok(Aggregation::FinalState),
            _ => Err(EncoderError::UnsupportedAggregation(s.to_string())),
        }
    }
}
