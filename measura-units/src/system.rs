//! Measurement systems

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::ConvertError;

/// US customary or metric grouping of measures.
///
/// Discriminants are persisted ordinals and must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum MeasurementSystem {
    Us = 0,
    Metric = 1,
}

impl MeasurementSystem {
    pub const ALL: [MeasurementSystem; 2] = [MeasurementSystem::Us, MeasurementSystem::Metric];

    /// The other system. `x.opposite().opposite() == x`.
    pub fn opposite(self) -> Self {
        match self {
            MeasurementSystem::Us => MeasurementSystem::Metric,
            MeasurementSystem::Metric => MeasurementSystem::Us,
        }
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            MeasurementSystem::Us => "US",
            MeasurementSystem::Metric => "METRIC",
        }
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MeasurementSystem {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|system| system.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConvertError::UnknownSystem(s.to_string()))
    }
}
