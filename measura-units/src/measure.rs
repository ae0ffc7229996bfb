//! Unit catalog
//!
//! The closed set of measures. Metadata lives in a static table indexed by
//! ordinal, so lookups go through the stable identifier and never through
//! reference identity.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::{ConvertError, MeasurementSystem};
use crate::system::MeasurementSystem::{Metric, Us};

/// A unit of measure.
///
/// Discriminants are definition order and double as persisted ordinals;
/// reordering them invalidates saved preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Measure {
    // temperature
    Celsius = 0,
    Fahrenheit = 1,

    // length
    Metre = 2,
    Centimetre = 3,
    Kilometre = 4,
    Inch = 5,
    Feet = 6,
    Yard = 7,
    Mile = 8,

    // mass
    Gram = 9,
    Kilogram = 10,
    Ounce = 11,
    Stone = 12,
    Pound = 13,

    // volume
    Litre = 14,
    Millilitre = 15,
    FluidOunce = 16,
    Cup = 17,
    Pint = 18,
    Gallon = 19,

    // energy
    Kilocalorie = 20,
    Kilojoule = 21,
}

struct MeasureInfo {
    name: &'static str,
    token: &'static str,
    system: MeasurementSystem,
    weight: i32,
}

const fn info(
    name: &'static str,
    token: &'static str,
    system: MeasurementSystem,
    weight: i32,
) -> MeasureInfo {
    MeasureInfo { name, token, system, weight }
}

/// Indexed by `Measure as usize`.
static CATALOG: [MeasureInfo; 22] = [
    info("CELSIUS", "celsius", Metric, 0),
    info("FAHRENHEIT", "fahrenheit", Us, 0),
    info("METRE", "metres", Metric, 1),
    info("CENTIMETRE", "centimetres", Metric, 0),
    info("KILOMETRE", "kilometres", Metric, 2),
    info("INCH", "inches", Us, 0),
    info("FEET", "feet", Us, 1),
    info("YARD", "yards", Us, 2),
    info("MILE", "miles", Us, 3),
    info("GRAM", "grams", Metric, 0),
    info("KILOGRAM", "kilograms", Metric, 1),
    info("OUNCE", "ounces", Us, 0),
    info("STONE", "stone", Us, 1),
    info("POUND", "pounds", Us, 2),
    info("LITRE", "litres", Metric, 1),
    info("MILLILITRE", "millilitres", Metric, 0),
    info("FLUIDOUNCE", "fluid_ounces", Us, 0),
    info("CUP", "cups", Us, 1),
    info("PINT", "pints", Us, 2),
    info("GALLON", "gallons", Us, 3),
    info("KILOCALORIE", "kilocalories", Us, 0),
    info("KILOJOULE", "kilojoules", Metric, 0),
];

impl Measure {
    /// Every measure in definition order
    pub const ALL: [Measure; 22] = [
        Measure::Celsius,
        Measure::Fahrenheit,
        Measure::Metre,
        Measure::Centimetre,
        Measure::Kilometre,
        Measure::Inch,
        Measure::Feet,
        Measure::Yard,
        Measure::Mile,
        Measure::Gram,
        Measure::Kilogram,
        Measure::Ounce,
        Measure::Stone,
        Measure::Pound,
        Measure::Litre,
        Measure::Millilitre,
        Measure::FluidOunce,
        Measure::Cup,
        Measure::Pint,
        Measure::Gallon,
        Measure::Kilocalorie,
        Measure::Kilojoule,
    ];

    fn info(self) -> &'static MeasureInfo {
        &CATALOG[self as usize]
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Upper-case identifier, e.g. `"FLUIDOUNCE"`
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Opaque display-name token, resolved by the presentation layer
    pub fn display_token(self) -> &'static str {
        self.info().token
    }

    pub fn system(self) -> MeasurementSystem {
        self.info().system
    }

    /// Sort weight. Only comparable between measures of the same converter
    /// and system; ties have no defined order.
    pub fn weight(self) -> i32 {
        self.info().weight
    }
}

/// Every defined measure, in definition order.
pub fn list_all() -> &'static [Measure] {
    &Measure::ALL
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Measure {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConvertError::UnknownMeasure(s.to_string()))
    }
}
