//! Unit converters: a base measure plus one rule per supported measure

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use measura_core::Decimal;
use crate::{ConversionRule, ConvertError, Direction, Measure, MeasurementSystem};
use crate::converters::CONVERTERS;

/// The closed set of converter families.
///
/// Discriminants are persisted ordinals and must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum ConverterKind {
    Temperature = 0,
    Length = 1,
    Mass = 2,
    Volume = 3,
    Energy = 4,
}

impl ConverterKind {
    pub const ALL: [ConverterKind; 5] = [
        ConverterKind::Temperature,
        ConverterKind::Length,
        ConverterKind::Mass,
        ConverterKind::Volume,
        ConverterKind::Energy,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            ConverterKind::Temperature => "TEMPERATURE",
            ConverterKind::Length => "LENGTH",
            ConverterKind::Mass => "MASS",
            ConverterKind::Volume => "VOLUME",
            ConverterKind::Energy => "ENERGY",
        }
    }

    /// Opaque display-name token, resolved by the presentation layer
    pub fn display_token(self) -> &'static str {
        match self {
            ConverterKind::Temperature => "temperature",
            ConverterKind::Length => "length",
            ConverterKind::Mass => "mass",
            ConverterKind::Volume => "volume",
            ConverterKind::Energy => "energy",
        }
    }

    /// The built-in converter for this family
    pub fn converter(self) -> &'static UnitConverter {
        &CONVERTERS[self as usize]
    }
}

impl fmt::Display for ConverterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConverterKind {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConvertError::UnknownConverter(s.to_string()))
    }
}

/// Converts values between the measures of one family via its base measure
#[derive(Debug, Clone)]
pub struct UnitConverter {
    kind: ConverterKind,
    base: Measure,
    rules: HashMap<Measure, ConversionRule>,
}

impl UnitConverter {
    /// Build a converter. The base's identity rule is added here; `rules`
    /// must not contain the base or any measure twice.
    pub fn new(
        kind: ConverterKind,
        base: Measure,
        rules: Vec<ConversionRule>,
    ) -> Result<Self, ConvertError> {
        let mut map = HashMap::with_capacity(rules.len() + 1);
        map.insert(base, ConversionRule::identity(base));

        for rule in rules {
            let target = rule.target();
            if map.insert(target, rule).is_some() {
                return Err(ConvertError::InvalidArgument(format!(
                    "{} appears more than once in the {} converter",
                    target, kind
                )));
            }
        }

        Ok(Self { kind, base, rules: map })
    }

    pub fn kind(&self) -> ConverterKind {
        self.kind
    }

    pub fn base(&self) -> Measure {
        self.base
    }

    pub fn supports(&self, measure: Measure) -> bool {
        self.rules.contains_key(&measure)
    }

    pub fn rule(&self, measure: Measure) -> Option<&ConversionRule> {
        self.rules.get(&measure)
    }

    fn rule_or_unsupported(&self, measure: Measure) -> Result<&ConversionRule, ConvertError> {
        self.rule(measure).ok_or(ConvertError::UnsupportedUnit {
            measure,
            converter: self.kind,
        })
    }

    /// Measures with a rule in this converter, base included, sorted by
    /// ascending weight and optionally restricted to one system.
    ///
    /// Equal weights have no guaranteed relative order.
    pub fn supported_units(&self, system: Option<MeasurementSystem>) -> Vec<Measure> {
        let mut units: Vec<Measure> = Measure::ALL
            .into_iter()
            .filter(|m| self.supports(*m))
            .filter(|m| system.map_or(true, |s| m.system() == s))
            .collect();
        units.sort_by_key(|m| m.weight());
        units
    }

    /// Convert `value` from one measure to another
    pub fn convert(
        &self,
        from: Measure,
        to: Measure,
        value: &Decimal,
    ) -> Result<Decimal, ConvertError> {
        self.convert_at_scale(from, to, value, 0)
    }

    /// Convert with every division rounded at no less than `min_scale`
    pub fn convert_at_scale(
        &self,
        from: Measure,
        to: Measure,
        value: &Decimal,
        min_scale: u32,
    ) -> Result<Decimal, ConvertError> {
        let from_rule = self.rule_or_unsupported(from)?;
        let to_rule = self.rule_or_unsupported(to)?;

        let base_value = from_rule.apply(value, Direction::ToBase, min_scale)?;
        to_rule.apply(&base_value, Direction::FromBase, min_scale)
    }
}

/// The converter family a measure belongs to
pub fn converter_for(measure: Measure) -> Option<ConverterKind> {
    ConverterKind::ALL
        .into_iter()
        .find(|kind| kind.converter().supports(measure))
}
