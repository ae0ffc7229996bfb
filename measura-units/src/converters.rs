//! Built-in converter table

use std::str::FromStr;
use std::sync::LazyLock;
use measura_core::Decimal;
use crate::{ConversionRule, ConvertError, ConverterKind, Measure, UnitConverter};

/// Global converter table, indexed by `ConverterKind` ordinal
pub static CONVERTERS: LazyLock<Vec<UnitConverter>> = LazyLock::new(|| {
    build_converters().expect("built-in conversion table is valid")
});

/// (target, ratio to base) pairs. Ratios are decimal literals.
const LENGTH_RATIOS: [(Measure, &str); 6] = [
    (Measure::Centimetre, "0.01"),
    (Measure::Kilometre, "1000"),
    (Measure::Inch, "0.0254"),
    (Measure::Feet, "0.3048"),
    (Measure::Yard, "0.9144"),
    (Measure::Mile, "1609.344"),
];

const MASS_RATIOS: [(Measure, &str); 4] = [
    (Measure::Ounce, "28.3495"),
    (Measure::Stone, "6350.29"),
    (Measure::Pound, "453.592"),
    (Measure::Kilogram, "1000"),
];

const VOLUME_RATIOS: [(Measure, &str); 5] = [
    (Measure::Millilitre, "0.001"),
    (Measure::FluidOunce, "0.0295735"),
    (Measure::Cup, "0.236588"),
    (Measure::Pint, "0.473176"),
    (Measure::Gallon, "3.78541"),
];

const ENERGY_RATIOS: [(Measure, &str); 1] = [(Measure::Kilocalorie, "4.184")];

fn ratio_rules(ratios: &[(Measure, &str)]) -> Result<Vec<ConversionRule>, ConvertError> {
    ratios
        .iter()
        .map(|(target, ratio)| ConversionRule::ratio(*target, Decimal::from_str(ratio)?))
        .collect()
}

/// Build and validate every built-in converter, in ordinal order
pub fn build_converters() -> Result<Vec<UnitConverter>, ConvertError> {
    let converters = vec![
        UnitConverter::new(
            ConverterKind::Temperature,
            Measure::Celsius,
            vec![ConversionRule::fahrenheit()],
        )?,
        UnitConverter::new(ConverterKind::Length, Measure::Metre, ratio_rules(&LENGTH_RATIOS)?)?,
        UnitConverter::new(ConverterKind::Mass, Measure::Gram, ratio_rules(&MASS_RATIOS)?)?,
        UnitConverter::new(ConverterKind::Volume, Measure::Litre, ratio_rules(&VOLUME_RATIOS)?)?,
        UnitConverter::new(ConverterKind::Energy, Measure::Kilojoule, ratio_rules(&ENERGY_RATIOS)?)?,
    ];

    for (converter, kind) in converters.iter().zip(ConverterKind::ALL) {
        if converter.kind() != kind {
            return Err(ConvertError::InvalidArgument(format!(
                "converter table out of order: found {} where {} belongs",
                converter.kind(),
                kind
            )));
        }
    }

    Ok(converters)
}
