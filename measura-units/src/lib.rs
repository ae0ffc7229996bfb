//! Measura Units - Exact conversion between units of measure
//!
//! A fixed catalog of measures grouped into five converters, each with one
//! base measure that every conversion passes through.
//!
//! Converters:
//! - Temperature (base: Celsius; Fahrenheit)
//! - Length (base: metre; cm, km, in, ft, yd, mi)
//! - Mass (base: gram; kg, oz, st, lb)
//! - Volume (base: litre; mL, fl oz, cup, pint, gallon)
//! - Energy (base: kilojoule; kcal)
//!
//! All arithmetic is exact decimal arithmetic; divisions round
//! half-to-even. Nothing here logs or performs I/O.

mod system;
mod measure;
mod rule;
mod converter;
mod converters;
mod error;

pub use system::MeasurementSystem;
pub use measure::{Measure, list_all};
pub use rule::{ConversionRule, Direction, RuleKind};
pub use converter::{ConverterKind, UnitConverter, converter_for};
pub use converters::{CONVERTERS, build_converters};
pub use error::ConvertError;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ConversionRule, ConvertError, ConverterKind, Measure, MeasurementSystem, UnitConverter,
    };
    pub use measura_core::Decimal;
}

#[cfg(test)]
mod tests {
    use super::*;
    use measura_core::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    mod table_tests {
        use super::*;

        #[test]
        fn test_table_builds() {
            let converters = build_converters().unwrap();
            assert_eq!(converters.len(), ConverterKind::ALL.len());
        }

        #[test]
        fn test_bases() {
            assert_eq!(ConverterKind::Temperature.converter().base(), Measure::Celsius);
            assert_eq!(ConverterKind::Length.converter().base(), Measure::Metre);
            assert_eq!(ConverterKind::Mass.converter().base(), Measure::Gram);
            assert_eq!(ConverterKind::Volume.converter().base(), Measure::Litre);
            assert_eq!(ConverterKind::Energy.converter().base(), Measure::Kilojoule);
        }

        #[test]
        fn test_every_measure_has_exactly_one_converter() {
            for measure in Measure::ALL {
                let owners = ConverterKind::ALL
                    .iter()
                    .filter(|kind| kind.converter().supports(measure))
                    .count();
                assert_eq!(owners, 1, "{} should belong to one converter", measure);
                assert!(converter_for(measure).is_some());
            }
        }

        #[test]
        fn test_every_converter_covers_both_systems() {
            for kind in ConverterKind::ALL {
                for system in MeasurementSystem::ALL {
                    assert!(
                        !kind.converter().supported_units(Some(system)).is_empty(),
                        "{} has no {} units",
                        kind,
                        system
                    );
                }
            }
        }

        #[test]
        fn test_converter_for() {
            assert_eq!(converter_for(Measure::Stone), Some(ConverterKind::Mass));
            assert_eq!(converter_for(Measure::Cup), Some(ConverterKind::Volume));
        }
    }

    mod supported_units_tests {
        use super::*;

        #[test]
        fn test_length_us() {
            let units = ConverterKind::Length.converter().supported_units(Some(MeasurementSystem::Us));
            assert_eq!(units, vec![Measure::Inch, Measure::Feet, Measure::Yard, Measure::Mile]);
        }

        #[test]
        fn test_length_metric() {
            let units = ConverterKind::Length.converter().supported_units(Some(MeasurementSystem::Metric));
            assert_eq!(units, vec![Measure::Centimetre, Measure::Metre, Measure::Kilometre]);
        }

        #[test]
        fn test_unfiltered_is_sorted_by_weight() {
            let units = ConverterKind::Length.converter().supported_units(None);
            assert_eq!(units.len(), 7);
            assert!(units.windows(2).all(|w| w[0].weight() <= w[1].weight()));
        }

        #[test]
        fn test_volume_metric() {
            let units = ConverterKind::Volume.converter().supported_units(Some(MeasurementSystem::Metric));
            assert_eq!(units, vec![Measure::Millilitre, Measure::Litre]);
        }
    }

    mod convert_tests {
        use super::*;

        #[test]
        fn test_temperature() {
            let t = ConverterKind::Temperature.converter();
            assert_eq!(t.convert(Measure::Celsius, Measure::Fahrenheit, &dec("0")).unwrap(), dec("32"));
            assert_eq!(t.convert(Measure::Celsius, Measure::Fahrenheit, &dec("100")).unwrap(), dec("212"));
            assert_eq!(t.convert(Measure::Fahrenheit, Measure::Celsius, &dec("32")).unwrap(), dec("0"));
        }

        #[test]
        fn test_length() {
            let l = ConverterKind::Length.converter();
            assert_eq!(l.convert(Measure::Metre, Measure::Centimetre, &dec("1")).unwrap(), dec("100"));
            assert_eq!(l.convert(Measure::Kilometre, Measure::Metre, &dec("1")).unwrap(), dec("1000"));
            assert_eq!(l.convert(Measure::Mile, Measure::Kilometre, &dec("1.000")).unwrap(), dec("1.609344"));
        }

        #[test]
        fn test_between_non_base_units() {
            let l = ConverterKind::Length.converter();
            // 1 ft = 0.3048 m = 12 in
            assert_eq!(l.convert(Measure::Feet, Measure::Inch, &dec("1")).unwrap(), dec("12"));

            let m = ConverterKind::Mass.converter();
            assert_eq!(m.convert(Measure::Kilogram, Measure::Gram, &dec("2.5")).unwrap(), dec("2500"));
        }

        #[test]
        fn test_convert_at_scale() {
            let l = ConverterKind::Length.converter();
            let natural = l.convert(Measure::Metre, Measure::Inch, &dec("1")).unwrap();
            assert_eq!(natural.to_string(), "39");
            let scaled = l.convert_at_scale(Measure::Metre, Measure::Inch, &dec("1"), 4).unwrap();
            assert_eq!(scaled.to_string(), "39.3701");
        }

        #[test]
        fn test_energy() {
            let e = ConverterKind::Energy.converter();
            assert_eq!(e.convert(Measure::Kilocalorie, Measure::Kilojoule, &dec("100")).unwrap(), dec("418.4"));
            assert_eq!(e.convert(Measure::Kilojoule, Measure::Kilocalorie, &dec("418.4")).unwrap(), dec("100"));
        }

        #[test]
        fn test_base_to_base_is_exact() {
            for kind in ConverterKind::ALL {
                let converter = kind.converter();
                let base = converter.base();
                for value in ["0", "1", "-17.25", "123456789.987654321"] {
                    let v = dec(value);
                    let result = converter.convert(base, base, &v).unwrap();
                    assert_eq!(result.to_string(), v.to_string());
                }
            }
        }

        #[test]
        fn test_ratio_round_trip_within_one_unit() {
            for kind in ConverterKind::ALL {
                let converter = kind.converter();
                let base = converter.base();
                for target in converter.supported_units(None) {
                    let v = dec("7.250");
                    let there = converter.convert(target, base, &v).unwrap();
                    let back = converter.convert(base, target, &there).unwrap();
                    let unit = Decimal::from_parts(1.into(), back.scale());
                    let diff = back.sub(&v);
                    let diff = if diff.is_negative() { diff.neg() } else { diff };
                    assert!(diff <= unit, "{} -> {} -> {}: {}", target, base, target, back);
                }
            }
        }

        #[test]
        fn test_wrong_converter_is_unsupported() {
            let t = ConverterKind::Temperature.converter();
            let result = t.convert(Measure::Inch, Measure::Celsius, &dec("1"));
            assert_eq!(
                result,
                Err(ConvertError::UnsupportedUnit {
                    measure: Measure::Inch,
                    converter: ConverterKind::Temperature,
                })
            );
        }

        #[test]
        fn test_unsupported_maps_to_structured_error() {
            let m = ConverterKind::Mass.converter();
            let err = m.convert(Measure::Mile, Measure::Gram, &dec("1")).unwrap_err();
            let structured: measura_core::MeasuraError = err.into();
            assert_eq!(structured.code, measura_core::codes::UNSUPPORTED_UNIT);
            assert!(structured.suggestion.unwrap().contains("GRAM"));
        }
    }
}
