//! Conversion errors

use thiserror::Error;
use measura_core::{codes, DecimalError, MeasuraError};
use crate::{ConverterKind, Measure};

/// Errors raised by rule construction and conversion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Contract violation while building a rule or converter
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The measure has no rule in the converter asked to convert it
    #[error("{measure} is not supported by the {converter} converter")]
    UnsupportedUnit {
        measure: Measure,
        converter: ConverterKind,
    },

    #[error("unknown measure: {0}")]
    UnknownMeasure(String),

    #[error("unknown converter: {0}")]
    UnknownConverter(String),

    #[error("unknown measurement system: {0}")]
    UnknownSystem(String),

    #[error(transparent)]
    Decimal(#[from] DecimalError),
}

impl From<ConvertError> for MeasuraError {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::InvalidArgument(details) => MeasuraError::invalid_argument(details),
            ConvertError::UnsupportedUnit { measure, converter } => MeasuraError::new(
                codes::UNSUPPORTED_UNIT,
                format!("{} is not supported by the {} converter", measure, converter),
            )
            .with_suggestion(format!(
                "Supported units: {}",
                converter
                    .converter()
                    .supported_units(None)
                    .iter()
                    .map(|m| m.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            ConvertError::UnknownMeasure(name) => {
                MeasuraError::new(codes::UNKNOWN_MEASURE, format!("Unknown measure: {}", name))
                    .with_suggestion("Use list_units to see available measures")
            }
            ConvertError::UnknownConverter(name) => {
                MeasuraError::new(codes::UNKNOWN_CONVERTER, format!("Unknown converter: {}", name))
                    .with_suggestion("Use list_converters to see available converters")
            }
            ConvertError::UnknownSystem(name) => MeasuraError::new(
                codes::UNKNOWN_SYSTEM,
                format!("Unknown measurement system: {}", name),
            )
            .with_suggestion("Use US or METRIC"),
            ConvertError::Decimal(e) => e.into(),
        }
    }
}
