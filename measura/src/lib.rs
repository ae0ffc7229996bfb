//! Measura - Unit conversion sessions
//!
//! Builds on `measura-units` with the stateful pieces of a converter:
//! keypad input, persisted preferences and a session tying them together.

mod input;
mod prefs;
mod session;

pub use input::{InputError, UserInput, MAX_SCALE};
pub use prefs::{
    KeyValueStore, MemoryStore, Preferences, last_measure_key, LAST_CONVERTER_KEY,
    LAST_FROM_SYSTEM_KEY,
};
pub use session::{
    ConversionOptions, ConverterSession, SessionConfig, SessionError, SessionState, MAX_MIN_SCALE,
};

pub use measura_core::{Decimal, MeasuraError};
pub use measura_units::{ConvertError, ConverterKind, Measure, MeasurementSystem, UnitConverter};

/// Convert `value` with the converter that owns `from`, or with `converter`
/// when one is given.
pub fn convert(
    converter: Option<ConverterKind>,
    from: Measure,
    to: Measure,
    value: &Decimal,
    min_scale: u32,
) -> Result<Decimal, ConvertError> {
    let kind = match converter {
        Some(kind) => kind,
        None => measura_units::converter_for(from).ok_or_else(|| {
            ConvertError::InvalidArgument(format!("{} belongs to no converter", from))
        })?,
    };
    kind.converter().convert_at_scale(from, to, value, min_scale)
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ConverterSession, KeyValueStore, MemoryStore, Preferences, SessionConfig, UserInput,
    };
    pub use measura_core::Decimal;
    pub use measura_units::{ConverterKind, Measure, MeasurementSystem};
}
