//! Converter session
//!
//! Headless counterpart of a converter screen: one selected converter, a
//! "from" measure in the from-system, a "to" measure in the opposite system,
//! and the keypad input. Selections are persisted through `Preferences`.

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, info};
use measura_core::{Decimal, MeasuraError, codes};
use measura_units::{ConvertError, ConverterKind, Measure, MeasurementSystem};
use crate::{InputError, KeyValueStore, Preferences, UserInput, MAX_SCALE};

/// Errors raised by session operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Input(#[from] InputError),
}

impl From<SessionError> for MeasuraError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::IllegalState(details) => MeasuraError::illegal_state(details)
                .with_suggestion("Select a converter first"),
            SessionError::Convert(e) => e.into(),
            SessionError::Input(InputError::InvalidDigit(d)) => {
                MeasuraError::new(codes::INVALID_DIGIT, format!("Invalid digit: {}", d))
                    .with_suggestion("Digits must be 0-9")
            }
            SessionError::Input(InputError::ScaleLimit) => MeasuraError::new(
                codes::SCALE_LIMIT,
                format!("Input already has {} fractional digits", MAX_SCALE),
            )
            .with_suggestion("Clear the input to start a new value"),
            SessionError::Input(e) => MeasuraError::new(codes::MALFORMED_STATE, e.to_string()),
        }
    }
}

/// Largest minimum scale a session accepts
pub const MAX_MIN_SCALE: u32 = 1000;

/// Session tuning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Minimum scale for every division in a conversion
    pub min_scale: u32,
}

impl SessionConfig {
    /// Values above `MAX_MIN_SCALE` are clamped to it
    pub fn with_min_scale(mut self, min_scale: u32) -> Self {
        self.min_scale = min_scale.min(MAX_MIN_SCALE);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Selection {
    converter: ConverterKind,
    from: Measure,
    to: Measure,
}

/// Choices to present for the from/to pickers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionOptions {
    pub from_units: Vec<Measure>,
    pub from: Measure,
    pub to_units: Vec<Measure>,
    pub to: Measure,
}

/// Serializable session snapshot made of ordinals and the encoded input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub converter: Option<u8>,
    pub from: Option<u8>,
    pub to: Option<u8>,
    pub from_system: u8,
    pub input: Vec<u8>,
}

/// One user's conversion session
#[derive(Debug)]
pub struct ConverterSession<S> {
    prefs: Preferences<S>,
    config: SessionConfig,
    from_system: MeasurementSystem,
    selection: Option<Selection>,
    input: UserInput,
}

const NO_CONVERTER: &str = "a unit converter must be selected first";

impl<S: KeyValueStore> ConverterSession<S> {
    /// New session with cleared input and the persisted from-system.
    /// No converter is selected yet.
    pub fn new(prefs: Preferences<S>, config: SessionConfig) -> Self {
        let from_system = prefs.last_from_system();
        Self {
            prefs,
            config,
            from_system,
            selection: None,
            input: UserInput::new(),
        }
    }

    pub fn preferences(&self) -> &Preferences<S> {
        &self.prefs
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn input(&self) -> &UserInput {
        &self.input
    }

    pub fn from_system(&self) -> MeasurementSystem {
        self.from_system
    }

    pub fn converter(&self) -> Option<ConverterKind> {
        self.selection.map(|s| s.converter)
    }

    pub fn from(&self) -> Option<Measure> {
        self.selection.map(|s| s.from)
    }

    pub fn to(&self) -> Option<Measure> {
        self.selection.map(|s| s.to)
    }

    fn selection(&self) -> Result<Selection, SessionError> {
        self.selection
            .ok_or_else(|| SessionError::IllegalState(NO_CONVERTER.to_string()))
    }

    fn first_unit(
        converter: ConverterKind,
        system: MeasurementSystem,
    ) -> Result<Measure, SessionError> {
        converter
            .converter()
            .supported_units(Some(system))
            .first()
            .copied()
            .ok_or_else(|| {
                SessionError::IllegalState(format!("{} has no {} units", converter, system))
            })
    }

    /// Select a converter. Reselecting the current one keeps the measures.
    pub fn select_converter(&mut self, converter: ConverterKind) -> Result<(), SessionError> {
        if self.converter() == Some(converter) {
            return Ok(());
        }

        let from_default = Self::first_unit(converter, self.from_system)?;
        let to_default = Self::first_unit(converter, self.from_system.opposite())?;
        let from = self.prefs.read_last_measure(converter, from_default);
        let to = self.prefs.read_last_measure(converter, to_default);

        info!(converter = %converter, from = %from, to = %to, "converter selected");
        self.prefs.set_last_converter(converter);
        self.selection = Some(Selection { converter, from, to });
        Ok(())
    }

    /// Select the converter the preferences remember
    pub fn select_last_converter(&mut self) -> Result<(), SessionError> {
        let converter = self.prefs.last_converter();
        self.select_converter(converter)
    }

    fn checked_measure(&self, measure: Measure) -> Result<Selection, SessionError> {
        let selection = self.selection()?;
        if !selection.converter.converter().supports(measure) {
            return Err(ConvertError::UnsupportedUnit {
                measure,
                converter: selection.converter,
            }
            .into());
        }
        Ok(selection)
    }

    pub fn change_from(&mut self, from: Measure) -> Result<(), SessionError> {
        let selection = self.checked_measure(from)?;
        if selection.from == from {
            return Ok(());
        }
        self.selection = Some(Selection { from, ..selection });
        self.prefs.save_last_measure(selection.converter, from);
        Ok(())
    }

    pub fn change_to(&mut self, to: Measure) -> Result<(), SessionError> {
        let selection = self.checked_measure(to)?;
        if selection.to == to {
            return Ok(());
        }
        self.selection = Some(Selection { to, ..selection });
        self.prefs.save_last_measure(selection.converter, to);
        Ok(())
    }

    pub fn append_digit(&mut self, digit: u8) -> Result<(), SessionError> {
        self.input.append_digit(digit)?;
        Ok(())
    }

    pub fn append_decimal_point(&mut self) {
        self.input.append_decimal_point();
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// Flip the from-system and exchange the from/to measures
    pub fn swap(&mut self) -> Result<(), SessionError> {
        let selection = self.selection()?;
        self.from_system = self.from_system.opposite();
        self.prefs.set_last_from_system(self.from_system);
        self.selection = Some(Selection {
            from: selection.to,
            to: selection.from,
            ..selection
        });
        debug!(from_system = %self.from_system, "swapped measurement systems");
        Ok(())
    }

    /// The current input converted from `from` to `to`
    pub fn result(&self) -> Result<Decimal, SessionError> {
        let selection = self.selection()?;
        let converted = selection.converter.converter().convert_at_scale(
            selection.from,
            selection.to,
            self.input.value(),
            self.config.min_scale,
        )?;
        Ok(converted)
    }

    pub fn options(&self) -> Result<ConversionOptions, SessionError> {
        let selection = self.selection()?;
        let converter = selection.converter.converter();
        Ok(ConversionOptions {
            from_units: converter.supported_units(Some(self.from_system)),
            from: selection.from,
            to_units: converter.supported_units(Some(self.from_system.opposite())),
            to: selection.to,
        })
    }

    // ========== State Restoration ==========

    pub fn snapshot(&self) -> SessionState {
        SessionState {
            converter: self.selection.map(|s| s.converter.ordinal()),
            from: self.selection.map(|s| s.from.ordinal()),
            to: self.selection.map(|s| s.to.ordinal()),
            from_system: self.from_system.ordinal(),
            input: self.input.encode(),
        }
    }

    /// Restore a snapshot without touching the preferences
    pub fn restore(&mut self, state: &SessionState) -> Result<(), SessionError> {
        let malformed = |what: &str| SessionError::IllegalState(format!("snapshot has {}", what));

        let from_system = MeasurementSystem::from_ordinal(state.from_system)
            .ok_or_else(|| malformed("an unknown measurement system"))?;
        let input = UserInput::decode(&state.input)?;

        let selection = match (state.converter, state.from, state.to) {
            (None, None, None) => None,
            (Some(c), Some(f), Some(t)) => {
                let converter = ConverterKind::from_ordinal(c)
                    .ok_or_else(|| malformed("an unknown converter"))?;
                let from = Measure::from_ordinal(f).ok_or_else(|| malformed("an unknown measure"))?;
                let to = Measure::from_ordinal(t).ok_or_else(|| malformed("an unknown measure"))?;
                for measure in [from, to] {
                    if !converter.converter().supports(measure) {
                        return Err(ConvertError::UnsupportedUnit { measure, converter }.into());
                    }
                }
                Some(Selection { converter, from, to })
            }
            _ => return Err(malformed("a partial selection")),
        };

        self.from_system = from_system;
        self.selection = selection;
        self.input = input;
        Ok(())
    }
}
