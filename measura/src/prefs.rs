//! Persisted user preferences
//!
//! Preferences are kept in an injected key-value store under ordinal-based
//! keys. The keys and the ordinals behind them are a compatibility contract:
//! a saved `last_measure_12` must mean the same thing after an upgrade.

use std::collections::HashMap;
use tracing::debug;
use measura_units::{ConverterKind, Measure, MeasurementSystem};

pub const LAST_CONVERTER_KEY: &str = "last_converter";
pub const LAST_FROM_SYSTEM_KEY: &str = "last_from_system";

/// Minimal integer key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<i64>;
    fn set(&mut self, key: &str, value: i64);
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }
}

/// `last_measure_<converterOrdinal><systemOrdinal>`
pub fn last_measure_key(converter: ConverterKind, system: MeasurementSystem) -> String {
    format!("last_measure_{}{}", converter.ordinal(), system.ordinal())
}

fn stored_ordinal<S: KeyValueStore>(store: &S, key: &str) -> Option<u8> {
    store.get(key).and_then(|v| u8::try_from(v).ok())
}

/// Typed access to the preferences kept in a `KeyValueStore`
#[derive(Debug, Clone)]
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Remember `measure` as the last one used in its own system
    pub fn save_last_measure(&mut self, converter: ConverterKind, measure: Measure) {
        let key = last_measure_key(converter, measure.system());
        debug!(key = %key, measure = %measure, "saving last measure");
        self.store.set(&key, i64::from(measure.ordinal()));
    }

    /// The last measure used in `default`'s system, or `default` when nothing
    /// usable is stored
    pub fn read_last_measure(&self, converter: ConverterKind, default: Measure) -> Measure {
        let key = last_measure_key(converter, default.system());
        let Some(ordinal) = stored_ordinal(&self.store, &key) else {
            return default;
        };

        converter
            .converter()
            .supported_units(Some(default.system()))
            .into_iter()
            .find(|m| m.ordinal() == ordinal)
            .unwrap_or(default)
    }

    /// Last used converter, LENGTH when unset
    pub fn last_converter(&self) -> ConverterKind {
        stored_ordinal(&self.store, LAST_CONVERTER_KEY)
            .and_then(ConverterKind::from_ordinal)
            .unwrap_or(ConverterKind::Length)
    }

    pub fn set_last_converter(&mut self, converter: ConverterKind) {
        debug!(converter = %converter, "saving last converter");
        self.store.set(LAST_CONVERTER_KEY, i64::from(converter.ordinal()));
    }

    /// Last used "from" system, US when unset
    pub fn last_from_system(&self) -> MeasurementSystem {
        stored_ordinal(&self.store, LAST_FROM_SYSTEM_KEY)
            .and_then(MeasurementSystem::from_ordinal)
            .unwrap_or(MeasurementSystem::Us)
    }

    pub fn set_last_from_system(&mut self, system: MeasurementSystem) {
        debug!(system = %system, "saving last from system");
        self.store.set(LAST_FROM_SYSTEM_KEY, i64::from(system.ordinal()));
    }
}
