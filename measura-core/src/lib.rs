//! Measura Core - Fundamental types
//!
//! This crate provides the core types used throughout Measura:
//! - `Decimal`: Arbitrary precision decimals with half-even division
//! - `MeasuraError`: Structured errors for tool consumers

mod decimal;
mod error;

pub use decimal::{Decimal, DecimalError};
pub use error::{MeasuraError, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Decimal, DecimalError, MeasuraError};
    pub use crate::error::codes;
}
