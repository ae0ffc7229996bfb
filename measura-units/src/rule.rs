//! Conversion rules between a measure and its converter's base measure

use serde::{Serialize, Deserialize};
use measura_core::Decimal;
use crate::{ConvertError, Measure};

/// Which way a rule is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// target value -> base value
    ToBase,
    /// base value -> target value
    FromBase,
}

/// How a target measure relates to the base measure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RuleKind {
    /// `base = target * ratio`
    Linear { ratio: Decimal },
    /// `target = base * numerator / denominator + offset`
    Affine {
        numerator: Decimal,
        denominator: Decimal,
        offset: Decimal,
    },
}

/// Binds one measure to its relationship with the base measure.
///
/// Every division rounds half-to-even at the dividend's scale, or at
/// `min_scale` when that is larger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRule {
    target: Measure,
    kind: RuleKind,
}

impl ConversionRule {
    /// Ratio rule: `to_base(y) = y * n`, `from_base(y) = y / n`.
    ///
    /// Fails with `InvalidArgument` when `n` is zero.
    pub fn ratio(target: Measure, n: Decimal) -> Result<Self, ConvertError> {
        if n.is_zero() {
            return Err(ConvertError::InvalidArgument(format!(
                "cannot map {} to the base with a ratio of 0",
                target
            )));
        }
        Ok(Self { target, kind: RuleKind::Linear { ratio: n } })
    }

    /// Rule for a converter's own base measure
    pub fn identity(target: Measure) -> Self {
        Self { target, kind: RuleKind::Linear { ratio: Decimal::one() } }
    }

    /// Affine rule: `from_base(b) = b * numerator / denominator + offset`.
    ///
    /// Both `numerator` and `denominator` must be non-zero so the rule can be
    /// inverted.
    pub fn affine(
        target: Measure,
        numerator: Decimal,
        denominator: Decimal,
        offset: Decimal,
    ) -> Result<Self, ConvertError> {
        if numerator.is_zero() || denominator.is_zero() {
            return Err(ConvertError::InvalidArgument(format!(
                "affine rule for {} needs a non-zero numerator and denominator",
                target
            )));
        }
        Ok(Self { target, kind: RuleKind::Affine { numerator, denominator, offset } })
    }

    /// Fahrenheit against a Celsius base: `f = c * 9 / 5 + 32`
    pub fn fahrenheit() -> Self {
        Self {
            target: Measure::Fahrenheit,
            kind: RuleKind::Affine {
                numerator: Decimal::from_i64(9),
                denominator: Decimal::from_i64(5),
                offset: Decimal::from_i64(32),
            },
        }
    }

    pub fn target(&self) -> Measure {
        self.target
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    pub fn is_identity(&self) -> bool {
        matches!(&self.kind, RuleKind::Linear { ratio } if *ratio == Decimal::one())
    }

    pub fn to_base(&self, value: &Decimal) -> Result<Decimal, ConvertError> {
        self.apply(value, Direction::ToBase, 0)
    }

    pub fn from_base(&self, value: &Decimal) -> Result<Decimal, ConvertError> {
        self.apply(value, Direction::FromBase, 0)
    }

    /// Evaluate the rule in `direction`, dividing at no less than `min_scale`
    pub fn apply(
        &self,
        value: &Decimal,
        direction: Direction,
        min_scale: u32,
    ) -> Result<Decimal, ConvertError> {
        let divide = |dividend: Decimal, divisor: &Decimal| {
            let scale = dividend.scale().max(min_scale);
            dividend.div_half_even(divisor, scale)
        };

        let result = match (&self.kind, direction) {
            (RuleKind::Linear { ratio }, Direction::ToBase) => value.mul(ratio),
            (RuleKind::Linear { ratio }, Direction::FromBase) => divide(value.clone(), ratio)?,
            (RuleKind::Affine { numerator, denominator, offset }, Direction::FromBase) => {
                divide(value.mul(numerator), denominator)?.add(offset)
            }
            (RuleKind::Affine { numerator, denominator, offset }, Direction::ToBase) => {
                divide(value.sub(offset).mul(denominator), numerator)?
            }
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_zero_ratio_rejected() {
        let result = ConversionRule::ratio(Measure::Inch, Decimal::zero());
        assert!(matches!(result, Err(ConvertError::InvalidArgument(_))));

        let result = ConversionRule::ratio(Measure::Inch, dec("0.000"));
        assert!(matches!(result, Err(ConvertError::InvalidArgument(_))));
    }

    #[test]
    fn test_zero_affine_rejected() {
        let result = ConversionRule::affine(Measure::Fahrenheit, Decimal::zero(), dec("5"), dec("32"));
        assert!(matches!(result, Err(ConvertError::InvalidArgument(_))));
    }

    #[test]
    fn test_ratio_rule() {
        let cm = ConversionRule::ratio(Measure::Centimetre, dec("0.01")).unwrap();
        assert_eq!(cm.to_base(&dec("250")).unwrap(), dec("2.5"));
        assert_eq!(cm.from_base(&dec("1")).unwrap(), dec("100"));
    }

    #[test]
    fn test_from_base_rounds_at_dividend_scale() {
        let inch = ConversionRule::ratio(Measure::Inch, dec("0.0254")).unwrap();
        let at_natural = inch.from_base(&dec("1")).unwrap();
        assert_eq!(at_natural.to_string(), "39");

        let at_four = inch.apply(&dec("1"), Direction::FromBase, 4).unwrap();
        assert_eq!(at_four.to_string(), "39.3701");
    }

    #[test]
    fn test_fahrenheit_rule() {
        let f = ConversionRule::fahrenheit();
        assert_eq!(f.from_base(&dec("0")).unwrap(), dec("32"));
        assert_eq!(f.from_base(&dec("100")).unwrap(), dec("212"));
        assert_eq!(f.from_base(&dec("-40")).unwrap(), dec("-40"));
        assert_eq!(f.to_base(&dec("32")).unwrap(), dec("0"));
        assert_eq!(f.to_base(&dec("212")).unwrap(), dec("100"));
    }

    #[test]
    fn test_fahrenheit_rounds_half_even() {
        let f = ConversionRule::fahrenheit();
        // 1 * 9 / 5 = 1.8 -> 2 at scale 0
        assert_eq!(f.from_base(&dec("1")).unwrap(), dec("34"));
        assert_eq!(f.apply(&dec("1"), Direction::FromBase, 1).unwrap(), dec("33.8"));
        // (33 - 32) * 5 / 9 = 0.5555... -> 0.56 at scale 2
        assert_eq!(f.apply(&dec("33"), Direction::ToBase, 2).unwrap().to_string(), "0.56");
    }

    #[test]
    fn test_identity() {
        let rule = ConversionRule::identity(Measure::Metre);
        assert!(rule.is_identity());
        let v = dec("12.345");
        assert_eq!(rule.to_base(&v).unwrap().to_string(), "12.345");
        assert_eq!(rule.from_base(&v).unwrap().to_string(), "12.345");
    }

    #[test]
    fn test_rule_kind_serializes_tagged() {
        let rule = ConversionRule::ratio(Measure::Kilometre, dec("1000")).unwrap();
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["target"], "KILOMETRE");
        assert_eq!(json["kind"]["kind"], "linear");
        assert_eq!(json["kind"]["ratio"], "1000");
    }
}
