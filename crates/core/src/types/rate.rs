//! Sales-tax rate labels and FBR decimal precision.
//!
//! FBR expresses rates as percentage strings (`"18%"`) or the literal
//! `"Exempt"`, and mandates half-up rounding to two decimal places on
//! monetary wire fields (four for quantities). All arithmetic is done in
//! [`Decimal`] so repeated rounding of the same item cannot accumulate
//! floating-point error.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A sales-tax rate as labelled by FBR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateLabel {
    /// A percentage rate, e.g. `Percent(18)` for `"18%"`.
    Percent(Decimal),
    /// Exempt supplies carry no rate.
    Exempt,
}

impl RateLabel {
    /// Parse a rate label.
    ///
    /// Accepts `"18%"`, `"0%"`, any `"<number>%"` (the percent sign is
    /// optional), and `"Exempt"` case-insensitively with surrounding
    /// whitespace. Unparseable input yields `Percent(0)`, never an error:
    /// upstream rate labels are operator-entered and a zero rate is the
    /// recoverable default.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("exempt") {
            return Self::Exempt;
        }
        let number = label.strip_suffix('%').unwrap_or(label).trim();
        number
            .parse::<Decimal>()
            .map_or(Self::Percent(Decimal::ZERO), Self::Percent)
    }

    /// The rate as a fraction (`"18%"` -> `0.18`). Exempt is zero.
    #[must_use]
    pub fn as_fraction(self) -> Decimal {
        match self {
            Self::Percent(percent) => percent / Decimal::ONE_HUNDRED,
            Self::Exempt => Decimal::ZERO,
        }
    }
}

impl std::fmt::Display for RateLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Percent(percent) => write!(f, "{}%", percent.normalize()),
            Self::Exempt => f.write_str("Exempt"),
        }
    }
}

/// Parse a rate label into a fractional rate (`"18%"` -> `0.18`).
#[must_use]
pub fn parse_rate(label: &str) -> Decimal {
    RateLabel::parse(label).as_fraction()
}

/// Format a fractional rate as a whole-percent label (`0.18` -> `"18%"`).
///
/// Zero formats as `"0%"`; everything else rounds to the nearest whole
/// percent, which is what the FBR rate tables carry.
#[must_use]
pub fn format_rate(rate: Decimal) -> String {
    if rate.is_zero() {
        return "0%".to_string();
    }
    let percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{}%", percent.normalize())
}

/// Decimal precision class for an FBR wire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FbrPrecision {
    /// Monetary amounts: two decimal places.
    Amount,
    /// Quantities: four decimal places.
    Quantity,
}

/// Round a value to FBR-mandated precision, half-up.
#[must_use]
pub fn round_fbr(value: Decimal, precision: FbrPrecision) -> Decimal {
    let dp = match precision {
        FbrPrecision::Amount => 2,
        FbrPrecision::Quantity => 4,
    };
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_rate_percentages() {
        assert_eq!(parse_rate("18%"), dec("0.18"));
        assert_eq!(parse_rate("0%"), Decimal::ZERO);
        assert_eq!(parse_rate("19.5%"), dec("0.195"));
        assert_eq!(parse_rate(" 1% "), dec("0.01"));
    }

    #[test]
    fn test_parse_rate_exempt_is_zero() {
        assert_eq!(parse_rate("Exempt"), Decimal::ZERO);
        assert_eq!(parse_rate("EXEMPT"), Decimal::ZERO);
        assert_eq!(parse_rate("  exempt  "), Decimal::ZERO);
    }

    #[test]
    fn test_parse_rate_garbage_is_zero_not_error() {
        assert_eq!(parse_rate("standard"), Decimal::ZERO);
        assert_eq!(parse_rate(""), Decimal::ZERO);
        assert_eq!(parse_rate("%"), Decimal::ZERO);
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(Decimal::ZERO), "0%");
        assert_eq!(format_rate(dec("0.18")), "18%");
        assert_eq!(format_rate(dec("0.195")), "20%");
        assert_eq!(format_rate(dec("0.01")), "1%");
    }

    #[test]
    fn test_parse_is_left_inverse_of_format_for_whole_percents() {
        for whole in 0..=100u32 {
            let rate = Decimal::from(whole) / Decimal::ONE_HUNDRED;
            assert_eq!(parse_rate(&format_rate(rate)), rate);
        }
    }

    #[test]
    fn test_round_fbr_amount_half_up() {
        assert_eq!(round_fbr(dec("1.005"), FbrPrecision::Amount), dec("1.01"));
        assert_eq!(round_fbr(dec("1.004"), FbrPrecision::Amount), dec("1.00"));
        assert_eq!(round_fbr(dec("2.675"), FbrPrecision::Amount), dec("2.68"));
    }

    #[test]
    fn test_round_fbr_quantity_four_places() {
        assert_eq!(
            round_fbr(dec("1.23456"), FbrPrecision::Quantity),
            dec("1.2346")
        );
        assert_eq!(
            round_fbr(dec("0.00005"), FbrPrecision::Quantity),
            dec("0.0001")
        );
    }

    #[test]
    fn test_round_fbr_is_stable_under_repetition() {
        let once = round_fbr(dec("19.994999"), FbrPrecision::Amount);
        let twice = round_fbr(once, FbrPrecision::Amount);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rate_label_display() {
        assert_eq!(RateLabel::parse("18%").to_string(), "18%");
        assert_eq!(RateLabel::Exempt.to_string(), "Exempt");
        assert_eq!(RateLabel::parse("19.5%").to_string(), "19.5%");
    }
}
