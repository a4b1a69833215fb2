//! FBR tax scenario registry.
//!
//! The Federal Board of Revenue defines a closed set of invoicing scenarios
//! (`SN001`..`SN028`). Each scenario fixes a canonical sale-type label, a
//! default sales-tax rate, and a handful of behavioral capabilities that the
//! invoice mapper branches on. All of the lookups here are pure, total
//! functions over the enum; the only lenient edge is [`ScenarioId::parse_lenient`],
//! which maps codes this table does not know yet onto the standard-rate
//! scenario instead of failing. FBR occasionally publishes new scenarios
//! ahead of this table, and a rejected invoice is worse than one filed at
//! the standard rate.

use serde::{Deserialize, Serialize};

use super::rate::RateLabel;

/// FBR invoicing scenario identifier.
///
/// Closed set mandated by the FBR Digital Invoicing API. The wire code is
/// the uppercase variant name (`"SN001"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScenarioId {
    /// Goods at standard rate to registered buyers (the default scenario).
    #[default]
    Sn001,
    Sn002,
    Sn003,
    Sn004,
    Sn005,
    Sn006,
    Sn007,
    Sn008,
    Sn009,
    Sn010,
    Sn011,
    Sn012,
    Sn013,
    Sn014,
    Sn015,
    Sn016,
    Sn017,
    Sn018,
    Sn019,
    Sn020,
    Sn021,
    Sn022,
    Sn023,
    Sn024,
    Sn025,
    Sn026,
    Sn027,
    Sn028,
}

impl ScenarioId {
    /// All scenarios in wire-code order.
    pub const ALL: [Self; 28] = [
        Self::Sn001,
        Self::Sn002,
        Self::Sn003,
        Self::Sn004,
        Self::Sn005,
        Self::Sn006,
        Self::Sn007,
        Self::Sn008,
        Self::Sn009,
        Self::Sn010,
        Self::Sn011,
        Self::Sn012,
        Self::Sn013,
        Self::Sn014,
        Self::Sn015,
        Self::Sn016,
        Self::Sn017,
        Self::Sn018,
        Self::Sn019,
        Self::Sn020,
        Self::Sn021,
        Self::Sn022,
        Self::Sn023,
        Self::Sn024,
        Self::Sn025,
        Self::Sn026,
        Self::Sn027,
        Self::Sn028,
    ];

    /// The wire code sent to FBR (e.g. `"SN008"`).
    #[must_use]
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::Sn001 => "SN001",
            Self::Sn002 => "SN002",
            Self::Sn003 => "SN003",
            Self::Sn004 => "SN004",
            Self::Sn005 => "SN005",
            Self::Sn006 => "SN006",
            Self::Sn007 => "SN007",
            Self::Sn008 => "SN008",
            Self::Sn009 => "SN009",
            Self::Sn010 => "SN010",
            Self::Sn011 => "SN011",
            Self::Sn012 => "SN012",
            Self::Sn013 => "SN013",
            Self::Sn014 => "SN014",
            Self::Sn015 => "SN015",
            Self::Sn016 => "SN016",
            Self::Sn017 => "SN017",
            Self::Sn018 => "SN018",
            Self::Sn019 => "SN019",
            Self::Sn020 => "SN020",
            Self::Sn021 => "SN021",
            Self::Sn022 => "SN022",
            Self::Sn023 => "SN023",
            Self::Sn024 => "SN024",
            Self::Sn025 => "SN025",
            Self::Sn026 => "SN026",
            Self::Sn027 => "SN027",
            Self::Sn028 => "SN028",
        }
    }

    /// Parse a wire code (trimmed, case-insensitive). `None` for unknown codes.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_uppercase();
        Self::ALL.iter().copied().find(|s| s.as_code() == code)
    }

    /// Parse a wire code, falling back to [`Self::Sn001`] for anything this
    /// registry does not recognize.
    ///
    /// FBR introduces scenarios faster than this table is updated; an
    /// unmapped code files at the standard rate instead of erroring.
    #[must_use]
    pub fn parse_lenient(code: &str) -> Self {
        Self::parse(code).unwrap_or_default()
    }

    /// Canonical sale-type label for the scenario.
    #[must_use]
    pub const fn sale_type(self) -> &'static str {
        match self {
            Self::Sn001 => "Goods at standard rate (default)",
            Self::Sn002 => "Goods at Standard Rate (with Sales Tax Withheld at Source)",
            Self::Sn003 => "Steel Melting and re-rolling",
            Self::Sn004 => "Ship breaking",
            Self::Sn005 => "Goods at Reduced Rate",
            Self::Sn006 => "Exempt Goods",
            Self::Sn007 => "Goods at zero-rate",
            Self::Sn008 => "3rd Schedule Goods",
            Self::Sn009 => "Cotton Ginners",
            Self::Sn010 => "Telecommunication services",
            Self::Sn011 => "Toll Manufacturing",
            Self::Sn012 => "Petroleum Products",
            Self::Sn013 => "Electricity Supply to Retailers",
            Self::Sn014 => "Gas to CNG stations",
            Self::Sn015 => "Mobile Phones",
            Self::Sn016 => "Processing / Conversion of Goods",
            Self::Sn017 => "Goods (FED in ST Mode)",
            Self::Sn018 => "Services (FED in ST Mode)",
            Self::Sn019 => "Services",
            Self::Sn020 => "Electric Vehicles",
            Self::Sn021 => "Cement / Concrete Block",
            Self::Sn022 => "Potassium Chlorate",
            Self::Sn023 => "CKD imports of Electric Vehicles",
            Self::Sn024 => "Goods sold in same state as imported",
            Self::Sn025 => "Drugs at fixed ST rate",
            Self::Sn026 => "Retail Supplies to end consumers",
            Self::Sn027 => "Retail Supplies of 3rd Schedule Goods",
            Self::Sn028 => "Retail Supplies at Reduced Rate",
        }
    }

    /// Default sales-tax rate label for the scenario.
    #[must_use]
    pub const fn default_rate_label(self) -> &'static str {
        match self {
            Self::Sn005 | Self::Sn020 | Self::Sn023 | Self::Sn025 | Self::Sn028 => "1%",
            Self::Sn006 => "Exempt",
            Self::Sn007 => "0%",
            Self::Sn010 => "19.5%",
            Self::Sn016 => "5%",
            Self::Sn017 | Self::Sn018 => "8%",
            Self::Sn019 => "15%",
            Self::Sn001
            | Self::Sn002
            | Self::Sn003
            | Self::Sn004
            | Self::Sn008
            | Self::Sn009
            | Self::Sn011
            | Self::Sn012
            | Self::Sn013
            | Self::Sn014
            | Self::Sn015
            | Self::Sn021
            | Self::Sn022
            | Self::Sn024
            | Self::Sn026
            | Self::Sn027 => "18%",
        }
    }

    /// Default sales-tax rate for the scenario.
    #[must_use]
    pub fn default_rate(self) -> RateLabel {
        RateLabel::parse(self.default_rate_label())
    }

    /// Whether the scenario requires sales tax withheld at source.
    #[must_use]
    pub const fn requires_withholding_tax(self) -> bool {
        matches!(self, Self::Sn002)
    }

    /// Whether the scenario is exempt or zero-rated (no sales tax applies).
    #[must_use]
    pub const fn is_exempt_or_zero_rated(self) -> bool {
        matches!(self, Self::Sn006 | Self::Sn007)
    }

    /// Whether the scenario covers 3rd Schedule goods, which carry a fixed
    /// notified value / retail price on the wire.
    #[must_use]
    pub const fn supports_third_schedule(self) -> bool {
        matches!(self, Self::Sn008 | Self::Sn027)
    }

    /// Whether the scenario requires a FED payable amount.
    #[must_use]
    pub const fn requires_fed_payable(self) -> bool {
        matches!(self, Self::Sn017 | Self::Sn018)
    }

    /// Whether the scenario is a retail supply to end consumers.
    #[must_use]
    pub const fn is_retail(self) -> bool {
        matches!(self, Self::Sn026 | Self::Sn027 | Self::Sn028)
    }

    /// Whether the scenario covers services rather than goods.
    #[must_use]
    pub const fn is_services(self) -> bool {
        matches!(self, Self::Sn010 | Self::Sn018 | Self::Sn019)
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown scenario code: {s}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_all_codes() {
        for scenario in ScenarioId::ALL {
            assert_eq!(ScenarioId::parse(scenario.as_code()), Some(scenario));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trimmed() {
        assert_eq!(ScenarioId::parse(" sn008 "), Some(ScenarioId::Sn008));
    }

    #[test]
    fn test_parse_lenient_falls_back_to_standard_rate() {
        assert_eq!(ScenarioId::parse_lenient("SN099"), ScenarioId::Sn001);
        assert_eq!(ScenarioId::parse_lenient(""), ScenarioId::Sn001);
        assert_eq!(ScenarioId::parse_lenient("SN019"), ScenarioId::Sn019);
    }

    #[test]
    fn test_only_sn002_requires_withholding() {
        let withholding: Vec<_> = ScenarioId::ALL
            .iter()
            .filter(|s| s.requires_withholding_tax())
            .collect();
        assert_eq!(withholding, vec![&ScenarioId::Sn002]);
    }

    #[test]
    fn test_exempt_and_zero_rated_scenarios() {
        assert!(ScenarioId::Sn006.is_exempt_or_zero_rated());
        assert!(ScenarioId::Sn007.is_exempt_or_zero_rated());
        assert!(!ScenarioId::Sn001.is_exempt_or_zero_rated());
    }

    #[test]
    fn test_third_schedule_scenarios() {
        assert!(ScenarioId::Sn008.supports_third_schedule());
        assert!(ScenarioId::Sn027.supports_third_schedule());
        assert!(!ScenarioId::Sn001.supports_third_schedule());
    }

    #[test]
    fn test_fed_payable_scenarios_are_fed_in_st_mode() {
        for scenario in ScenarioId::ALL {
            if scenario.requires_fed_payable() {
                assert!(scenario.sale_type().contains("FED in ST Mode"));
            }
        }
    }

    #[test]
    fn test_serde_uses_wire_codes() {
        let json = serde_json::to_string(&ScenarioId::Sn008).unwrap();
        assert_eq!(json, "\"SN008\"");
        let back: ScenarioId = serde_json::from_str("\"SN027\"").unwrap();
        assert_eq!(back, ScenarioId::Sn027);
    }

    #[test]
    fn test_every_scenario_has_a_parseable_default_rate() {
        use crate::types::rate::parse_rate;
        use rust_decimal::Decimal;

        for scenario in ScenarioId::ALL {
            let rate = parse_rate(scenario.default_rate_label());
            assert!(rate >= Decimal::ZERO && rate < Decimal::ONE, "{scenario}");
        }
    }
}
