//! Observance (upavaas) rules and their resolver.
//!
//! The rule set is a fixed table of predicate tuples evaluated in order: a
//! rule matches when every populated constraint equals the classified value
//! and, for solar rules, the Sun's longitude falls inside the rule's
//! half-open window. Result order follows table order.

use crate::record::UpavaasInfo;

use super::types::{Masa, Paksha, TithiName};

/// How a rule is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Determined by the Moon-Sun elongation alone.
    TithiBased,
    /// Determined by the Sun's longitude (a sankranti transition).
    SolarBased,
    /// Tithi-anchored but traditionally qualified by local time of day,
    /// which this service does not model; resolved on tithi alone.
    MixedTimeRule,
}

/// A single static observance rule. Unpopulated constraints do not
/// participate in matching; a rule with no constraint at all would match
/// every day and must not appear in the table.
#[derive(Debug, Clone, Copy)]
pub struct UpavaasRule {
    pub name: &'static str,
    pub kind: RuleKind,
    pub tithi: Option<TithiName>,
    pub paksha: Option<Paksha>,
    pub masa: Option<Masa>,
    /// Half-open `[start, end)` window of solar longitude in degrees.
    pub solar_window_deg: Option<(f64, f64)>,
    pub description: &'static str,
}

impl UpavaasRule {
    fn matches(&self, tithi: TithiName, paksha: Paksha, masa: Masa, surya_lon_deg: f64) -> bool {
        if let Some(required) = self.tithi {
            if required != tithi {
                return false;
            }
        }
        if let Some(required) = self.paksha {
            if required != paksha {
                return false;
            }
        }
        if let Some(required) = self.masa {
            if required != masa {
                return false;
            }
        }
        if let Some((start, end)) = self.solar_window_deg {
            let lon = surya_lon_deg.rem_euclid(360.0);
            if lon < start || lon >= end {
                return false;
            }
        }
        true
    }
}

/// The fixed rule table, evaluated top to bottom.
pub const UPAVAAS_RULES: [UpavaasRule; 11] = [
    UpavaasRule {
        name: "Ekadashi",
        kind: RuleKind::MixedTimeRule,
        tithi: Some(TithiName::Ekadashi),
        paksha: None,
        masa: None,
        solar_window_deg: None,
        description: "Observed on the 11th lunar tithi when it prevails at local sunrise.",
    },
    UpavaasRule {
        name: "Pradosha",
        kind: RuleKind::MixedTimeRule,
        tithi: Some(TithiName::Trayodashi),
        paksha: None,
        masa: None,
        solar_window_deg: None,
        description: "Observed on the 13th tithi during the evening twilight period.",
    },
    UpavaasRule {
        name: "Maha Shivaratri",
        kind: RuleKind::MixedTimeRule,
        tithi: Some(TithiName::Chaturdashi),
        paksha: Some(Paksha::Krishna),
        masa: Some(Masa::Magha),
        solar_window_deg: None,
        description: "Krishna Paksha Chaturdashi of Magha, observed mainly during night.",
    },
    UpavaasRule {
        name: "Amavasya",
        kind: RuleKind::TithiBased,
        tithi: Some(TithiName::Amavasya),
        paksha: None,
        masa: None,
        solar_window_deg: None,
        description: "Observed on the new moon when Moon-Sun longitude difference reaches 360 degrees.",
    },
    UpavaasRule {
        name: "Purnima",
        kind: RuleKind::TithiBased,
        tithi: Some(TithiName::Purnima),
        paksha: None,
        masa: None,
        solar_window_deg: None,
        description: "Observed on the full moon when Moon-Sun longitude difference reaches 180 degrees.",
    },
    UpavaasRule {
        name: "Sankashti Chaturthi",
        kind: RuleKind::TithiBased,
        tithi: Some(TithiName::Chaturthi),
        paksha: Some(Paksha::Krishna),
        masa: None,
        solar_window_deg: None,
        description: "Krishna Paksha Chaturthi dedicated to Ganesha, observed till moonrise.",
    },
    UpavaasRule {
        name: "Vinayaka Chaturthi",
        kind: RuleKind::TithiBased,
        tithi: Some(TithiName::Chaturthi),
        paksha: Some(Paksha::Shukla),
        masa: None,
        solar_window_deg: None,
        description: "Shukla Paksha Chaturthi dedicated to Ganesha.",
    },
    UpavaasRule {
        name: "Ashtami",
        kind: RuleKind::TithiBased,
        tithi: Some(TithiName::Ashtami),
        paksha: None,
        masa: None,
        solar_window_deg: None,
        description: "Observed on the 8th lunar tithi, commonly associated with Devi worship.",
    },
    UpavaasRule {
        name: "Navami",
        kind: RuleKind::TithiBased,
        tithi: Some(TithiName::Navami),
        paksha: None,
        masa: None,
        solar_window_deg: None,
        description: "Observed on the 9th lunar tithi, notably during Navaratri.",
    },
    UpavaasRule {
        name: "Dwadashi",
        kind: RuleKind::TithiBased,
        tithi: Some(TithiName::Dwadashi),
        paksha: None,
        masa: None,
        solar_window_deg: None,
        description: "Observed on the 12th tithi, often marking the breaking of Ekadashi fast.",
    },
    UpavaasRule {
        name: "Makara Sankranti",
        kind: RuleKind::SolarBased,
        tithi: None,
        paksha: None,
        masa: None,
        solar_window_deg: Some((270.0, 300.0)),
        description: "Observed when the Sun enters Makara Rashi, marking Uttarayana.",
    },
];

/// Resolve the observances satisfied by a classified day. Always returns a
/// list (possibly empty), in rule-table order.
pub fn resolve(
    tithi: TithiName,
    paksha: Paksha,
    masa: Masa,
    surya_lon_deg: f64,
) -> Vec<UpavaasInfo> {
    UPAVAAS_RULES
        .iter()
        .filter(|rule| rule.matches(tithi, paksha, masa, surya_lon_deg))
        .map(|rule| UpavaasInfo {
            name: rule.name.to_string(),
            description: rule.description.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_carries_a_constraint() {
        for rule in &UPAVAAS_RULES {
            assert!(
                rule.tithi.is_some()
                    || rule.paksha.is_some()
                    || rule.masa.is_some()
                    || rule.solar_window_deg.is_some(),
                "rule {:?} would match every day",
                rule.name
            );
        }
    }

    #[test]
    fn ekadashi_matches_either_paksha() {
        for paksha in [Paksha::Shukla, Paksha::Krishna] {
            let hits = resolve(TithiName::Ekadashi, paksha, Masa::Chaitra, 45.0);
            assert!(hits.iter().any(|u| u.name == "Ekadashi"));
        }
    }

    #[test]
    fn makara_sankranti_window() {
        let hits = resolve(TithiName::Tritiya, Paksha::Shukla, Masa::Pausha, 285.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Makara Sankranti");

        let below = resolve(TithiName::Tritiya, Paksha::Shukla, Masa::Pausha, 269.9);
        assert!(below.is_empty());
        let above = resolve(TithiName::Tritiya, Paksha::Shukla, Masa::Magha, 300.0);
        assert!(above.is_empty());
    }

    #[test]
    fn shivaratri_needs_all_three_constraints() {
        let hit = resolve(TithiName::Chaturdashi, Paksha::Krishna, Masa::Magha, 310.0);
        assert!(hit.iter().any(|u| u.name == "Maha Shivaratri"));

        let wrong_masa = resolve(TithiName::Chaturdashi, Paksha::Krishna, Masa::Pausha, 280.0);
        assert!(wrong_masa.iter().all(|u| u.name != "Maha Shivaratri"));
        let wrong_paksha = resolve(TithiName::Chaturdashi, Paksha::Shukla, Masa::Magha, 310.0);
        assert!(wrong_paksha.iter().all(|u| u.name != "Maha Shivaratri"));
    }

    #[test]
    fn chaturthi_splits_by_paksha() {
        let waning = resolve(TithiName::Chaturthi, Paksha::Krishna, Masa::Shravana, 130.0);
        assert!(waning.iter().any(|u| u.name == "Sankashti Chaturthi"));
        assert!(waning.iter().all(|u| u.name != "Vinayaka Chaturthi"));

        let waxing = resolve(TithiName::Chaturthi, Paksha::Shukla, Masa::Shravana, 130.0);
        assert!(waxing.iter().any(|u| u.name == "Vinayaka Chaturthi"));
        assert!(waxing.iter().all(|u| u.name != "Sankashti Chaturthi"));
    }

    #[test]
    fn unmatched_day_yields_empty_list() {
        let hits = resolve(TithiName::Dwitiya, Paksha::Shukla, Masa::Chaitra, 15.0);
        assert!(hits.is_empty());
    }

    #[test]
    fn results_follow_table_order() {
        // A Krishna Ekadashi inside the Makara window satisfies two rules;
        // Ekadashi sits earlier in the table.
        let hits = resolve(TithiName::Ekadashi, Paksha::Krishna, Masa::Pausha, 275.0);
        let names: Vec<_> = hits.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Ekadashi", "Makara Sankranti"]);
    }
}
