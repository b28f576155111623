//! Closed calendar categories and their static lookup tables.
//!
//! Every category is a tagged enum with a fixed display string, so
//! exhaustiveness is checked by the compiler and storage round-trips go
//! through `name()`/`from_name` rather than open string constants. Tables
//! are plain consts indexed by the classifier.

use serde::{Deserialize, Serialize};

/// Half of the solar year, delimited by the solstices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ayana {
    Uttarayana,
    Dakshinayana,
}

impl Ayana {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uttarayana => "Uttarayana",
            Self::Dakshinayana => "Dakshinayana",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Uttarayana" => Some(Self::Uttarayana),
            "Dakshinayana" => Some(Self::Dakshinayana),
            _ => None,
        }
    }
}

/// One of the 12 zodiacal signs, 30 degrees of ecliptic longitude each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrishchika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

impl Rashi {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrishchika => "Vrishchika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        RASHIS.iter().copied().find(|r| r.name() == name)
    }
}

/// All 12 rashis in longitude order (Mesha = [0, 30)).
pub const RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrishchika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

/// One of the 12 lunar months, indexed by solar longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Masa {
    Chaitra,
    Vaishakha,
    Jyaishtha,
    Ashadha,
    Shravana,
    Bhadrapada,
    Ashvina,
    Kartika,
    Margashirsha,
    Pausha,
    Magha,
    Phalguna,
}

impl Masa {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chaitra => "Chaitra",
            Self::Vaishakha => "Vaishakha",
            Self::Jyaishtha => "Jyaishtha",
            Self::Ashadha => "Ashadha",
            Self::Shravana => "Shravana",
            Self::Bhadrapada => "Bhadrapada",
            Self::Ashvina => "Ashvina",
            Self::Kartika => "Kartika",
            Self::Margashirsha => "Margashirsha",
            Self::Pausha => "Pausha",
            Self::Magha => "Magha",
            Self::Phalguna => "Phalguna",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        MASAS.iter().copied().find(|m| m.name() == name)
    }
}

/// All 12 masas in solar-longitude order (Chaitra = [0, 30)).
pub const MASAS: [Masa; 12] = [
    Masa::Chaitra,
    Masa::Vaishakha,
    Masa::Jyaishtha,
    Masa::Ashadha,
    Masa::Shravana,
    Masa::Bhadrapada,
    Masa::Ashvina,
    Masa::Kartika,
    Masa::Margashirsha,
    Masa::Pausha,
    Masa::Magha,
    Masa::Phalguna,
];

/// Waxing (Shukla) or waning (Krishna) half of the lunar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paksha {
    #[serde(rename = "Shukla Paksha")]
    Shukla,
    #[serde(rename = "Krishna Paksha")]
    Krishna,
}

impl Paksha {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shukla => "Shukla Paksha",
            Self::Krishna => "Krishna Paksha",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Shukla Paksha" => Some(Self::Shukla),
            "Krishna Paksha" => Some(Self::Krishna),
            _ => None,
        }
    }
}

/// Name of a lunar day. Purnima closes the waxing half, Amavasya the
/// waning half; the other fourteen names repeat in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TithiName {
    Pratipada,
    Dwitiya,
    Tritiya,
    Chaturthi,
    Panchami,
    Shashthi,
    Saptami,
    Ashtami,
    Navami,
    Dashami,
    Ekadashi,
    Dwadashi,
    Trayodashi,
    Chaturdashi,
    Purnima,
    Amavasya,
}

impl TithiName {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pratipada => "Pratipada",
            Self::Dwitiya => "Dwitiya",
            Self::Tritiya => "Tritiya",
            Self::Chaturthi => "Chaturthi",
            Self::Panchami => "Panchami",
            Self::Shashthi => "Shashthi",
            Self::Saptami => "Saptami",
            Self::Ashtami => "Ashtami",
            Self::Navami => "Navami",
            Self::Dashami => "Dashami",
            Self::Ekadashi => "Ekadashi",
            Self::Dwadashi => "Dwadashi",
            Self::Trayodashi => "Trayodashi",
            Self::Chaturdashi => "Chaturdashi",
            Self::Purnima => "Purnima",
            Self::Amavasya => "Amavasya",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        TITHIS
            .iter()
            .map(|t| t.name)
            .find(|t| t.name() == name)
    }
}

/// One of the 30 tithis: a name, its paksha, and its 1-based position
/// within that paksha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TithiInfo {
    pub name: TithiName,
    pub paksha: Paksha,
    pub index: u8,
}

const fn shukla(index: u8, name: TithiName) -> TithiInfo {
    TithiInfo { name, paksha: Paksha::Shukla, index }
}

const fn krishna(index: u8, name: TithiName) -> TithiInfo {
    TithiInfo { name, paksha: Paksha::Krishna, index }
}

/// The 30 tithis in elongation order: 12 degrees of Moon-Sun separation
/// each, Shukla Pratipada at 0, Krishna Amavasya closing at 360.
pub const TITHIS: [TithiInfo; 30] = [
    shukla(1, TithiName::Pratipada),
    shukla(2, TithiName::Dwitiya),
    shukla(3, TithiName::Tritiya),
    shukla(4, TithiName::Chaturthi),
    shukla(5, TithiName::Panchami),
    shukla(6, TithiName::Shashthi),
    shukla(7, TithiName::Saptami),
    shukla(8, TithiName::Ashtami),
    shukla(9, TithiName::Navami),
    shukla(10, TithiName::Dashami),
    shukla(11, TithiName::Ekadashi),
    shukla(12, TithiName::Dwadashi),
    shukla(13, TithiName::Trayodashi),
    shukla(14, TithiName::Chaturdashi),
    shukla(15, TithiName::Purnima),
    krishna(1, TithiName::Pratipada),
    krishna(2, TithiName::Dwitiya),
    krishna(3, TithiName::Tritiya),
    krishna(4, TithiName::Chaturthi),
    krishna(5, TithiName::Panchami),
    krishna(6, TithiName::Shashthi),
    krishna(7, TithiName::Saptami),
    krishna(8, TithiName::Ashtami),
    krishna(9, TithiName::Navami),
    krishna(10, TithiName::Dashami),
    krishna(11, TithiName::Ekadashi),
    krishna(12, TithiName::Dwadashi),
    krishna(13, TithiName::Trayodashi),
    krishna(14, TithiName::Chaturdashi),
    krishna(15, TithiName::Amavasya),
];

/// One of the 6 seasons, two rashis each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ritu {
    Vasanta,
    Grishma,
    Varsha,
    Sharad,
    Hemanta,
    Shishira,
}

impl Ritu {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vasanta => "Vasanta",
            Self::Grishma => "Grishma",
            Self::Varsha => "Varsha",
            Self::Sharad => "Sharad",
            Self::Hemanta => "Hemanta",
            Self::Shishira => "Shishira",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        RITUS.iter().copied().find(|r| r.name() == name)
    }
}

/// All 6 ritus in solar-longitude order (Vasanta = [0, 60)).
pub const RITUS: [Ritu; 6] = [
    Ritu::Vasanta,
    Ritu::Grishma,
    Ritu::Varsha,
    Ritu::Sharad,
    Ritu::Hemanta,
    Ritu::Shishira,
];

/// Lunar phase, from the Moon-Sun elongation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Waxing,
    Waning,
}

impl Phase {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Waxing => "Waxing",
            Self::Waning => "Waning",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Waxing" => Some(Self::Waxing),
            "Waning" => Some(Self::Waning),
            _ => None,
        }
    }
}

/// Eclipse indicator from the geometric proximity screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grahana {
    None,
    Surya,
    Chandra,
}

impl Grahana {
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "None" => Some(Self::None),
            "Surya" => Some(Self::Surya),
            "Chandra" => Some(Self::Chandra),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tithi_table_shape() {
        assert_eq!(TITHIS.len(), 30);
        assert!(TITHIS[..15].iter().all(|t| t.paksha == Paksha::Shukla));
        assert!(TITHIS[15..].iter().all(|t| t.paksha == Paksha::Krishna));
        assert_eq!(TITHIS[14].name, TithiName::Purnima);
        assert_eq!(TITHIS[29].name, TithiName::Amavasya);
    }

    #[test]
    fn tithi_indices_run_one_to_fifteen_per_paksha() {
        for (i, tithi) in TITHIS.iter().enumerate() {
            assert_eq!(tithi.index as usize, (i % 15) + 1);
        }
    }

    #[test]
    fn from_name_inverts_name() {
        for rashi in RASHIS {
            assert_eq!(Rashi::from_name(rashi.name()), Some(rashi));
        }
        for masa in MASAS {
            assert_eq!(Masa::from_name(masa.name()), Some(masa));
        }
        for ritu in RITUS {
            assert_eq!(Ritu::from_name(ritu.name()), Some(ritu));
        }
        for paksha in [Paksha::Shukla, Paksha::Krishna] {
            assert_eq!(Paksha::from_name(paksha.name()), Some(paksha));
        }
        for grahana in [Grahana::None, Grahana::Surya, Grahana::Chandra] {
            assert_eq!(Grahana::from_name(grahana.name()), Some(grahana));
        }
        assert_eq!(Rashi::from_name("Aries"), None);
    }

    #[test]
    fn serde_strings_match_names() {
        assert_eq!(
            serde_json::to_string(&Paksha::Shukla).unwrap(),
            "\"Shukla Paksha\""
        );
        assert_eq!(serde_json::to_string(&Masa::Chaitra).unwrap(), "\"Chaitra\"");
        assert_eq!(serde_json::to_string(&Grahana::None).unwrap(), "\"None\"");
        let paksha: Paksha = serde_json::from_str("\"Krishna Paksha\"").unwrap();
        assert_eq!(paksha, Paksha::Krishna);
    }
}
