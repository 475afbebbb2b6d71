//! Beer catalog record and its categorical fields
//!
//! `type` and `style` are stored and serialized as integer codes. Codes
//! outside the known sets are kept as-is and resolve to "Unknown".

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display name for codes outside the known set
pub const UNKNOWN: &str = "Unknown";

const TYPE_NAMES: [&str; 4] = ["Ale", "Lager", "Malt", "Stout"];

const STYLE_NAMES: [&str; 15] = [
    "Amber", "Blonde", "Brown", "Cream", "Dark", "Pale", "Strong", "Wheat", "Red", "IPA", "Lime",
    "Pilsner", "Golden", "Fruit", "Honey",
];

/// Catalog record, persisted in the `beer` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Beer {
    /// Zero means "unassigned"; the store never holds a zero id.
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: BeerType,
    pub style: BeerStyle,
}

impl Beer {
    pub fn new(id: i64, name: impl Into<String>, kind: BeerType, style: BeerStyle) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            style,
        }
    }
}

/// Beer type code (Ale, Lager, Malt, Stout)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct BeerType(pub i64);

impl BeerType {
    pub const ALE: Self = Self(1);
    pub const LAGER: Self = Self(2);
    pub const MALT: Self = Self(3);
    pub const STOUT: Self = Self(4);

    pub fn code(self) -> i64 {
        self.0
    }

    /// Display name, or "Unknown" for any code outside 1..=4.
    pub fn name(self) -> &'static str {
        lookup(&TYPE_NAMES, self.0)
    }
}

impl From<i64> for BeerType {
    fn from(code: i64) -> Self {
        Self(code)
    }
}

impl fmt::Display for BeerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Beer style code (Amber through Honey)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct BeerStyle(pub i64);

impl BeerStyle {
    pub const AMBER: Self = Self(1);
    pub const BLONDE: Self = Self(2);
    pub const BROWN: Self = Self(3);
    pub const CREAM: Self = Self(4);
    pub const DARK: Self = Self(5);
    pub const PALE: Self = Self(6);
    pub const STRONG: Self = Self(7);
    pub const WHEAT: Self = Self(8);
    pub const RED: Self = Self(9);
    pub const IPA: Self = Self(10);
    pub const LIME: Self = Self(11);
    pub const PILSNER: Self = Self(12);
    pub const GOLDEN: Self = Self(13);
    pub const FRUIT: Self = Self(14);
    pub const HONEY: Self = Self(15);

    pub fn code(self) -> i64 {
        self.0
    }

    /// Display name, or "Unknown" for any code outside 1..=15.
    pub fn name(self) -> &'static str {
        lookup(&STYLE_NAMES, self.0)
    }
}

impl From<i64> for BeerStyle {
    fn from(code: i64) -> Self {
        Self(code)
    }
}

impl fmt::Display for BeerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Codes are 1-based.
fn lookup(names: &[&'static str], code: i64) -> &'static str {
    usize::try_from(code)
        .ok()
        .and_then(|code| code.checked_sub(1))
        .and_then(|index| names.get(index).copied())
        .unwrap_or(UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_names() {
        assert_eq!(BeerType::ALE.name(), "Ale");
        assert_eq!(BeerType::LAGER.name(), "Lager");
        assert_eq!(BeerType::MALT.name(), "Malt");
        assert_eq!(BeerType::STOUT.to_string(), "Stout");
    }

    #[test]
    fn style_names_cover_all_codes() {
        let names: Vec<&str> = (1..=15).map(|code| BeerStyle(code).name()).collect();
        assert_eq!(names, STYLE_NAMES.to_vec());
        assert_eq!(BeerStyle::IPA.to_string(), "IPA");
        assert_eq!(BeerStyle::HONEY.name(), "Honey");
    }

    #[test]
    fn unknown_codes_fall_back() {
        for code in [0, -1, 5, 99, i64::MIN, i64::MAX] {
            assert_eq!(BeerType(code).name(), UNKNOWN, "type code {code}");
        }
        for code in [0, -7, 16, 1000, i64::MIN, i64::MAX] {
            assert_eq!(BeerStyle(code).name(), UNKNOWN, "style code {code}");
        }
    }

    #[test]
    fn serializes_codes_not_names() {
        let beer = Beer::new(1, "Heineken", BeerType::LAGER, BeerStyle::PALE);
        let value = serde_json::to_value(&beer).unwrap();
        assert_eq!(
            value,
            json!({"id": 1, "name": "Heineken", "type": 2, "style": 6})
        );
    }

    #[test]
    fn missing_id_defaults_to_zero() {
        let beer: Beer = serde_json::from_str(r#"{"name":"Skol","type":1,"style":6}"#).unwrap();
        assert_eq!(beer.id, 0);
        assert_eq!(beer.kind, BeerType::ALE);
    }

    #[test]
    fn keeps_unknown_codes() {
        let beer: Beer =
            serde_json::from_str(r#"{"id":3,"name":"Mystery","type":42,"style":-3}"#).unwrap();
        assert_eq!(beer.kind.code(), 42);
        assert_eq!(beer.style.code(), -3);
        assert_eq!(beer.kind.to_string(), UNKNOWN);
    }

    #[test]
    fn rejects_missing_name() {
        assert!(serde_json::from_str::<Beer>(r#"{"id":3,"type":1,"style":1}"#).is_err());
    }
}
