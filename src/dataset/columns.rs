//! Column resolution for dataset files
//!
//! Maps each record field to a column index, either by header name
//! or by the fixed layout of the legacy steel dataset export.

use crate::config::ColumnLayout;
use std::collections::HashMap;
use tracing::{debug, warn};

/// A field of [`MaterialRecord`](crate::models::MaterialRecord) read from the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Cluster,
    Chromium,
    Nickel,
    Molybdenum,
    Manganese,
    Silicon,
    Vanadium,
    Niobium,
    Titanium,
    YieldStrength,
    TensileStrength,
    Ductility,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Name,
        Field::Cluster,
        Field::Chromium,
        Field::Nickel,
        Field::Molybdenum,
        Field::Manganese,
        Field::Silicon,
        Field::Vanadium,
        Field::Niobium,
        Field::Titanium,
        Field::YieldStrength,
        Field::TensileStrength,
        Field::Ductility,
    ];

    /// Config key used in `[dataset.columns]`
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Cluster => "cluster",
            Field::Chromium => "chromium",
            Field::Nickel => "nickel",
            Field::Molybdenum => "molybdenum",
            Field::Manganese => "manganese",
            Field::Silicon => "silicon",
            Field::Vanadium => "vanadium",
            Field::Niobium => "niobium",
            Field::Titanium => "titanium",
            Field::YieldStrength => "yield_strength",
            Field::TensileStrength => "tensile_strength",
            Field::Ductility => "ductility",
        }
    }

    /// Normalized header names recognized for this field
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Name => &["name", "material", "materialname", "alloy", "grade"],
            Field::Cluster => &["cluster", "clusterid", "clusterlabel"],
            Field::Chromium => &["cr", "chromium"],
            Field::Nickel => &["ni", "nickel"],
            Field::Molybdenum => &["mo", "molybdenum"],
            Field::Manganese => &["mn", "manganese"],
            Field::Silicon => &["si", "silicon"],
            Field::Vanadium => &["v", "vanadium"],
            Field::Niobium => &["nb", "niobium"],
            Field::Titanium => &["ti", "titanium"],
            Field::YieldStrength => &["yield", "yieldstrength", "ys"],
            Field::TensileStrength => &["tensile", "tensilestrength", "uts"],
            Field::Ductility => &["ductility", "elongation", "elong"],
        }
    }

    /// Column in the legacy steel dataset export
    fn legacy_index(self) -> usize {
        match self {
            Field::Name => 0,
            Field::Cluster => 2,
            Field::Chromium => 5,
            Field::Manganese => 7,
            Field::Nickel => 9,
            Field::Titanium => 10,
            Field::Silicon => 15,
            Field::Vanadium => 16,
            Field::Molybdenum => 17,
            Field::Niobium => 19,
            Field::YieldStrength => 21,
            Field::TensileStrength => 23,
            Field::Ductility => 25,
        }
    }

    fn position(self) -> usize {
        Field::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// Normalize a header cell for alias matching.
///
/// Drops bracketed units, then keeps lowercase alphanumerics only:
/// `"Yield Strength (MPa)"` becomes `"yieldstrength"`.
pub fn normalize_header(header: &str) -> String {
    let mut depth = 0usize;
    let mut out = String::new();
    for c in header.chars() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 && c.is_alphanumeric() => out.extend(c.to_lowercase()),
            _ => {}
        }
    }
    out
}

/// Field -> column index mapping for one dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [Option<usize>; 13],
}

impl ColumnMap {
    /// Fixed indices of the legacy export
    pub fn positional() -> Self {
        let mut indices = [None; 13];
        for field in Field::ALL {
            indices[field.position()] = Some(field.legacy_index());
        }
        Self { indices }
    }

    /// Locate each field in `headers`, honoring explicit overrides first
    pub fn from_headers(headers: &[String], overrides: &HashMap<String, String>) -> Self {
        for key in overrides.keys() {
            if Field::from_key(key).is_none() {
                warn!("Ignoring unknown column override '{}'", key);
            }
        }

        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let mut indices = [None; 13];

        for field in Field::ALL {
            let found = match overrides.get(field.key()) {
                Some(wanted) => {
                    let wanted_norm = normalize_header(wanted);
                    headers
                        .iter()
                        .position(|h| h.trim().eq_ignore_ascii_case(wanted.trim()))
                        .or_else(|| normalized.iter().position(|h| *h == wanted_norm))
                }
                None => normalized
                    .iter()
                    .position(|h| field.aliases().contains(&h.as_str())),
            };

            match found {
                Some(idx) => debug!("Column '{}' -> {}", field.key(), idx),
                None => warn!(
                    "No column found for '{}'; it will read as 0 for every row",
                    field.key()
                ),
            }
            indices[field.position()] = found;
        }

        Self { indices }
    }

    /// Build the map for the configured layout
    pub fn resolve(layout: ColumnLayout, headers: &[String], overrides: &HashMap<String, String>) -> Self {
        match layout {
            ColumnLayout::Header => Self::from_headers(headers, overrides),
            ColumnLayout::Positional => {
                if !overrides.is_empty() {
                    warn!("Column overrides are ignored with the positional layout");
                }
                Self::positional()
            }
        }
    }

    pub fn index(&self, field: Field) -> Option<usize> {
        self.indices[field.position()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Yield Strength (MPa)"), "yieldstrength");
        assert_eq!(normalize_header("  Cr [wt%] "), "cr");
        assert_eq!(normalize_header("Elongation_%"), "elongation");
        assert_eq!(normalize_header("UTS"), "uts");
    }

    #[test]
    fn test_aliases_resolve() {
        let h = headers(&[
            "Material", "Cluster", "Cr", "Ni", "Mo", "Mn", "Si", "V", "Nb", "Ti",
            "Yield Strength (MPa)", "UTS (MPa)", "Elongation (%)",
        ]);
        let map = ColumnMap::from_headers(&h, &HashMap::new());
        for (i, field) in Field::ALL.into_iter().enumerate() {
            assert_eq!(map.index(field), Some(i), "{:?}", field);
        }
    }

    #[test]
    fn test_missing_column_is_none() {
        let h = headers(&["name", "cr", "yield"]);
        let map = ColumnMap::from_headers(&h, &HashMap::new());
        assert_eq!(map.index(Field::Name), Some(0));
        assert_eq!(map.index(Field::YieldStrength), Some(2));
        assert_eq!(map.index(Field::Ductility), None);
        assert_eq!(map.index(Field::Cluster), None);
    }

    #[test]
    fn test_override_wins_over_alias() {
        let h = headers(&["name", "yield", "YS proof 0.2%"]);
        let mut overrides = HashMap::new();
        overrides.insert("yield_strength".to_string(), "ys proof 0.2%".to_string());
        overrides.insert("bogus".to_string(), "whatever".to_string());

        let map = ColumnMap::from_headers(&h, &overrides);
        assert_eq!(map.index(Field::YieldStrength), Some(2));
    }

    #[test]
    fn test_positional_layout_matches_legacy_export() {
        let map = ColumnMap::resolve(ColumnLayout::Positional, &[], &HashMap::new());
        assert_eq!(map.index(Field::Name), Some(0));
        assert_eq!(map.index(Field::Cluster), Some(2));
        assert_eq!(map.index(Field::Chromium), Some(5));
        assert_eq!(map.index(Field::Niobium), Some(19));
        assert_eq!(map.index(Field::YieldStrength), Some(21));
        assert_eq!(map.index(Field::TensileStrength), Some(23));
        assert_eq!(map.index(Field::Ductility), Some(25));
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("carbon"), None);
    }
}
