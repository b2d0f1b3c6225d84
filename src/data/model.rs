use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// Season – closed set of tags, with a fallback for anything else
// ---------------------------------------------------------------------------

/// The season a pass was sold for.
///
/// Both the English tags and the French ones used by the bundled dataset are
/// recognised (case-insensitive). Any other tag is kept, trimmed and
/// lowercased, in [`Season::Other`] so it still groups and filters, it just
/// never matches a known season.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Season {
    Summer,
    Autumn,
    Winter,
    Spring,
    Other(String),
}

impl Season {
    /// The four recognised seasons, in selector order.
    pub const KNOWN: [Season; 4] = [Season::Summer, Season::Autumn, Season::Winter, Season::Spring];

    /// Canonical (English, lowercase) tag.
    pub fn tag(&self) -> &str {
        match self {
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Other(tag) => tag,
        }
    }

    /// Human-readable label for selectors and chart axes.
    pub fn label(&self) -> &str {
        match self {
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Other(tag) => tag,
        }
    }
}

impl From<&str> for Season {
    fn from(tag: &str) -> Self {
        let tag = tag.trim().to_lowercase();
        match tag.as_str() {
            "summer" | "été" | "ete" => Season::Summer,
            "autumn" | "fall" | "automne" => Season::Autumn,
            "winter" | "hiver" => Season::Winter,
            "spring" | "printemps" => Season::Spring,
            _ => Season::Other(tag),
        }
    }
}

impl From<String> for Season {
    fn from(tag: String) -> Self {
        Season::from(tag.as_str())
    }
}

impl From<Season> for String {
    fn from(season: Season) -> Self {
        season.tag().to_string()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

// ---------------------------------------------------------------------------
// PassType
// ---------------------------------------------------------------------------

/// Scope of a ski pass. Unknown tags land, trimmed and lowercased, in
/// [`PassType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PassType {
    Simple,
    Double,
    Unlimited,
    Other(String),
}

impl PassType {
    /// The three recognised pass types, in chart order.
    pub const KNOWN: [PassType; 3] = [PassType::Simple, PassType::Double, PassType::Unlimited];

    pub fn tag(&self) -> &str {
        match self {
            PassType::Simple => "simple",
            PassType::Double => "double",
            PassType::Unlimited => "unlimited",
            PassType::Other(tag) => tag,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PassType::Simple => "Simple",
            PassType::Double => "Double",
            PassType::Unlimited => "Unlimited",
            PassType::Other(tag) => tag,
        }
    }
}

impl From<&str> for PassType {
    fn from(tag: &str) -> Self {
        let tag = tag.trim().to_lowercase();
        match tag.as_str() {
            "simple" => PassType::Simple,
            "double" => PassType::Double,
            "unlimited" | "illimité" | "illimite" => PassType::Unlimited,
            _ => PassType::Other(tag),
        }
    }
}

impl From<String> for PassType {
    fn from(tag: String) -> Self {
        PassType::from(tag.as_str())
    }
}

impl From<PassType> for String {
    fn from(pass_type: PassType) -> Self {
        pass_type.tag().to_string()
    }
}

impl fmt::Display for PassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

// ---------------------------------------------------------------------------
// SkiPassRecord – one purchased pass
// ---------------------------------------------------------------------------

/// A single purchased pass (one row of the dataset).
///
/// Field names follow the English schema; the French column names of the
/// bundled dataset are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkiPassRecord {
    pub id: u64,
    #[serde(alias = "saison")]
    pub season: Season,
    #[serde(alias = "prix")]
    pub price: f64,
    pub age: u32,
    /// Skill level, free-form.
    #[serde(alias = "niveau", deserialize_with = "string_like")]
    pub level: String,
    /// Carried through from the source, never aggregated.
    #[serde(alias = "compte", default)]
    pub accounted: bool,
    #[serde(rename = "passType", alias = "passe", alias = "pass_type")]
    pub pass_type: PassType,
}

/// Accept any JSON scalar for a free-form label and keep its string form.
///
/// Only meant for self-describing input: the CSV loader reads labels as plain
/// strings instead.
fn string_like<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => s,
        JsonValue::Number(n) => number_label(&n),
        other => other.to_string(),
    })
}

/// Integral numbers print without a fractional part (`1e3` → `"1000"`).
fn number_label(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

// ---------------------------------------------------------------------------
// CategoryField – enumerated accessor for count-by-category
// ---------------------------------------------------------------------------

/// The categorical record fields a distribution can be computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryField {
    Level,
    PassType,
    Season,
    Accounted,
}

impl CategoryField {
    pub const ALL: [CategoryField; 4] = [
        CategoryField::Level,
        CategoryField::PassType,
        CategoryField::Season,
        CategoryField::Accounted,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CategoryField::Level => "Skill level",
            CategoryField::PassType => "Pass type",
            CategoryField::Season => "Season",
            CategoryField::Accounted => "Accounted",
        }
    }

    /// String form of this field for `record`; non-string fields are coerced.
    pub fn value_of(self, record: &SkiPassRecord) -> String {
        match self {
            CategoryField::Level => record.level.clone(),
            CategoryField::PassType => record.pass_type.tag().to_string(),
            CategoryField::Season => record.season.tag().to_string(),
            CategoryField::Accounted => record.accounted.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// SkiPassDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full loaded dataset with pre-computed category indices.
#[derive(Debug, Clone)]
pub struct SkiPassDataset {
    /// All records, in source order. Never mutated after load.
    pub records: Vec<SkiPassRecord>,
    /// Where the records came from (file path or "bundled").
    pub source: String,
    /// For each category field the sorted set of distinct values.
    pub unique_values: BTreeMap<CategoryField, BTreeSet<String>>,
}

impl SkiPassDataset {
    /// Build category indices from the loaded records.
    pub fn from_records(records: Vec<SkiPassRecord>, source: impl Into<String>) -> Self {
        let mut unique_values: BTreeMap<CategoryField, BTreeSet<String>> = BTreeMap::new();
        for record in &records {
            for field in CategoryField::ALL {
                unique_values
                    .entry(field)
                    .or_default()
                    .insert(field.value_of(record));
            }
        }
        SkiPassDataset {
            records,
            source: source.into(),
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
