use std::fmt;

use serde::Serialize;

use super::model::{Season, SkiPassRecord};

// ---------------------------------------------------------------------------
// Season filter: "all" or a single season
// ---------------------------------------------------------------------------

/// The season selector state.
///
/// Parsing is permissive: `"all"` selects everything, any other tag becomes
/// `Only(Season::from(tag))`. An unrecognised tag therefore filters down to
/// the records carrying that exact unknown tag, which for a well-formed
/// dataset is none.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum SeasonFilter {
    #[default]
    All,
    Only(Season),
}

impl SeasonFilter {
    /// The five selector choices, in display order.
    pub fn choices() -> Vec<SeasonFilter> {
        std::iter::once(SeasonFilter::All)
            .chain(Season::KNOWN.into_iter().map(SeasonFilter::Only))
            .collect()
    }

    /// Whether `record` passes this filter.
    pub fn matches(&self, record: &SkiPassRecord) -> bool {
        match self {
            SeasonFilter::All => true,
            SeasonFilter::Only(season) => record.season == *season,
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            SeasonFilter::All => "all",
            SeasonFilter::Only(season) => season.tag(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SeasonFilter::All => "All Seasons",
            SeasonFilter::Only(season) => season.label(),
        }
    }
}

impl From<&str> for SeasonFilter {
    fn from(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case("all") {
            SeasonFilter::All
        } else {
            SeasonFilter::Only(Season::from(tag))
        }
    }
}

impl From<SeasonFilter> for String {
    fn from(filter: SeasonFilter) -> Self {
        filter.tag().to_string()
    }
}

impl fmt::Display for SeasonFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Return the records passing `filter`, in input order.
///
/// `SeasonFilter::All` yields every record, so the result is observably the
/// input list.
pub fn filter_by_season<'a>(
    records: &'a [SkiPassRecord],
    filter: &SeasonFilter,
) -> Vec<&'a SkiPassRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PassType;

    fn record(id: u64, season: &str) -> SkiPassRecord {
        SkiPassRecord {
            id,
            season: Season::from(season),
            price: 10.0 * id as f64,
            age: 30,
            level: "beginner".into(),
            accounted: false,
            pass_type: PassType::Simple,
        }
    }

    fn sample() -> Vec<SkiPassRecord> {
        vec![
            record(1, "hiver"),
            record(2, "été"),
            record(3, "winter"),
            record(4, "automne"),
            record(5, "printemps"),
        ]
    }

    #[test]
    fn test_all_returns_full_input() {
        let records = sample();
        let filtered = filter_by_season(&records, &SeasonFilter::All);
        let ids: Vec<u64> = filtered.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_each_season_returns_only_matching_records() {
        let records = sample();
        for season in Season::KNOWN {
            let filter = SeasonFilter::Only(season.clone());
            let filtered = filter_by_season(&records, &filter);
            assert!(!filtered.is_empty());
            assert!(filtered.iter().all(|r| r.season == season));
        }
        let winter = filter_by_season(&records, &SeasonFilter::Only(Season::Winter));
        assert_eq!(winter.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_unknown_tag_yields_empty() {
        let records = sample();
        let filter = SeasonFilter::from("monsoon");
        assert_eq!(filter, SeasonFilter::Only(Season::Other("monsoon".into())));
        assert!(filter_by_season(&records, &filter).is_empty());
    }

    #[test]
    fn test_unknown_tag_matches_regardless_of_case() {
        let records = vec![record(1, "Monsoon"), record(2, " monsoon"), record(3, "hiver")];
        let filtered = filter_by_season(&records, &SeasonFilter::from("MONSOON"));
        assert_eq!(filtered.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_parse_all_and_labels() {
        assert_eq!(SeasonFilter::from("all"), SeasonFilter::All);
        assert_eq!(SeasonFilter::from("ALL"), SeasonFilter::All);
        let choices = SeasonFilter::choices();
        let labels: Vec<&str> = choices.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["All Seasons", "Summer", "Autumn", "Winter", "Spring"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_by_season(&[], &SeasonFilter::All).is_empty());
    }
}
