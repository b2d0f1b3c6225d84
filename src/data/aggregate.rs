//! Pure aggregations over ski pass records.
//!
//! Every function here is a deterministic function of its input; nothing is
//! cached or mutated in place.

use std::collections::BTreeMap;

use serde::Serialize;

use super::filter::{SeasonFilter, filter_by_season};
use super::model::{CategoryField, PassType, Season, SkiPassRecord};

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean price rounded to 2 decimals.
///
/// An empty input has no mean: the result is `f64::NAN`. Callers that need a
/// displayable value must check `is_nan()`.
pub fn average_price<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a SkiPassRecord>,
{
    let (sum, count) = records
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), r| (sum + r.price, count + 1));
    if count == 0 {
        return f64::NAN;
    }
    round2(sum / count as f64)
}

/// Occurrence count per distinct value of `field`.
pub fn count_by_category<'a, I>(records: I, field: CategoryField) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a SkiPassRecord>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(field.value_of(record)).or_default() += 1;
    }
    counts
}

/// Occurrence count per skill level.
pub fn count_by_level<'a, I>(records: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a SkiPassRecord>,
{
    count_by_category(records, CategoryField::Level)
}

// ---------------------------------------------------------------------------
// Season × pass type
// ---------------------------------------------------------------------------

/// Average price per pass type within one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonPassTypeAverages {
    pub season: Season,
    pub simple: f64,
    pub double: f64,
    pub unlimited: f64,
}

impl SeasonPassTypeAverages {
    /// Average for one of the recognised pass types, `None` for `Other`.
    pub fn average_for(&self, pass_type: &PassType) -> Option<f64> {
        match pass_type {
            PassType::Simple => Some(self.simple),
            PassType::Double => Some(self.double),
            PassType::Unlimited => Some(self.unlimited),
            PassType::Other(_) => None,
        }
    }
}

#[derive(Default)]
struct PassBuckets {
    simple: Vec<f64>,
    double: Vec<f64>,
    unlimited: Vec<f64>,
}

impl PassBuckets {
    fn push(&mut self, pass_type: &PassType, price: f64) {
        match pass_type {
            PassType::Simple => self.simple.push(price),
            PassType::Double => self.double.push(price),
            PassType::Unlimited => self.unlimited.push(price),
            // Unrecognised pass types only drop out of this aggregation.
            PassType::Other(_) => {}
        }
    }
}

fn mean_or_zero(prices: &[f64]) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }
    round2(prices.iter().sum::<f64>() / prices.len() as f64)
}

/// Per season (first-seen order), the mean price of each pass type.
///
/// Empty (season, pass type) buckets are 0, unlike [`average_price`].
pub fn averages_by_season_and_pass_type(records: &[SkiPassRecord]) -> Vec<SeasonPassTypeAverages> {
    let mut groups: Vec<(Season, PassBuckets)> = Vec::new();

    for record in records {
        let idx = match groups.iter().position(|(s, _)| *s == record.season) {
            Some(idx) => idx,
            None => {
                groups.push((record.season.clone(), PassBuckets::default()));
                groups.len() - 1
            }
        };
        groups[idx].1.push(&record.pass_type, record.price);
    }

    groups
        .into_iter()
        .map(|(season, buckets)| SeasonPassTypeAverages {
            season,
            simple: mean_or_zero(&buckets.simple),
            double: mean_or_zero(&buckets.double),
            unlimited: mean_or_zero(&buckets.unlimited),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Filtered summary – everything that depends on the season selector
// ---------------------------------------------------------------------------

/// The season-dependent views, recomputed on every selector change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredSummary {
    pub season: SeasonFilter,
    pub record_count: usize,
    pub average_price: f64,
    pub level_counts: BTreeMap<String, usize>,
}

impl FilteredSummary {
    pub fn compute(records: &[SkiPassRecord], season: &SeasonFilter) -> Self {
        let filtered = filter_by_season(records, season);
        FilteredSummary {
            season: season.clone(),
            record_count: filtered.len(),
            average_price: average_price(filtered.iter().copied()),
            level_counts: count_by_level(filtered.iter().copied()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, season: &str, price: f64, level: &str, pass_type: &str) -> SkiPassRecord {
        SkiPassRecord {
            id,
            season: Season::from(season),
            price,
            age: 25,
            level: level.into(),
            accounted: id % 2 == 0,
            pass_type: PassType::from(pass_type),
        }
    }

    fn scenario() -> Vec<SkiPassRecord> {
        vec![
            record(1, "winter", 100.0, "beginner", "simple"),
            record(2, "winter", 200.0, "expert", "simple"),
            record(3, "summer", 50.0, "beginner", "double"),
        ]
    }

    #[test]
    fn test_average_price_scenario() {
        assert_eq!(average_price(&scenario()), 116.67);
    }

    #[test]
    fn test_average_price_empty_is_nan() {
        assert!(average_price(&Vec::<SkiPassRecord>::new()).is_nan());
    }

    #[test]
    fn test_average_price_of_filtered_refs() {
        let records = scenario();
        let winter = filter_by_season(&records, &SeasonFilter::Only(Season::Winter));
        assert_eq!(average_price(winter.iter().copied()), 150.0);
    }

    #[test]
    fn test_average_price_rounds_to_two_decimals() {
        let records = vec![
            record(1, "spring", 10.0, "a", "simple"),
            record(2, "spring", 10.0, "a", "simple"),
            record(3, "spring", 11.0, "a", "simple"),
        ];
        // 31 / 3 = 10.3333…
        assert_eq!(average_price(&records), 10.33);
    }

    #[test]
    fn test_count_by_level() {
        let counts = count_by_level(&scenario());
        assert_eq!(counts.get("beginner"), Some(&2));
        assert_eq!(counts.get("expert"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_count_sum_equals_record_count() {
        let records = scenario();
        for field in CategoryField::ALL {
            let counts = count_by_category(&records, field);
            assert_eq!(counts.values().sum::<usize>(), records.len());
        }
        assert!(count_by_level(&Vec::<SkiPassRecord>::new()).is_empty());
    }

    #[test]
    fn test_count_by_accounted_coerces_bool() {
        let counts = count_by_category(&scenario(), CategoryField::Accounted);
        assert_eq!(counts.get("true"), Some(&1));
        assert_eq!(counts.get("false"), Some(&2));
    }

    #[test]
    fn test_season_pass_type_scenario() {
        let averages = averages_by_season_and_pass_type(&scenario());
        assert_eq!(averages.len(), 2);

        let winter = &averages[0];
        assert_eq!(winter.season, Season::Winter);
        assert_eq!(winter.simple, 150.0);
        assert_eq!(winter.double, 0.0);
        assert_eq!(winter.unlimited, 0.0);

        let summer = &averages[1];
        assert_eq!(summer.season, Season::Summer);
        assert_eq!(summer.simple, 0.0);
        assert_eq!(summer.double, 50.0);
        assert_eq!(summer.unlimited, 0.0);
    }

    #[test]
    fn test_season_pass_type_one_entry_per_season() {
        let records = vec![
            record(1, "hiver", 90.0, "a", "illimité"),
            record(2, "été", 20.0, "a", "simple"),
            record(3, "winter", 110.0, "a", "unlimited"),
            record(4, "automne", 40.0, "a", "double"),
            record(5, "printemps", 30.0, "a", "simple"),
            record(6, "printemps", 33.0, "a", "simple"),
        ];
        let averages = averages_by_season_and_pass_type(&records);
        let seasons: Vec<&Season> = averages.iter().map(|a| &a.season).collect();
        assert_eq!(
            seasons,
            vec![&Season::Winter, &Season::Summer, &Season::Autumn, &Season::Spring]
        );
        assert_eq!(averages[0].unlimited, 100.0);
        assert_eq!(averages[3].simple, 31.5);
    }

    #[test]
    fn test_unknown_pass_type_dropped_from_grouping_only() {
        let records = vec![
            record(1, "winter", 100.0, "a", "simple"),
            record(2, "winter", 999.0, "a", "season-long"),
        ];
        let averages = averages_by_season_and_pass_type(&records);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].simple, 100.0);
        assert_eq!(averages[0].average_for(&PassType::Other("season-long".into())), None);
        // Still part of the plain average.
        assert_eq!(average_price(&records), 549.5);
    }

    #[test]
    fn test_unknown_seasons_group_case_insensitively() {
        let records = vec![
            record(1, "Monsoon", 40.0, "a", "simple"),
            record(2, "monsoon", 60.0, "a", "Simple"),
        ];
        let averages = averages_by_season_and_pass_type(&records);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].season, Season::Other("monsoon".into()));
        assert_eq!(averages[0].simple, 50.0);
    }

    #[test]
    fn test_season_with_only_unknown_pass_types_is_all_zero() {
        let records = vec![record(1, "spring", 40.0, "a", "weekly")];
        let averages = averages_by_season_and_pass_type(&records);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].simple, 0.0);
        assert_eq!(averages[0].double, 0.0);
        assert_eq!(averages[0].unlimited, 0.0);
    }

    #[test]
    fn test_aggregations_are_idempotent() {
        let records = scenario();
        assert_eq!(
            averages_by_season_and_pass_type(&records),
            averages_by_season_and_pass_type(&records)
        );
        assert_eq!(count_by_level(&records), count_by_level(&records));
        assert_eq!(average_price(&records), average_price(&records));
    }

    #[test]
    fn test_filtered_summary() {
        let records = scenario();
        let summary = FilteredSummary::compute(&records, &SeasonFilter::Only(Season::Winter));
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.average_price, 150.0);
        assert_eq!(summary.level_counts.get("beginner"), Some(&1));
        assert_eq!(summary.level_counts.get("expert"), Some(&1));

        let empty = FilteredSummary::compute(&records, &SeasonFilter::Only(Season::Spring));
        assert_eq!(empty.record_count, 0);
        assert!(empty.average_price.is_nan());
        assert!(empty.level_counts.is_empty());
    }
}
