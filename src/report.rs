use std::fmt;

use serde::Serialize;

use crate::data::aggregate::{
    FilteredSummary, SeasonPassTypeAverages, averages_by_season_and_pass_type,
};
use crate::data::filter::SeasonFilter;
use crate::data::model::{PassType, SkiPassDataset};

/// Format a price for display: `$` prefix, 2 decimals, `n/a` for NaN.
pub fn format_price(price: f64) -> String {
    if price.is_nan() {
        "n/a".to_string()
    } else {
        format!("${price:.2}")
    }
}

/// Everything the dashboard shows, for headless output.
#[derive(Debug, Serialize)]
pub struct Report {
    pub source: String,
    pub total_records: usize,
    pub filtered: FilteredSummary,
    pub season_pass_type_averages: Vec<SeasonPassTypeAverages>,
}

impl Report {
    pub fn build(dataset: &SkiPassDataset, season: &SeasonFilter) -> Self {
        Report {
            source: dataset.source.clone(),
            total_records: dataset.len(),
            filtered: FilteredSummary::compute(&dataset.records, season),
            season_pass_type_averages: averages_by_season_and_pass_type(&dataset.records),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let f = &self.filtered;
        writeln!(out, "Source:         {}", self.source)?;
        writeln!(out, "Season:         {}", f.season.label())?;
        writeln!(out, "Records:        {} of {}", f.record_count, self.total_records)?;
        writeln!(out, "Average price:  {}", format_price(f.average_price))?;
        writeln!(out)?;

        writeln!(out, "Skill levels:")?;
        for (value, count) in &f.level_counts {
            writeln!(out, "  {value:<16} {count}")?;
        }
        writeln!(out)?;

        write!(out, "{:<12}", "Season")?;
        for pass_type in PassType::KNOWN {
            write!(out, "{:>12}", pass_type.label())?;
        }
        writeln!(out)?;
        for row in &self.season_pass_type_averages {
            write!(out, "{:<12}", row.season.label())?;
            for pass_type in PassType::KNOWN {
                let avg = row.average_for(&pass_type).unwrap_or(0.0);
                write!(out, "{:>12}", format_price(avg))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Season, SkiPassRecord};

    fn dataset() -> SkiPassDataset {
        let json = r#"[
            {"id": 1, "season": "winter", "price": 100, "age": 30,
             "level": "beginner", "passType": "simple"},
            {"id": 2, "season": "winter", "price": 200, "age": 30,
             "level": "expert", "passType": "simple"},
            {"id": 3, "season": "summer", "price": 50, "age": 30,
             "level": "beginner", "passType": "double"}
        ]"#;
        let records: Vec<SkiPassRecord> = serde_json::from_str(json).unwrap();
        SkiPassDataset::from_records(records, "test")
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(116.67), "$116.67");
        assert_eq!(format_price(50.0), "$50.00");
        assert_eq!(format_price(f64::NAN), "n/a");
    }

    #[test]
    fn test_text_report() {
        let report = Report::build(&dataset(), &SeasonFilter::All);
        let text = report.to_string();
        assert!(text.contains("All Seasons"));
        assert!(text.contains("$116.67"));
        assert!(text.contains("beginner"));
        assert!(text.contains("Winter"));
    }

    #[test]
    fn test_json_report_nan_is_null() {
        let report = Report::build(&dataset(), &SeasonFilter::Only(Season::Spring));
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["filtered"]["season"], "spring");
        assert_eq!(value["filtered"]["record_count"], 0);
        assert!(value["filtered"]["average_price"].is_null());
        assert_eq!(value["season_pass_type_averages"][0]["season"], "winter");
        assert_eq!(value["season_pass_type_averages"][0]["simple"], 150.0);
        assert_eq!(value["season_pass_type_averages"][1]["double"], 50.0);
    }
}
