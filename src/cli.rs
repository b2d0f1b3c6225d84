use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::data::filter::SeasonFilter;
use crate::data::loader;
use crate::data::model::SkiPassDataset;

/// Ski pass sales dashboard
#[derive(Debug, Parser)]
#[command(name = "ski-pass-dashboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Dataset to load (.json, .csv, .parquet) instead of the bundled one
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Initial season filter: all, summer, autumn, winter or spring
    #[arg(long, default_value = "all")]
    pub season: String,

    /// Print a summary to stdout instead of opening the dashboard
    #[arg(long)]
    pub summary: bool,

    /// Print the summary as JSON (implies --summary)
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn season_filter(&self) -> SeasonFilter {
        SeasonFilter::from(self.season.as_str())
    }

    pub fn headless(&self) -> bool {
        self.summary || self.json
    }

    /// Load `--data` if given, otherwise the bundled dataset.
    pub fn load_dataset(&self) -> Result<SkiPassDataset> {
        match &self.data {
            Some(path) => {
                loader::load_file(path).with_context(|| format!("loading {}", path.display()))
            }
            None => loader::load_bundled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Season;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["ski-pass-dashboard"]);
        assert!(cli.data.is_none());
        assert_eq!(cli.season_filter(), SeasonFilter::All);
        assert!(!cli.headless());
    }

    #[test]
    fn test_season_and_json_flags() {
        let cli = Cli::parse_from(["ski-pass-dashboard", "--season", "hiver", "--json"]);
        assert_eq!(cli.season_filter(), SeasonFilter::Only(Season::Winter));
        assert!(cli.headless());
    }

    #[test]
    fn test_missing_data_file_fails_with_path() {
        let cli = Cli::parse_from(["ski-pass-dashboard", "--data", "/nonexistent/passes.json"]);
        let err = cli.load_dataset().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/passes.json"));
    }
}
