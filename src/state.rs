use std::collections::BTreeMap;

use crate::color::ColorMap;
use crate::data::aggregate::{
    FilteredSummary, SeasonPassTypeAverages, averages_by_season_and_pass_type, count_by_category,
};
use crate::data::filter::{SeasonFilter, filter_by_season};
use crate::data::model::{CategoryField, SkiPassDataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a dataset is loaded).
    pub dataset: Option<SkiPassDataset>,

    /// Current season selection.
    pub season: SeasonFilter,

    /// Field the distribution chart groups by.
    pub category: CategoryField,

    /// Season-dependent views for the current selection (cached).
    pub summary: Option<FilteredSummary>,

    /// Distribution of `category` over the current selection (cached).
    pub category_counts: BTreeMap<String, usize>,

    /// Season × pass type averages over the whole dataset. Computed once per
    /// dataset, independent of the season selection.
    pub season_averages: Vec<SeasonPassTypeAverages>,

    /// Colours for the distribution chart bars.
    pub color_map: Option<ColorMap>,

    /// Whether the record table is shown.
    pub show_table: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            season: SeasonFilter::All,
            category: CategoryField::Level,
            summary: None,
            category_counts: BTreeMap::new(),
            season_averages: Vec::new(),
            color_map: None,
            show_table: false,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and recompute every view.
    pub fn set_dataset(&mut self, dataset: SkiPassDataset) {
        self.season_averages = averages_by_season_and_pass_type(&dataset.records);
        self.dataset = Some(dataset);
        self.rebuild_color_map();
        self.refresh();
        self.status_message = None;
    }

    /// Recompute everything that depends on the season or category selection.
    pub fn refresh(&mut self) {
        let Some(ds) = &self.dataset else {
            self.summary = None;
            self.category_counts.clear();
            return;
        };
        self.summary = Some(FilteredSummary::compute(&ds.records, &self.season));
        let filtered = filter_by_season(&ds.records, &self.season);
        self.category_counts = count_by_category(filtered, self.category);
    }

    /// Change the season selection.
    pub fn set_season(&mut self, season: SeasonFilter) {
        if season == self.season {
            return;
        }
        log::debug!("Season filter changed: {} -> {}", self.season, season);
        self.season = season;
        self.refresh();
    }

    /// Change the distribution field and rebuild its colours.
    pub fn set_category(&mut self, category: CategoryField) {
        if category == self.category {
            return;
        }
        self.category = category;
        self.rebuild_color_map();
        self.refresh();
    }

    fn rebuild_color_map(&mut self) {
        self.color_map = self.dataset.as_ref().and_then(|ds| {
            ds.unique_values
                .get(&self.category)
                .map(ColorMap::new)
        });
    }
}
