//! Filtered views and facet aggregates.
//!
//! A view is the subset of the dataset passing every active predicate
//! (search term, manufacturer set, start-year range). Facets are always
//! computed over the whole dataset so the filter controls don't shrink as
//! the user narrows the view.

use std::collections::{BTreeSet, HashMap};

use marque_catalog::{VehicleRecord, collate};

/// Inclusive bounds on `Start_Year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// A range that admits every year.
    pub fn unbounded() -> Self {
        Self {
            min: i32::MIN,
            max: i32::MAX,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Active filter inputs. The default passes every record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSpec {
    pub search_term: String,
    /// Exact manufacturer names. Empty means no restriction.
    pub manufacturers: BTreeSet<String>,
    pub year_range: YearRange,
}

impl FilterSpec {
    /// Whether `record` passes all three predicates.
    pub fn matches(&self, record: &VehicleRecord) -> bool {
        self.matches_search(record)
            && (self.manufacturers.is_empty() || self.manufacturers.contains(&record.manufacturer))
            && self.year_range.contains(record.start_year)
    }

    fn matches_search(&self, record: &VehicleRecord) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let term = self.search_term.to_lowercase();
        [&record.manufacturer, &record.model, &record.model_code]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Records passing `filter`, in dataset order.
pub fn filter_view(dataset: &[VehicleRecord], filter: &FilterSpec) -> Vec<VehicleRecord> {
    dataset
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

/// Aggregates over the full dataset that drive the filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    /// Record count per distinct manufacturer, in collation order.
    pub manufacturer_counts: Vec<(String, usize)>,
    /// Smallest and largest `Start_Year`, or `None` for an empty dataset.
    pub year_bounds: Option<(i32, i32)>,
}

impl Facets {
    pub fn compute(dataset: &[VehicleRecord]) -> Self {
        Self {
            manufacturer_counts: manufacturer_counts(dataset),
            year_bounds: year_bounds(dataset),
        }
    }

    pub fn count_for(&self, manufacturer: &str) -> usize {
        self.manufacturer_counts
            .iter()
            .find(|(name, _)| name == manufacturer)
            .map_or(0, |(_, n)| *n)
    }
}

/// Count records per distinct `Manufacturer` value.
pub fn manufacturer_counts(dataset: &[VehicleRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in dataset {
        *counts.entry(r.manufacturer.as_str()).or_default() += 1;
    }
    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, n)| (name.to_string(), n))
        .collect();
    counts.sort_by(|a, b| collate(&a.0, &b.0));
    counts
}

/// Distinct models for `manufacturer` (matched case-insensitively), sorted,
/// in the dataset's own casing.
pub fn models_for(dataset: &[VehicleRecord], manufacturer: &str) -> Vec<String> {
    let wanted = manufacturer.to_lowercase();
    let distinct: BTreeSet<&str> = dataset
        .iter()
        .filter(|r| r.manufacturer.to_lowercase() == wanted)
        .map(|r| r.model.as_str())
        .collect();
    let mut models: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    models.sort_by(|a, b| collate(a, b));
    models
}

/// Minimum and maximum `Start_Year` in the dataset.
pub fn year_bounds(dataset: &[VehicleRecord]) -> Option<(i32, i32)> {
    let min = dataset.iter().map(|r| r.start_year).min()?;
    let max = dataset.iter().map(|r| r.start_year).max()?;
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use marque_catalog::seed_dataset;

    use super::*;

    fn toyota_recent() -> FilterSpec {
        FilterSpec {
            search_term: String::new(),
            manufacturers: BTreeSet::from(["Toyota".to_string()]),
            year_range: YearRange::new(2019, 2025),
        }
    }

    #[test]
    fn default_filter_passes_everything() {
        let seed = seed_dataset();
        assert_eq!(filter_view(&seed, &FilterSpec::default()), seed);
    }

    #[test]
    fn manufacturer_and_year_filter_over_seed() {
        let seed = seed_dataset();
        let view = filter_view(&seed, &toyota_recent());

        let expected: Vec<_> = seed
            .iter()
            .filter(|r| r.manufacturer == "Toyota" && (2019..=2025).contains(&r.start_year))
            .cloned()
            .collect();
        assert_eq!(view, expected);

        let models: Vec<_> = view.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(models, vec!["Corolla", "RAV4", "Supra"]);
    }

    #[test]
    fn search_matches_model_code_case_insensitively() {
        let seed = seed_dataset();
        let filter = FilterSpec {
            search_term: "g2".to_string(),
            ..Default::default()
        };
        let view = filter_view(&seed, &filter);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].model_code, "G20");
    }

    #[test]
    fn search_does_not_look_at_generation_or_years() {
        let seed = seed_dataset();
        let filter = FilterSpec {
            search_term: "2019".to_string(),
            ..Default::default()
        };
        assert!(filter_view(&seed, &filter).is_empty());
    }

    #[test]
    fn predicates_are_and_combined() {
        let seed = seed_dataset();
        let filter = FilterSpec {
            search_term: "civic".to_string(),
            manufacturers: BTreeSet::from(["Toyota".to_string()]),
            year_range: YearRange::unbounded(),
        };
        assert!(filter_view(&seed, &filter).is_empty());
    }

    #[test]
    fn manufacturer_set_is_exact_match() {
        let seed = seed_dataset();
        let filter = FilterSpec {
            manufacturers: BTreeSet::from(["toyota".to_string()]),
            ..Default::default()
        };
        assert!(filter_view(&seed, &filter).is_empty());
    }

    #[test]
    fn counts_cover_full_dataset() {
        let facets = Facets::compute(&seed_dataset());
        assert_eq!(facets.count_for("Toyota"), 6);
        assert_eq!(facets.count_for("BMW"), 4);
        assert_eq!(facets.count_for("Audi"), 0);
        let names: Vec<_> = facets.manufacturer_counts.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["BMW", "Ford", "Honda", "Toyota", "Volkswagen"]);
        assert_eq!(facets.year_bounds, Some((2012, 2024)));
    }

    #[test]
    fn models_for_matches_manufacturer_case_insensitively() {
        let models = models_for(&seed_dataset(), "toyota");
        assert_eq!(models, vec!["Camry", "Corolla", "Prius", "RAV4", "Supra"]);
    }

    #[test]
    fn models_for_unknown_manufacturer_is_empty() {
        assert!(models_for(&seed_dataset(), "Lada").is_empty());
    }

    #[test]
    fn empty_dataset_has_no_year_bounds() {
        assert_eq!(year_bounds(&[]), None);
    }
}
