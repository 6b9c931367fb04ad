//! Local filtering and ordering of catalog items
//!
//! Everything here is pure: inputs are borrowed, results are new vectors,
//! and nothing suspends or touches the network.

use std::cmp::Ordering;

use super::types::Item;

/// Which items to keep
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFilter {
    /// Case-insensitive substring of the name or description; empty keeps all
    pub search: String,

    /// Inclusive lower price bound
    pub min_price: f64,

    /// Inclusive upper price bound
    pub max_price: f64,

    /// Features an item must all carry
    pub features: Vec<String>,
}

impl Default for ItemFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            min_price: f64::NEG_INFINITY,
            max_price: f64::INFINITY,
            features: Vec::new(),
        }
    }
}

/// One edit to an [`ItemFilter`], as produced by a filter control
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    Search(String),
    /// Raw text of the minimum price input
    MinPrice(String),
    /// Raw text of the maximum price input
    MaxPrice(String),
    /// Select the feature, or deselect it if already selected
    ToggleFeature(String),
    ClearFeatures,
}

/// Parse a free-text price bound.
///
/// Text that is not a number yields `unbounded`, so a half-typed input
/// never filters anything out.
pub fn parse_bound(input: &str, unbounded: f64) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => unbounded,
    }
}

impl ItemFilter {
    /// Merge a change into this filter
    pub fn apply(&mut self, change: FilterChange) {
        match change {
            FilterChange::Search(search) => self.search = search,
            FilterChange::MinPrice(text) => self.min_price = parse_bound(&text, f64::NEG_INFINITY),
            FilterChange::MaxPrice(text) => self.max_price = parse_bound(&text, f64::INFINITY),
            FilterChange::ToggleFeature(feature) => toggle_feature(&mut self.features, feature),
            FilterChange::ClearFeatures => self.features.clear(),
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.matches_search(item) && self.matches_price(item.price) && self.matches_features(item)
    }

    fn matches_search(&self, item: &Item) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        item.name.to_lowercase().contains(&needle)
            || item
                .description
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&needle)
    }

    fn matches_price(&self, price: f64) -> bool {
        let min = if self.min_price.is_nan() {
            f64::NEG_INFINITY
        } else {
            self.min_price
        };
        let max = if self.max_price.is_nan() {
            f64::INFINITY
        } else {
            self.max_price
        };
        price >= min && price <= max
    }

    fn matches_features(&self, item: &Item) -> bool {
        self.features
            .iter()
            .all(|wanted| item.features.iter().any(|have| have == wanted))
    }
}

/// Add `feature` to `selected`, or remove it if present
pub fn toggle_feature(selected: &mut Vec<String>, feature: String) {
    if let Some(pos) = selected.iter().position(|f| *f == feature) {
        selected.remove(pos);
    } else {
        selected.push(feature);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Name,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// How to order the filtered items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Clicking a sort control: the active ascending field flips to
    /// descending, anything else sorts ascending by `field`.
    pub fn toggle(self, field: SortField) -> Self {
        let direction = if self.field == field && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Self { field, direction }
    }

    fn compare(&self, a: &Item, b: &Item) -> Ordering {
        let ordering = match self.field {
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::Name => compare_names(&a.name, &b.name),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

// Case-insensitive first, so "apple" sorts next to "Apple" rather than after "Zebra".
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Keep the items matching `filter`, ordered by `sort`.
///
/// The sort is stable: items with equal keys keep their input order.
pub fn filter_and_sort(items: &[Item], filter: &ItemFilter, sort: &SortSpec) -> Vec<Item> {
    let mut visible: Vec<Item> = items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect();
    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}

/// Distinct features across `items`, in first-seen order
pub fn available_features(items: &[Item]) -> Vec<String> {
    let mut features: Vec<String> = Vec::new();
    for feature in items.iter().flat_map(|item| &item.features) {
        if !features.contains(feature) {
            features.push(feature.clone());
        }
    }
    features
}

/// Lowest and highest price in `items`, if any
pub fn price_bounds(items: &[Item]) -> Option<(f64, f64)> {
    items
        .iter()
        .map(|item| item.price)
        .filter(|price| !price.is_nan())
        .fold(None, |bounds, price| match bounds {
            None => Some((price, price)),
            Some((lo, hi)) => Some((lo.min(price), hi.max(price))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn item(
        id: &str,
        name: &str,
        description: Option<&str>,
        price: f64,
        features: &[&str],
    ) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
            price,
            features: features.iter().map(|f| f.to_string()).collect(),
            fields: BTreeMap::new(),
        }
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn sample() -> Vec<Item> {
        vec![
            item("1", "Blue Widget", Some("metal"), 10.0, &["wifi"]),
            item("2", "Red Gadget", Some("blue plastic"), 5.0, &["wifi", "parking"]),
            item("3", "green thing", None, 20.0, &[]),
            item("4", "Another", Some("plain"), 10.0, &["parking"]),
        ]
    }

    #[test]
    fn search_matches_name_or_description() {
        let filter = ItemFilter {
            search: "blue".to_string(),
            ..Default::default()
        };
        let result = filter_and_sort(&sample()[..2], &filter, &SortSpec::default());
        assert_eq!(ids(&result), vec!["1", "2"]);
    }

    #[test]
    fn search_is_case_insensitive_and_tolerates_missing_description() {
        let filter = ItemFilter {
            search: "GREEN".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&sample(), &filter, &SortSpec::default())), vec!["3"]);

        let filter = ItemFilter {
            search: "metal".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&sample(), &filter, &SortSpec::default())), vec!["1"]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let filter = ItemFilter {
            min_price: 5.0,
            max_price: 10.0,
            ..Default::default()
        };
        let result = filter_and_sort(
            &sample(),
            &filter,
            &SortSpec::new(SortField::Price, SortDirection::Asc),
        );
        assert_eq!(ids(&result), vec!["2", "1", "4"]);
    }

    #[test]
    fn features_use_and_semantics() {
        let items = vec![item("wifi-only", "A", None, 1.0, &["wifi"])];
        let filter = ItemFilter {
            features: vec!["wifi".to_string(), "parking".to_string()],
            ..Default::default()
        };
        assert!(filter_and_sort(&items, &filter, &SortSpec::default()).is_empty());

        let result = filter_and_sort(&sample(), &filter, &SortSpec::default());
        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test]
    fn sort_desc_by_price() {
        let items = vec![
            item("a", "a", None, 10.0, &[]),
            item("b", "b", None, 5.0, &[]),
            item("c", "c", None, 20.0, &[]),
        ];
        let result = filter_and_sort(
            &items,
            &ItemFilter::default(),
            &SortSpec::new(SortField::Price, SortDirection::Desc),
        );
        let prices: Vec<f64> = result.iter().map(|i| i.price).collect();
        assert_eq!(prices, vec![20.0, 10.0, 5.0]);
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let items = sample();
        let asc = filter_and_sort(
            &items,
            &ItemFilter::default(),
            &SortSpec::new(SortField::Price, SortDirection::Asc),
        );
        assert_eq!(ids(&asc), vec!["2", "1", "4", "3"]);

        let desc = filter_and_sort(
            &items,
            &ItemFilter::default(),
            &SortSpec::new(SortField::Price, SortDirection::Desc),
        );
        assert_eq!(ids(&desc), vec!["3", "1", "4", "2"]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let result = filter_and_sort(&sample(), &ItemFilter::default(), &SortSpec::default());
        assert_eq!(ids(&result), vec!["4", "1", "3", "2"]);
    }

    #[test]
    fn result_is_a_matching_subset_and_idempotent() {
        let items = sample();
        let filter = ItemFilter {
            search: "e".to_string(),
            min_price: 6.0,
            max_price: f64::INFINITY,
            features: vec!["parking".to_string()],
        };
        let sort = SortSpec::new(SortField::Name, SortDirection::Desc);

        let once = filter_and_sort(&items, &filter, &sort);
        assert!(once.iter().all(|i| filter.matches(i) && items.contains(i)));
        let mut unique = ids(&once);
        unique.dedup();
        assert_eq!(unique.len(), once.len());

        assert_eq!(filter_and_sort(&once, &filter, &sort), once);
    }

    #[test]
    fn input_is_not_mutated() {
        let items = sample();
        let before = items.clone();
        let _ = filter_and_sort(
            &items,
            &ItemFilter::default(),
            &SortSpec::new(SortField::Price, SortDirection::Desc),
        );
        assert_eq!(items, before);
    }

    #[test]
    fn unparsable_bounds_exclude_nothing() {
        let mut filter = ItemFilter::default();
        filter.apply(FilterChange::MinPrice("1e".to_string()));
        filter.apply(FilterChange::MaxPrice("".to_string()));
        assert_eq!(filter.min_price, f64::NEG_INFINITY);
        assert_eq!(filter.max_price, f64::INFINITY);
        assert_eq!(filter_and_sort(&sample(), &filter, &SortSpec::default()).len(), 4);

        filter.apply(FilterChange::MaxPrice(" 9.5 ".to_string()));
        assert_eq!(filter.max_price, 9.5);

        assert_eq!(parse_bound("NaN", 0.0), 0.0);
    }

    #[test]
    fn nan_bounds_set_directly_are_ignored() {
        let filter = ItemFilter {
            min_price: f64::NAN,
            max_price: f64::NAN,
            ..Default::default()
        };
        assert_eq!(filter_and_sort(&sample(), &filter, &SortSpec::default()).len(), 4);
    }

    #[test]
    fn toggling_a_feature_twice_clears_it() {
        let mut filter = ItemFilter::default();
        filter.apply(FilterChange::ToggleFeature("wifi".to_string()));
        filter.apply(FilterChange::ToggleFeature("parking".to_string()));
        assert_eq!(filter.features, vec!["wifi", "parking"]);
        filter.apply(FilterChange::ToggleFeature("wifi".to_string()));
        assert_eq!(filter.features, vec!["parking"]);
        filter.apply(FilterChange::ClearFeatures);
        assert!(filter.features.is_empty());
    }

    #[test]
    fn sort_toggle_flips_only_active_ascending_field() {
        let spec = SortSpec::default();
        let spec = spec.toggle(SortField::Name);
        assert_eq!(spec, SortSpec::new(SortField::Name, SortDirection::Desc));
        let spec = spec.toggle(SortField::Name);
        assert_eq!(spec, SortSpec::new(SortField::Name, SortDirection::Asc));
        let spec = spec.toggle(SortField::Price);
        assert_eq!(spec, SortSpec::new(SortField::Price, SortDirection::Asc));
    }

    #[test]
    fn features_and_bounds_of_dataset() {
        let items = sample();
        assert_eq!(available_features(&items), vec!["wifi", "parking"]);
        assert_eq!(price_bounds(&items), Some((5.0, 20.0)));
        assert_eq!(price_bounds(&[]), None);
    }
}
