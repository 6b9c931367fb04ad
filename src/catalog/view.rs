//! Filtered and sorted projection of a section's items

use super::filter::{
    available_features, filter_and_sort, price_bounds, FilterChange, ItemFilter, SortField,
    SortSpec,
};
use super::types::Item;
use crate::controller::{ListController, View};
use crate::resource::Resource;

/// Filter and sort settings plus the items they select.
///
/// Price bounds start out spanning the loaded items and keep following the
/// dataset on every reload until the user edits either bound.
#[derive(Debug, Clone, Default)]
pub struct ItemView {
    filter: ItemFilter,
    sort: SortSpec,
    bounds_edited: bool,
    dataset_bounds: Option<(f64, f64)>,
    features: Vec<String>,
    visible: Vec<Item>,
}

impl ItemView {
    pub fn filter(&self) -> &ItemFilter {
        &self.filter
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Items passing the filter, in sort order
    pub fn visible(&self) -> &[Item] {
        &self.visible
    }

    /// Every feature present in the collection, for the feature picker
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Lowest and highest price in the collection
    pub fn dataset_bounds(&self) -> Option<(f64, f64)> {
        self.dataset_bounds
    }

    fn apply(&mut self, change: FilterChange) {
        if matches!(change, FilterChange::MinPrice(_) | FilterChange::MaxPrice(_)) {
            self.bounds_edited = true;
        }
        self.filter.apply(change);
    }

    fn reset(&mut self) {
        self.filter = ItemFilter::default();
        self.bounds_edited = false;
    }
}

impl View<Item> for ItemView {
    fn refresh(&mut self, entities: &[Item]) {
        self.dataset_bounds = price_bounds(entities);
        if !self.bounds_edited {
            let (min, max) = self
                .dataset_bounds
                .unwrap_or((f64::NEG_INFINITY, f64::INFINITY));
            self.filter.min_price = min;
            self.filter.max_price = max;
        }
        self.features = available_features(entities);
        self.visible = filter_and_sort(entities, &self.filter, &self.sort);
    }
}

/// Synchronous filter and sort controls. None of these touch the network.
impl<R> ListController<R, ItemView>
where
    R: Resource<Entity = Item>,
{
    pub fn apply_filter(&self, change: FilterChange) {
        self.update_view(|view| view.apply(change));
    }

    pub fn apply_sort(&self, sort: SortSpec) {
        self.update_view(|view| view.sort = sort);
    }

    /// Sort by `field`, flipping direction if it is already the ascending key
    pub fn toggle_sort(&self, field: SortField) {
        self.update_view(|view| view.sort = view.sort.toggle(field));
    }

    /// Drop all filters; price bounds follow the dataset again
    pub fn reset_filter(&self) {
        self.update_view(ItemView::reset);
    }

    pub fn visible_items(&self) -> Vec<Item> {
        self.with_view(|view| view.visible.clone())
    }

    pub fn item_filter(&self) -> ItemFilter {
        self.with_view(|view| view.filter.clone())
    }

    pub fn item_sort(&self) -> SortSpec {
        self.with_view(ItemView::sort)
    }

    pub fn item_features(&self) -> Vec<String> {
        self.with_view(|view| view.features.clone())
    }
}
