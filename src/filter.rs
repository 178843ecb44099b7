//! Search filtering for the public listing pages.
//!
//! A [`ListingFilter`] is a bag of optional criteria combined with logical
//! AND; an absent criterion is always true. Filtering never reorders: the
//! result keeps the input order.

use crate::models::{Property, Restaurant, Vehicle};

/// Sentinel category value that disables the category criterion entirely.
pub const CATEGORY_ALL: &str = "all";

/// A record the listing pages can filter.
pub trait Searchable {
    /// Free-text field matched by the location criterion.
    fn search_text(&self) -> &str;

    /// Categorical field compared against the category criterion.
    fn category(&self) -> &str;

    /// Numeric price, where the record has one. `None` means the price
    /// criterion does not apply to this record type.
    fn price(&self) -> Option<f64>;
}

impl Searchable for Property {
    fn search_text(&self) -> &str {
        &self.location
    }

    fn category(&self) -> &str {
        &self.kind
    }

    fn price(&self) -> Option<f64> {
        Some(self.price)
    }
}

impl Searchable for Vehicle {
    // Vehicles carry no address; the title is the searchable text.
    fn search_text(&self) -> &str {
        &self.title
    }

    fn category(&self) -> &str {
        self.kind.as_str()
    }

    fn price(&self) -> Option<f64> {
        Some(self.price)
    }
}

impl Searchable for Restaurant {
    fn search_text(&self) -> &str {
        &self.location
    }

    fn category(&self) -> &str {
        &self.cuisine
    }

    // Restaurants only have a bracket label, no numeric nightly/daily rate.
    fn price(&self) -> Option<f64> {
        None
    }
}

/// Filter criteria as submitted by a listing page.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    /// Case-insensitive substring match against [`Searchable::search_text`].
    pub location: Option<String>,
    /// Exact match against [`Searchable::category`]; [`CATEGORY_ALL`]
    /// bypasses the criterion.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub price_min: Option<f64>,
    /// Inclusive upper price bound.
    pub price_max: Option<f64>,
}

impl ListingFilter {
    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        if let Some(location) = &self.location {
            let haystack = item.search_text().to_lowercase();
            if !haystack.contains(&location.to_lowercase()) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if category != CATEGORY_ALL && item.category() != category {
                return false;
            }
        }
        if let Some(price) = item.price() {
            if let Some(min) = self.price_min {
                if price < min {
                    return false;
                }
            }
            if let Some(max) = self.price_max {
                if price > max {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the records satisfying every supplied criterion, in input
    /// order.
    pub fn apply<T: Searchable + Clone>(&self, items: &[T]) -> Vec<T> {
        items.iter().filter(|item| self.matches(*item)).cloned().collect()
    }
}
