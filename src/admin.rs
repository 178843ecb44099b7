//! Admin dashboard update requests.
//!
//! Dashboard edits arrive as a tagged variant per entity and are validated
//! here, at the boundary, before the record reaches the store. The store
//! itself stays a plain upsert surface.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::models::{Cafe, Property, Restaurant, Vehicle};
use crate::store::SiteStore;

/// A complete replacement record for one entity, tagged by entity type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "entity", content = "record", rename_all = "camelCase")]
pub enum UpdateRequest {
    Property(Property),
    Vehicle(Vehicle),
    Restaurant(Restaurant),
    Cafe(Cafe),
}

impl UpdateRequest {
    pub fn validate(&self) -> Result<()> {
        match self {
            UpdateRequest::Property(p) => {
                require_named("property title", &p.title)?;
                require_non_negative("property price", p.price)?;
                if let Some(rating) = p.rating {
                    require_rating(rating)?;
                }
            }
            UpdateRequest::Vehicle(v) => {
                require_named("vehicle title", &v.title)?;
                require_non_negative("vehicle price", v.price)?;
            }
            UpdateRequest::Restaurant(r) => {
                require_named("restaurant name", &r.name)?;
                require_rating(r.rating)?;
            }
            UpdateRequest::Cafe(c) => {
                require_named("cafe name", &c.name)?;
                require_rating(c.rating)?;
            }
        }
        Ok(())
    }

    /// Validates, then upserts the record. Returns the id the record landed
    /// under.
    pub fn apply(self, store: &SiteStore) -> Result<u64> {
        self.validate()?;
        match self {
            UpdateRequest::Property(p) => store.upsert(p).map(|p| p.id),
            UpdateRequest::Vehicle(v) => store.upsert(v).map(|v| v.id),
            UpdateRequest::Restaurant(r) => store.upsert(r).map(|r| r.id),
            UpdateRequest::Cafe(c) => store.upsert(c).map(|c| c.id),
        }
    }
}

fn require_named(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: f64) -> Result<()> {
    if value < 0.0 {
        return Err(StoreError::Validation(format!(
            "{field} must not be negative"
        )));
    }
    Ok(())
}

fn require_rating(rating: f32) -> Result<()> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(StoreError::Validation(
            "rating must be between 0 and 5".to_string(),
        ));
    }
    Ok(())
}
