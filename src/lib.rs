//! # Townstay Core
//!
//! Embedded, local-first data layer for the Seabrook vacation-rental site.
//! Built on sled for a stable on-disk key-value area, with one JSON
//! snapshot per collection and a uniform change feed for consumers that
//! hold their own copies.
//!
//! ## Features
//!
//! - **Single owned store**: [`SiteStore`] is constructed once and passed
//!   by reference to every consumer; no ambient singleton
//! - **Seven collections**: properties, vehicles, restaurants, cafes,
//!   booking requests, plus map and site settings singletons
//! - **Seeded startup**: missing or malformed stored values fall back to
//!   hardcoded defaults
//! - **Race-free ids**: per-collection atomic counters instead of
//!   recomputing `max(id) + 1`
//! - **Change feed**: every write is published to [`ChangeFeed`]
//!   subscribers, who reload the collection that changed
//! - **Safe error handling**: no `unwrap()` calls in production code
//!
//! ## Quick Start
//!
//! ```no_run
//! use townstay_core::models::Property;
//! use townstay_core::SiteStore;
//!
//! let store = SiteStore::open("townstay_db")?;
//!
//! // Public listing page: read and filter.
//! let mut listings: Vec<Property> = store.get_all();
//! listings.retain(|p| p.featured);
//!
//! // Admin dashboard: edit one record.
//! if let Some(mut villa) = store.find_by_id::<Property>(2) {
//!     villa.price = 320.0;
//!     store.upsert(villa)?;
//! }
//! # Ok::<(), townstay_core::StoreError>(())
//! ```
//!
//! ## Booking requests
//!
//! The public form appends through [`booking::submit_booking`], which
//! validates at the boundary and assigns the next counter id with status
//! `pending`. Admin actions transition the status via
//! [`booking::set_request_status`] and [`booking::send_response`].

pub mod admin;
pub mod booking;
pub mod error;
pub mod filter;
pub mod models;
pub mod store;
mod test;

pub use error::{Result, StoreError};
pub use store::{ChangeFeed, Record, Setting, SiteStore, StoreEvent};
