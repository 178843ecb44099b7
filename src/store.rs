//! The site store: a single owned state container over an embedded sled
//! database.
//!
//! [`SiteStore`] holds one in-memory snapshot per collection and persists
//! every mutation synchronously under a fixed key (`properties`,
//! `vehicles`, `restaurants`, `cafesList`, `mapSettings`, `siteSettings`,
//! `bookingRequests`), each value a JSON-encoded array or object. A missing
//! or malformed value falls back to the hardcoded seed snapshot.
//!
//! List collections implement [`Record`]; the two singleton settings
//! records implement [`Setting`]. New ids come from a per-collection atomic
//! counter seeded from the highest stored id, so appends stay unique even
//! with concurrent callers.
//!
//! Consumers that keep their own copies of a list can subscribe to the
//! [`ChangeFeed`] returned by [`SiteStore::watch`] and call
//! [`SiteStore::reload`] when the collection they care about changes.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::Db;

use crate::error::Result;
use crate::models::{
    self, BookingRequest, Cafe, MapSettings, Property, Restaurant, SiteSettings, Vehicle,
};

/// A list collection stored under a fixed key as a JSON array.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Fixed storage key for the whole collection.
    const KEY: &'static str;

    fn id(&self) -> u64;

    /// Hardcoded default snapshot used when nothing valid is stored.
    fn seed() -> Vec<Self>;

    fn cache(store: &SiteStore) -> &RwLock<Vec<Self>>;

    fn counter(store: &SiteStore) -> &AtomicU64;
}

/// A singleton settings record stored under a fixed key as a JSON object.
pub trait Setting: Serialize + DeserializeOwned + Clone + Default + Send + Sync + 'static {
    const KEY: &'static str;

    fn cache(store: &SiteStore) -> &RwLock<Self>;
}

macro_rules! record_impl {
    ($ty:ty, $key:expr, $cache:ident, $counter:ident, $seed:path) => {
        impl Record for $ty {
            const KEY: &'static str = $key;

            fn id(&self) -> u64 {
                self.id
            }

            fn seed() -> Vec<Self> {
                $seed()
            }

            fn cache(store: &SiteStore) -> &RwLock<Vec<Self>> {
                &store.$cache
            }

            fn counter(store: &SiteStore) -> &AtomicU64 {
                &store.$counter
            }
        }
    };
}

record_impl!(Property, "properties", properties, property_ids, models::seed_properties);
record_impl!(Vehicle, "vehicles", vehicles, vehicle_ids, models::seed_vehicles);
record_impl!(Restaurant, "restaurants", restaurants, restaurant_ids, models::seed_restaurants);
record_impl!(Cafe, "cafesList", cafes, cafe_ids, models::seed_cafes);
record_impl!(
    BookingRequest,
    "bookingRequests",
    booking_requests,
    request_ids,
    models::seed_booking_requests
);

impl Setting for MapSettings {
    const KEY: &'static str = "mapSettings";

    fn cache(store: &SiteStore) -> &RwLock<Self> {
        &store.map_settings
    }
}

impl Setting for SiteSettings {
    const KEY: &'static str = "siteSettings";

    fn cache(store: &SiteStore) -> &RwLock<Self> {
        &store.site_settings
    }
}

/// The single source of truth for all site content.
///
/// Own it once, hand out references: every consumer (admin dashboards,
/// public listings, the booking form) reads and mutates through the same
/// instance.
pub struct SiteStore {
    db: Db,
    properties: RwLock<Vec<Property>>,
    vehicles: RwLock<Vec<Vehicle>>,
    restaurants: RwLock<Vec<Restaurant>>,
    cafes: RwLock<Vec<Cafe>>,
    booking_requests: RwLock<Vec<BookingRequest>>,
    map_settings: RwLock<MapSettings>,
    site_settings: RwLock<SiteSettings>,
    property_ids: AtomicU64,
    vehicle_ids: AtomicU64,
    restaurant_ids: AtomicU64,
    cafe_ids: AtomicU64,
    request_ids: AtomicU64,
}

impl SiteStore {
    /// Opens (or creates) the store at `path` and loads every collection.
    ///
    /// Collections with no stored value, or with a value that no longer
    /// parses, are reseeded from their defaults and written back so every
    /// fixed key exists from here on.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("opening site store at {}", path.display());

        let db = sled::Config::new()
            .path(path)
            .mode(sled::Mode::HighThroughput)
            .flush_every_ms(Some(1000))
            .open()?;

        let properties = load_list::<Property>(&db)?;
        let vehicles = load_list::<Vehicle>(&db)?;
        let restaurants = load_list::<Restaurant>(&db)?;
        let cafes = load_list::<Cafe>(&db)?;
        let booking_requests = load_list::<BookingRequest>(&db)?;
        let map_settings = load_setting::<MapSettings>(&db)?;
        let site_settings = load_setting::<SiteSettings>(&db)?;
        db.flush()?;

        Ok(SiteStore {
            property_ids: AtomicU64::new(highest_id(&properties)),
            vehicle_ids: AtomicU64::new(highest_id(&vehicles)),
            restaurant_ids: AtomicU64::new(highest_id(&restaurants)),
            cafe_ids: AtomicU64::new(highest_id(&cafes)),
            request_ids: AtomicU64::new(highest_id(&booking_requests)),
            properties: RwLock::new(properties),
            vehicles: RwLock::new(vehicles),
            restaurants: RwLock::new(restaurants),
            cafes: RwLock::new(cafes),
            booking_requests: RwLock::new(booking_requests),
            map_settings: RwLock::new(map_settings),
            site_settings: RwLock::new(site_settings),
            db,
        })
    }

    /// Returns a clone of the current in-memory snapshot.
    pub fn get_all<C: Record>(&self) -> Vec<C> {
        read_lock(C::cache(self)).clone()
    }

    /// Finds a single record by id in the in-memory snapshot.
    ///
    /// `None` is the detail-page "not found" case, handled by the caller,
    /// not an error.
    pub fn find_by_id<C: Record>(&self, id: u64) -> Option<C> {
        read_lock(C::cache(self)).iter().find(|r| r.id() == id).cloned()
    }

    /// Overwrites the whole collection and persists it synchronously.
    ///
    /// The id counter is raised to the highest id in `items` so later
    /// appends never collide with ids introduced by a bulk replace.
    pub fn replace_all<C: Record>(&self, items: Vec<C>) -> Result<()> {
        let mut cache = write_lock(C::cache(self));
        self.persist(C::KEY, &items)?;
        C::counter(self).fetch_max(highest_id(&items), Ordering::SeqCst);
        *cache = items;
        Ok(())
    }

    /// Replaces the record whose id matches, or inserts the record when no
    /// id matches. The insert fallback expects a complete record, id
    /// included.
    pub fn upsert<C: Record>(&self, record: C) -> Result<C> {
        let mut cache = write_lock(C::cache(self));
        match cache.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => *slot = record.clone(),
            None => cache.push(record.clone()),
        }
        self.persist(C::KEY, &*cache)?;
        C::counter(self).fetch_max(record.id(), Ordering::SeqCst);
        Ok(record)
    }

    /// Removes the record with the given id. Returns `Ok(false)` and leaves
    /// the collection untouched when no record matches.
    pub fn delete_by_id<C: Record>(&self, id: u64) -> Result<bool> {
        let mut cache = write_lock(C::cache(self));
        let before = cache.len();
        cache.retain(|r| r.id() != id);
        if cache.len() == before {
            return Ok(false);
        }
        self.persist(C::KEY, &*cache)?;
        Ok(true)
    }

    /// Hands out the next unique id for the collection.
    pub fn next_id<C: Record>(&self) -> u64 {
        C::counter(self).fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Appends a record built from a freshly assigned id and persists the
    /// collection. The booking form is the only site surface that appends;
    /// everything else goes through [`SiteStore::upsert`].
    pub fn append<C: Record>(&self, make: impl FnOnce(u64) -> C) -> Result<C> {
        let mut cache = write_lock(C::cache(self));
        let record = make(self.next_id::<C>());
        cache.push(record.clone());
        self.persist(C::KEY, &*cache)?;
        Ok(record)
    }

    /// Returns a clone of a singleton settings record.
    pub fn settings<S: Setting>(&self) -> S {
        read_lock(S::cache(self)).clone()
    }

    /// Replaces a singleton settings record and persists it.
    pub fn update_settings<S: Setting>(&self, value: S) -> Result<()> {
        let mut cache = write_lock(S::cache(self));
        self.persist(S::KEY, &value)?;
        *cache = value;
        Ok(())
    }

    /// Re-reads a collection from the database into the cache.
    ///
    /// Pairs with [`SiteStore::watch`]: a consumer that learns a key
    /// changed reloads the collection instead of serving a stale snapshot.
    pub fn reload<C: Record>(&self) -> Result<Vec<C>> {
        let mut cache = write_lock(C::cache(self));
        let items: Vec<C> = match self.db.get(C::KEY)? {
            Some(bytes) => serde_json::from_slice(&bytes)?,
            None => C::seed(),
        };
        C::counter(self).fetch_max(highest_id(&items), Ordering::SeqCst);
        *cache = items.clone();
        Ok(items)
    }

    /// Subscribes to every write against the store.
    pub fn watch(&self) -> ChangeFeed {
        ChangeFeed {
            inner: self.db.watch_prefix(Vec::new()),
        }
    }

    /// Restores every collection and both settings records to their seed
    /// snapshots and winds the id counters back to match.
    pub fn reset(&self) -> Result<()> {
        info!("resetting site store to seed snapshots");
        self.reset_list::<Property>()?;
        self.reset_list::<Vehicle>()?;
        self.reset_list::<Restaurant>()?;
        self.reset_list::<Cafe>()?;
        self.reset_list::<BookingRequest>()?;
        self.update_settings(MapSettings::default())?;
        self.update_settings(SiteSettings::default())?;
        Ok(())
    }

    fn reset_list<C: Record>(&self) -> Result<()> {
        let mut cache = write_lock(C::cache(self));
        let seed = C::seed();
        self.persist(C::KEY, &seed)?;
        C::counter(self).store(highest_id(&seed), Ordering::SeqCst);
        *cache = seed;
        Ok(())
    }

    fn persist<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        self.db.insert(key, bytes)?;
        self.db.flush()?;
        Ok(())
    }
}

/// A notification that a collection's stored value changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    /// Storage key of the changed collection, e.g. `"properties"`.
    pub collection: String,
}

impl From<sled::Event> for StoreEvent {
    fn from(event: sled::Event) -> Self {
        let key = match &event {
            sled::Event::Insert { key, .. } => key,
            sled::Event::Remove { key } => key,
        };
        StoreEvent {
            collection: String::from_utf8_lossy(key).into_owned(),
        }
    }
}

/// Blocking iterator over store writes.
///
/// One feed serves every consumer uniformly; there is no per-view listener.
pub struct ChangeFeed {
    inner: sled::Subscriber,
}

impl ChangeFeed {
    /// Waits up to `timeout` for the next write notification.
    pub fn next_timeout(&mut self, timeout: Duration) -> Option<StoreEvent> {
        match self.inner.next_timeout(timeout) {
            Ok(event) => Some(StoreEvent::from(event)),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Iterator for ChangeFeed {
    type Item = StoreEvent;

    fn next(&mut self) -> Option<StoreEvent> {
        self.inner.next().map(StoreEvent::from)
    }
}

fn highest_id<C: Record>(items: &[C]) -> u64 {
    items.iter().map(Record::id).max().unwrap_or(0)
}

fn load_list<C: Record>(db: &Db) -> Result<Vec<C>> {
    match db.get(C::KEY)? {
        Some(bytes) => match serde_json::from_slice(&bytes) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!("stored '{}' blob no longer parses, reseeding: {e}", C::KEY);
                seed_list::<C>(db)
            }
        },
        None => {
            info!("no stored '{}' snapshot, seeding defaults", C::KEY);
            seed_list::<C>(db)
        }
    }
}

fn seed_list<C: Record>(db: &Db) -> Result<Vec<C>> {
    let seed = C::seed();
    db.insert(C::KEY, serde_json::to_vec(&seed)?)?;
    Ok(seed)
}

fn load_setting<S: Setting>(db: &Db) -> Result<S> {
    let stored = match db.get(S::KEY)? {
        Some(bytes) => serde_json::from_slice(&bytes).ok(),
        None => None,
    };
    match stored {
        Some(value) => Ok(value),
        None => {
            info!("seeding default '{}' record", S::KEY);
            let value = S::default();
            db.insert(S::KEY, serde_json::to_vec(&value)?)?;
            Ok(value)
        }
    }
}

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
