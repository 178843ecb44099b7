//! Test suite for the Seabrook site store.
//!
//! Covers the store contract (read-after-write, persistence across reopen,
//! seed fallback, id counters under concurrency, upsert/delete semantics),
//! the listing filter, the booking-request workflow and the admin update
//! boundary. Each test opens its own on-disk database under a
//! timestamp-unique path and removes it afterwards.

#[cfg(test)]
pub mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use crate::admin::UpdateRequest;
    use crate::booking::{send_response, set_request_status, submit_booking, BookingForm};
    use crate::error::StoreError;
    use crate::filter::{ListingFilter, CATEGORY_ALL};
    use crate::models::{
        seed_properties, seed_vehicles, BookingRequest, BookingStatus, BookingType, Property,
        SiteSettings, Vehicle,
    };
    use crate::store::SiteStore;

    fn test_db_path(name: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        std::env::temp_dir().join(format!("townstay_test_{name}_{stamp}"))
    }

    fn cleanup(path: &Path) {
        let _ = std::fs::remove_dir_all(path);
    }

    fn pending_form(name: &str) -> BookingForm {
        BookingForm {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            booking_type: BookingType::Property,
            date: "2025-06-01".to_string(),
            message: None,
        }
    }

    fn seeded_requests(ids: &[u64]) -> Vec<BookingRequest> {
        ids.iter()
            .map(|&id| BookingRequest {
                id,
                name: format!("Guest {id}"),
                email: format!("guest{id}@example.com"),
                booking_type: BookingType::Property,
                date: "2025-05-01".to_string(),
                status: BookingStatus::Pending,
                message: None,
            })
            .collect()
    }

    // ----- store contract -----

    #[test]
    fn open_seeds_every_collection() {
        let path = test_db_path("open_seeds");
        let store = SiteStore::open(&path).unwrap();

        assert_eq!(store.get_all::<Property>(), seed_properties());
        assert_eq!(store.get_all::<Vehicle>(), seed_vehicles());
        assert!(store.get_all::<BookingRequest>().is_empty());
        // Singletons always exist.
        let settings: SiteSettings = store.settings();
        assert_eq!(settings, SiteSettings::default());

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn replace_all_is_read_after_write_consistent() {
        let path = test_db_path("read_after_write");
        let store = SiteStore::open(&path).unwrap();

        let mut wanted = seed_properties();
        wanted.truncate(1);
        wanted[0].title = "Renamed Cottage".to_string();
        store.replace_all(wanted.clone()).unwrap();

        assert_eq!(store.get_all::<Property>(), wanted);

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn snapshot_survives_reopen() {
        let path = test_db_path("reopen");
        {
            let store = SiteStore::open(&path).unwrap();
            let mut properties = store.get_all::<Property>();
            properties.retain(|p| p.id != 3);
            store.replace_all(properties).unwrap();
        }

        let store = SiteStore::open(&path).unwrap();
        let ids: Vec<u64> = store.get_all::<Property>().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn malformed_blob_falls_back_to_seed() {
        let path = test_db_path("malformed");
        {
            let db = sled::Config::new().path(&path).open().unwrap();
            db.insert("properties", b"{definitely not an array".to_vec())
                .unwrap();
            db.flush().unwrap();
        }

        let store = SiteStore::open(&path).unwrap();
        assert_eq!(store.get_all::<Property>(), seed_properties());

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn find_by_id_returns_record_or_none() {
        let path = test_db_path("find_by_id");
        let store = SiteStore::open(&path).unwrap();

        assert_eq!(
            store.find_by_id::<Property>(2).map(|p| p.title),
            Some("Cliff Edge Villa".to_string())
        );
        assert!(store.find_by_id::<Property>(999).is_none());

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn upsert_replaces_only_the_matching_record() {
        let path = test_db_path("upsert_replace");
        let store = SiteStore::open(&path).unwrap();

        let mut loft = store.find_by_id::<Property>(3).unwrap();
        loft.price = 200.0;
        store.upsert(loft).unwrap();

        let properties = store.get_all::<Property>();
        assert_eq!(properties.len(), 3);
        assert_eq!(properties[2].price, 200.0);
        assert_eq!(properties[0], seed_properties()[0]);
        assert_eq!(properties[1], seed_properties()[1]);

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn upsert_inserts_when_id_is_unknown() {
        let path = test_db_path("upsert_insert");
        let store = SiteStore::open(&path).unwrap();

        let mut boathouse = seed_properties()[0].clone();
        boathouse.id = 42;
        boathouse.title = "Boathouse Annex".to_string();
        store.upsert(boathouse.clone()).unwrap();

        let properties = store.get_all::<Property>();
        assert_eq!(properties.len(), 4);
        assert_eq!(store.find_by_id::<Property>(42), Some(boathouse));

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn delete_by_id_removes_exactly_one_record() {
        let path = test_db_path("delete");
        let store = SiteStore::open(&path).unwrap();

        assert!(store.delete_by_id::<Property>(2).unwrap());

        let ids: Vec<u64> = store.get_all::<Property>().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn delete_by_id_missing_is_a_noop() {
        let path = test_db_path("delete_noop");
        let store = SiteStore::open(&path).unwrap();

        let before = store.get_all::<Property>();
        assert!(!store.delete_by_id::<Property>(999).unwrap());
        assert_eq!(store.get_all::<Property>(), before);

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn featured_toggle_leaves_other_vehicles_untouched() {
        let path = test_db_path("featured_toggle");
        let store = SiteStore::open(&path).unwrap();

        let mut cruiser = store.find_by_id::<Vehicle>(1).unwrap();
        assert!(!cruiser.featured);
        cruiser.featured = true;
        store.upsert(cruiser).unwrap();

        let vehicles = store.get_all::<Vehicle>();
        let seed = seed_vehicles();
        assert!(vehicles[0].featured);
        assert_eq!(vehicles[1], seed[1]);
        assert_eq!(vehicles[2], seed[2]);

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn settings_update_persists_across_reopen() {
        let path = test_db_path("settings");
        {
            let store = SiteStore::open(&path).unwrap();
            let mut settings: SiteSettings = store.settings();
            settings.site_name = "Townstay Winter".to_string();
            settings.show_cafe_map = false;
            store.update_settings(settings).unwrap();
        }

        let store = SiteStore::open(&path).unwrap();
        let settings: SiteSettings = store.settings();
        assert_eq!(settings.site_name, "Townstay Winter");
        assert!(!settings.show_cafe_map);

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn reset_restores_seeds_and_id_counters() {
        let path = test_db_path("reset");
        let store = SiteStore::open(&path).unwrap();

        store.delete_by_id::<Property>(1).unwrap();
        submit_booking(&store, pending_form("Ada")).unwrap();
        store.reset().unwrap();

        assert_eq!(store.get_all::<Property>(), seed_properties());
        assert!(store.get_all::<BookingRequest>().is_empty());
        let first_after_reset = submit_booking(&store, pending_form("Brie")).unwrap();
        assert_eq!(first_after_reset.id, 1);

        drop(store);
        cleanup(&path);
    }

    // ----- id assignment -----

    #[test]
    fn first_append_on_empty_collection_gets_id_one() {
        let path = test_db_path("first_id");
        let store = SiteStore::open(&path).unwrap();

        let request = submit_booking(&store, pending_form("Ada")).unwrap();
        assert_eq!(request.id, 1);

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn append_id_follows_highest_existing_id() {
        let path = test_db_path("append_follows_max");
        let store = SiteStore::open(&path).unwrap();

        store.replace_all(seeded_requests(&[1, 2, 3])).unwrap();
        let request = submit_booking(&store, pending_form("Ada")).unwrap();
        assert_eq!(request.id, 4);

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn bulk_replace_raises_the_counter() {
        let path = test_db_path("counter_raise");
        let store = SiteStore::open(&path).unwrap();

        store.replace_all(seeded_requests(&[5, 9])).unwrap();
        let request = submit_booking(&store, pending_form("Ada")).unwrap();
        assert_eq!(request.id, 10);

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn concurrent_appends_never_collide() {
        let path = test_db_path("concurrent_appends");
        let store = Arc::new(SiteStore::open(&path).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..5 {
                        submit_booking(&store, pending_form(&format!("Guest{t}x{i}"))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut ids: Vec<u64> = store.get_all::<BookingRequest>().iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);
        assert_eq!(*ids.last().unwrap(), 20);

        drop(store);
        cleanup(&path);
    }

    // ----- listing filter -----

    #[test]
    fn price_range_keeps_only_records_within_bounds() {
        // Seed prices are [120, 300, 180]; [150, 250] keeps only the loft.
        let filter = ListingFilter {
            price_min: Some(150.0),
            price_max: Some(250.0),
            ..ListingFilter::default()
        };
        let hits = filter.apply(&seed_properties());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].price, 180.0);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let filter = ListingFilter {
            price_min: Some(120.0),
            price_max: Some(300.0),
            ..ListingFilter::default()
        };
        assert_eq!(filter.apply(&seed_properties()).len(), 3);

        let exact = ListingFilter {
            price_min: Some(180.0),
            price_max: Some(180.0),
            ..ListingFilter::default()
        };
        assert_eq!(exact.apply(&seed_properties()).len(), 1);
    }

    #[test]
    fn all_sentinel_bypasses_the_category_criterion() {
        let with_sentinel = ListingFilter {
            category: Some(CATEGORY_ALL.to_string()),
            ..ListingFilter::default()
        };
        let without = ListingFilter::default();
        assert_eq!(
            with_sentinel.apply(&seed_properties()),
            without.apply(&seed_properties())
        );
    }

    #[test]
    fn category_matches_exactly() {
        let filter = ListingFilter {
            category: Some("villa".to_string()),
            ..ListingFilter::default()
        };
        let hits = filter.apply(&seed_properties());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);

        let motorcycles = ListingFilter {
            category: Some("motorcycle".to_string()),
            ..ListingFilter::default()
        };
        let rides = motorcycles.apply(&seed_vehicles());
        assert_eq!(rides.len(), 1);
        assert_eq!(rides[0].id, 2);
    }

    #[test]
    fn location_match_is_case_insensitive_substring() {
        let filter = ListingFilter {
            location: Some("OLD TOWN".to_string()),
            ..ListingFilter::default()
        };
        let hits = filter.apply(&seed_properties());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3);
    }

    #[test]
    fn criteria_combine_with_and_and_preserve_order() {
        let filter = ListingFilter {
            location: Some("seabrook".to_string()),
            category: Some(CATEGORY_ALL.to_string()),
            price_min: Some(100.0),
            price_max: Some(400.0),
            ..ListingFilter::default()
        };
        let hits = filter.apply(&seed_properties());
        let ids: Vec<u64> = hits.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ListingFilter::default();
        assert_eq!(filter.apply(&seed_properties()).len(), 3);
        assert_eq!(filter.apply(&seed_vehicles()).len(), 3);
    }

    #[test]
    fn price_criterion_does_not_drop_unpriced_records() {
        // Restaurants have a bracket label, not a numeric price.
        let filter = ListingFilter {
            price_min: Some(1000.0),
            price_max: Some(2000.0),
            ..ListingFilter::default()
        };
        let hits = filter.apply(&crate::models::seed_restaurants());
        assert_eq!(hits.len(), 3);
    }

    // ----- booking workflow -----

    #[test]
    fn booking_form_requires_name_and_date() {
        let mut form = pending_form("Ada");
        form.name = "  ".to_string();
        form.date = String::new();
        let err = form.validate().unwrap_err();
        match err {
            StoreError::Validation(msg) => {
                assert!(msg.contains("name is required"));
                assert!(msg.contains("date is required"));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn booking_form_rejects_malformed_emails() {
        for bad in ["plainaddress", "missing@dot", "@no-local.com", "two words@x.com"] {
            let mut form = pending_form("Ada");
            form.email = bad.to_string();
            assert!(form.validate().is_err(), "accepted {bad}");
        }
        let mut form = pending_form("Ada");
        form.email = "ada@seabrook.example".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn invalid_submission_never_reaches_the_store() {
        let path = test_db_path("blocked_submit");
        let store = SiteStore::open(&path).unwrap();

        let mut form = pending_form("Ada");
        form.date = String::new();
        assert!(submit_booking(&store, form).is_err());
        assert!(store.get_all::<BookingRequest>().is_empty());

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn submission_starts_pending() {
        let path = test_db_path("starts_pending");
        let store = SiteStore::open(&path).unwrap();

        let request = submit_booking(&store, pending_form("Ada")).unwrap();
        assert_eq!(request.status, BookingStatus::Pending);
        assert_eq!(request.booking_type, BookingType::Property);

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn status_transitions_are_unrestricted() {
        let path = test_db_path("transitions");
        let store = SiteStore::open(&path).unwrap();
        let request = submit_booking(&store, pending_form("Ada")).unwrap();

        for status in [
            BookingStatus::Confirmed,
            BookingStatus::Pending,
            BookingStatus::Responded,
            BookingStatus::Confirmed,
        ] {
            let updated = set_request_status(&store, request.id, status).unwrap();
            assert_eq!(updated.status, status);
        }

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn send_response_marks_the_request_responded() {
        let path = test_db_path("send_response");
        let store = SiteStore::open(&path).unwrap();
        let request = submit_booking(&store, pending_form("Ada")).unwrap();

        let updated = send_response(&store, request.id).unwrap();
        assert_eq!(updated.status, BookingStatus::Responded);
        let stored = store.find_by_id::<BookingRequest>(request.id).unwrap();
        assert_eq!(stored.status, BookingStatus::Responded);

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn status_change_for_unknown_id_is_not_found() {
        let path = test_db_path("status_unknown");
        let store = SiteStore::open(&path).unwrap();

        let err = set_request_status(&store, 77, BookingStatus::Confirmed).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        drop(store);
        cleanup(&path);
    }

    // ----- admin updates -----

    #[test]
    fn admin_update_rejects_invalid_records() {
        let mut nameless = seed_properties()[0].clone();
        nameless.title = String::new();
        assert!(UpdateRequest::Property(nameless).validate().is_err());

        let mut negative = seed_vehicles()[0].clone();
        negative.price = -5.0;
        assert!(UpdateRequest::Vehicle(negative).validate().is_err());

        let mut overrated = crate::models::seed_restaurants()[0].clone();
        overrated.rating = 6.0;
        assert!(UpdateRequest::Restaurant(overrated).validate().is_err());
    }

    #[test]
    fn admin_update_applies_as_upsert() {
        let path = test_db_path("admin_apply");
        let store = SiteStore::open(&path).unwrap();

        let mut villa = store.find_by_id::<Property>(2).unwrap();
        villa.price = 320.0;
        let id = UpdateRequest::Property(villa).apply(&store).unwrap();
        assert_eq!(id, 2);
        assert_eq!(store.find_by_id::<Property>(2).unwrap().price, 320.0);

        let mut invalid = store.find_by_id::<Property>(2).unwrap();
        invalid.price = -1.0;
        assert!(UpdateRequest::Property(invalid).apply(&store).is_err());
        // The rejected edit must not have reached the store.
        assert_eq!(store.find_by_id::<Property>(2).unwrap().price, 320.0);

        drop(store);
        cleanup(&path);
    }

    // ----- change feed -----

    #[test]
    fn change_feed_names_the_mutated_collection() {
        let path = test_db_path("change_feed");
        let store = SiteStore::open(&path).unwrap();

        let mut feed = store.watch();
        store.replace_all(seed_properties()).unwrap();

        let event = feed
            .next_timeout(Duration::from_secs(2))
            .expect("no change event within timeout");
        assert_eq!(event.collection, "properties");

        drop(store);
        cleanup(&path);
    }

    #[test]
    fn stale_reader_catches_up_via_reload() {
        let path = test_db_path("reload");
        let store = SiteStore::open(&path).unwrap();

        let mut trimmed = seed_properties();
        trimmed.truncate(2);
        store.replace_all(trimmed.clone()).unwrap();

        let reloaded = store.reload::<Property>().unwrap();
        assert_eq!(reloaded, trimmed);
        assert_eq!(store.get_all::<Property>(), trimmed);

        drop(store);
        cleanup(&path);
    }
}
