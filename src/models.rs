//! Data model definitions for the Seabrook site.
//!
//! Seven entities make up the persisted state: five list collections
//! ([`Property`], [`Vehicle`], [`Restaurant`], [`Cafe`], [`BookingRequest`])
//! and two singleton settings records ([`MapSettings`], [`SiteSettings`]).
//! Field names serialize in camelCase to match the persisted JSON blobs the
//! public site reads and writes.
//!
//! Each collection ships with a hardcoded seed snapshot (`seed_*` functions)
//! that populates the store on first open or when a stored blob is missing
//! or malformed.

use serde::{Deserialize, Serialize};

/// A rental property listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: u64,
    pub title: String,
    pub location: String,
    /// Listing category, e.g. "cottage", "villa", "apartment".
    #[serde(rename = "type")]
    pub kind: String,
    /// Nightly rate.
    pub price: f64,
    pub image: String,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub beds: Option<u32>,
    #[serde(default)]
    pub baths: Option<u32>,
    #[serde(default)]
    pub guests: Option<u32>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub panorama_images: Vec<String>,
}

/// Kind of rental vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Car,
    Motorcycle,
}

impl VehicleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleKind::Car => "car",
            VehicleKind::Motorcycle => "motorcycle",
        }
    }
}

/// A rental vehicle listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: VehicleKind,
    pub year: u16,
    /// Daily rate.
    pub price: f64,
    pub image: String,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub seats: Option<u32>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub panorama_images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// A single dish on a restaurant menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    pub price: f64,
}

/// A restaurant listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: u64,
    pub name: String,
    pub cuisine: String,
    pub location: String,
    pub rating: f32,
    pub image: String,
    /// Price bracket label, e.g. "$", "$$", "$$$".
    pub price_range: String,
    #[serde(default)]
    pub menu: Vec<MenuItem>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// A cafe marker. Only consumed by the map visualizations, so coordinates
/// are mandatory while the descriptive fields are not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cafe {
    pub id: u64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub rating: f32,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Singleton map display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSettings {
    pub map_style: String,
    pub zoom_level: u8,
    pub show_markers: bool,
    pub center_lat: f64,
    pub center_lng: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        MapSettings {
            map_style: "streets".to_string(),
            zoom_level: 13,
            show_markers: true,
            center_lat: 50.6039,
            center_lng: -2.4545,
        }
    }
}

/// Site theme colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

/// Singleton site-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub logo_url: String,
    pub colors: ThemeColors,
    pub hero_title: String,
    pub hero_description: String,
    pub show_cafe_map: bool,
}

impl Default for SiteSettings {
    fn default() -> Self {
        SiteSettings {
            site_name: "Townstay Seabrook".to_string(),
            contact_email: "hello@townstay-seabrook.example".to_string(),
            contact_phone: "+1 555 010 2030".to_string(),
            logo_url: "/images/logo.svg".to_string(),
            colors: ThemeColors {
                primary: "#1f6f8b".to_string(),
                secondary: "#f4a261".to_string(),
                accent: "#e9c46a".to_string(),
            },
            hero_title: "Your stay in Seabrook starts here".to_string(),
            hero_description: "Cottages on the quay, villas on the cliff, wheels for the coast road and a table by the water."
                .to_string(),
            show_cafe_map: true,
        }
    }
}

/// What a booking request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    Property,
    Vehicle,
    Restaurant,
}

impl BookingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::Property => "property",
            BookingType::Vehicle => "vehicle",
            BookingType::Restaurant => "restaurant",
        }
    }
}

/// Processing state of a booking request.
///
/// Transitions are not restricted; the admin UI decides which buttons it
/// shows, the store accepts any status at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Responded,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Responded => "responded",
        }
    }
}

/// A visitor booking request. Appended from the public booking form,
/// status-mutated from the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub booking_type: BookingType,
    /// Requested date, as entered ("YYYY-MM-DD").
    pub date: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub message: Option<String>,
}

pub fn seed_properties() -> Vec<Property> {
    vec![
        Property {
            id: 1,
            title: "Harborfront Cottage".to_string(),
            location: "12 Quay Lane, Seabrook Harbor".to_string(),
            kind: "cottage".to_string(),
            price: 120.0,
            image: "/images/properties/harborfront-cottage.jpg".to_string(),
            rating: Some(4.7),
            beds: Some(2),
            baths: Some(1),
            guests: Some(4),
            amenities: vec![
                "Wi-Fi".to_string(),
                "Sea view".to_string(),
                "Wood stove".to_string(),
            ],
            description: Some(
                "Stone fisherman's cottage right on the quay, two minutes from the morning fish market.".to_string(),
            ),
            featured: true,
            panorama_images: vec!["/panoramas/harborfront-living.jpg".to_string()],
        },
        Property {
            id: 2,
            title: "Cliff Edge Villa".to_string(),
            location: "3 Lighthouse Road, Seabrook Heights".to_string(),
            kind: "villa".to_string(),
            price: 300.0,
            image: "/images/properties/cliff-edge-villa.jpg".to_string(),
            rating: Some(4.9),
            beds: Some(5),
            baths: Some(3),
            guests: Some(10),
            amenities: vec![
                "Wi-Fi".to_string(),
                "Heated pool".to_string(),
                "Panoramic terrace".to_string(),
                "Parking".to_string(),
            ],
            description: Some(
                "Glass-fronted villa above the lighthouse with a terrace running the full width of the cliff.".to_string(),
            ),
            featured: true,
            panorama_images: vec![
                "/panoramas/cliff-terrace.jpg".to_string(),
                "/panoramas/cliff-lounge.jpg".to_string(),
            ],
        },
        Property {
            id: 3,
            title: "Old Town Loft".to_string(),
            location: "27 Market Square, Seabrook Old Town".to_string(),
            kind: "apartment".to_string(),
            price: 180.0,
            image: "/images/properties/old-town-loft.jpg".to_string(),
            rating: Some(4.5),
            beds: Some(3),
            baths: Some(2),
            guests: Some(6),
            amenities: vec!["Wi-Fi".to_string(), "Balcony".to_string()],
            description: Some(
                "Converted grain loft over the market square arcades, beams and all.".to_string(),
            ),
            featured: false,
            panorama_images: vec![],
        },
    ]
}

pub fn seed_vehicles() -> Vec<Vehicle> {
    vec![
        Vehicle {
            id: 1,
            title: "Coastal Cruiser Cabrio".to_string(),
            kind: VehicleKind::Car,
            year: 2022,
            price: 85.0,
            image: "/images/vehicles/coastal-cruiser.jpg".to_string(),
            transmission: Some("automatic".to_string()),
            seats: Some(4),
            features: vec![
                "Convertible top".to_string(),
                "Bluetooth".to_string(),
                "Roof rack".to_string(),
            ],
            panorama_images: vec!["/panoramas/cruiser-interior.jpg".to_string()],
            featured: false,
            lat: Some(50.6021),
            lng: Some(-2.4490),
        },
        Vehicle {
            id: 2,
            title: "Harbor Runner 500".to_string(),
            kind: VehicleKind::Motorcycle,
            year: 2021,
            price: 45.0,
            image: "/images/vehicles/harbor-runner.jpg".to_string(),
            transmission: Some("manual".to_string()),
            seats: Some(2),
            features: vec!["Panniers".to_string(), "Heated grips".to_string()],
            panorama_images: vec![],
            featured: true,
            lat: Some(50.6048),
            lng: Some(-2.4567),
        },
        Vehicle {
            id: 3,
            title: "Dune Tracker 4x4".to_string(),
            kind: VehicleKind::Car,
            year: 2020,
            price: 110.0,
            image: "/images/vehicles/dune-tracker.jpg".to_string(),
            transmission: Some("manual".to_string()),
            seats: Some(5),
            features: vec!["All-wheel drive".to_string(), "Tow bar".to_string()],
            panorama_images: vec![],
            featured: false,
            lat: None,
            lng: None,
        },
    ]
}

pub fn seed_restaurants() -> Vec<Restaurant> {
    vec![
        Restaurant {
            id: 1,
            name: "The Salted Net".to_string(),
            cuisine: "seafood".to_string(),
            location: "1 Pier Walk, Seabrook Harbor".to_string(),
            rating: 4.8,
            image: "/images/restaurants/salted-net.jpg".to_string(),
            price_range: "$$$".to_string(),
            menu: vec![
                MenuItem { name: "Day-boat catch".to_string(), price: 28.0 },
                MenuItem { name: "Crab linguine".to_string(), price: 22.0 },
            ],
            featured: true,
            lat: Some(50.6012),
            lng: Some(-2.4501),
        },
        Restaurant {
            id: 2,
            name: "Trattoria Marisa".to_string(),
            cuisine: "italian".to_string(),
            location: "14 Market Square, Seabrook Old Town".to_string(),
            rating: 4.6,
            image: "/images/restaurants/trattoria-marisa.jpg".to_string(),
            price_range: "$$".to_string(),
            menu: vec![
                MenuItem { name: "Wood-oven margherita".to_string(), price: 14.0 },
                MenuItem { name: "Seabrook vongole".to_string(), price: 19.0 },
            ],
            featured: false,
            lat: Some(50.6055),
            lng: Some(-2.4530),
        },
        Restaurant {
            id: 3,
            name: "Lighthouse Grill".to_string(),
            cuisine: "steakhouse".to_string(),
            location: "2 Lighthouse Road, Seabrook Heights".to_string(),
            rating: 4.4,
            image: "/images/restaurants/lighthouse-grill.jpg".to_string(),
            price_range: "$$$".to_string(),
            menu: vec![MenuItem { name: "Cliff-top ribeye".to_string(), price: 34.0 }],
            featured: false,
            lat: Some(50.6087),
            lng: Some(-2.4601),
        },
    ]
}

pub fn seed_cafes() -> Vec<Cafe> {
    vec![
        Cafe {
            id: 1,
            name: "Quay Beans".to_string(),
            lat: 50.6015,
            lng: -2.4498,
            rating: 4.7,
            location: Some("8 Quay Lane, Seabrook Harbor".to_string()),
            image: Some("/images/cafes/quay-beans.jpg".to_string()),
            description: Some("Espresso bar in a converted bait shed.".to_string()),
        },
        Cafe {
            id: 2,
            name: "The Reading Gull".to_string(),
            lat: 50.6059,
            lng: -2.4522,
            rating: 4.5,
            location: Some("31 Market Square, Seabrook Old Town".to_string()),
            image: None,
            description: Some("Bookshop cafe with a courtyard garden.".to_string()),
        },
        Cafe {
            id: 3,
            name: "Dune Shack Coffee".to_string(),
            lat: 50.5968,
            lng: -2.4431,
            rating: 4.3,
            location: None,
            image: None,
            description: None,
        },
    ]
}

pub fn seed_booking_requests() -> Vec<BookingRequest> {
    Vec::new()
}
