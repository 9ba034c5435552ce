//! # wayfinder-travel
//!
//! Clients for the external travel data providers: Geoapify (geocoding and
//! accommodation search) and OpenTripMap (points of interest).
//!
//! The finders never return `Err` to callers. Every outcome, including
//! transport failures and missing credentials, is folded into a tagged
//! result (`status: "success"` or `status: "error"`) so it can be handed
//! to a language model as-is.

pub mod activities;
pub mod config;
pub mod error;
pub mod geocode;
pub mod hotels;

pub use activities::{ActivityFinder, ActivityRecord, ActivitySearchResult};
pub use config::TravelConfig;
pub use error::SearchError;
pub use geocode::{Coordinate, Geocoder};
pub use hotels::{HotelFinder, HotelRecord, HotelSearchResult, DEFAULT_LIMIT, DEFAULT_RADIUS_M};
