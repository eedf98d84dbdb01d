pub mod geoip;

pub use geoip::{GeoLocator, NoGeoLocation, StaticGeoLocator, build_geo_locator};
