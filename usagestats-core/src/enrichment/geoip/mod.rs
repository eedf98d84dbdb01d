use crate::conf::{ConfigError, GeoipConfig};
use crate::types::GeoLocation;
use ahash::AHashMap;
use maxminddb::PathElement;
use std::net::IpAddr;
use std::path::Path;


/// Resolves a requesting address to a coarse location.
///
/// Lookups never fail: unknown or unparsable addresses produce an empty location.
pub trait GeoLocator {
    fn locate(&self, ip: &str) -> GeoLocation;
}

pub fn build_geo_locator(cfg: &GeoipConfig) -> Result<Box<dyn GeoLocator>, ConfigError> {
    match (cfg.enable, &cfg.city_db) {
        (true, Some(path)) => Ok(Box::new(MaxMindGeoLocator::open(path)?)),
        (true, None) => Err(ConfigError::MissingGeoipDb),
        (false, _) => Ok(Box::new(NoGeoLocation)),
    }
}

/// Used when geoip is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGeoLocation;

impl GeoLocator for NoGeoLocation {
    fn locate(&self, _ip: &str) -> GeoLocation {
        GeoLocation::default()
    }
}

/// MaxMind city database lookups.
pub struct MaxMindGeoLocator {
    city_reader: maxminddb::Reader<maxminddb::Mmap>,
}

impl MaxMindGeoLocator {
    pub fn open(path: &Path) -> Result<Self, ConfigError> {
        // Safety note on the memory-mapped GeoIP file...
        // - File is opened read-only
        // - Lifetime is bound to MaxMindGeoLocator
        // - We never mutate the mmdb file
        let city_reader = unsafe { maxminddb::Reader::open_mmap(path) }.map_err(|e| {
            ConfigError::InvalidGeoipDb {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self { city_reader })
    }
}

impl GeoLocator for MaxMindGeoLocator {
    fn locate(&self, ip: &str) -> GeoLocation {
        let mut geo = GeoLocation::default();

        let Ok(ip) = ip.trim().parse::<IpAddr>() else {
            return geo;
        };

        let Some(lookup) = self.city_reader.lookup(ip).ok() else {
            return geo;
        };

        geo.country_code = lookup
            .decode_path::<String>(&[PathElement::Key("country"), PathElement::Key("iso_code")])
            .ok()
            .flatten();

        geo.region = lookup
            .decode_path::<String>(&[
                PathElement::Key("subdivisions"),
                PathElement::Index(0),
                PathElement::Key("iso_code"),
            ])
            .ok()
            .flatten();

        geo.city_name = lookup
            .decode_path::<String>(&[
                PathElement::Key("city"),
                PathElement::Key("names"),
                PathElement::Key("en"),
            ])
            .ok()
            .flatten();

        geo
    }
}

/// Fixed address → location table; handy for tests and replaying known data.
#[derive(Debug, Default, Clone)]
pub struct StaticGeoLocator {
    entries: AHashMap<String, GeoLocation>,
}

impl StaticGeoLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ip: impl Into<String>, location: GeoLocation) -> Self {
        self.entries.insert(ip.into(), location);
        self
    }
}

impl GeoLocator for StaticGeoLocator {
    fn locate(&self, ip: &str) -> GeoLocation {
        self.entries.get(ip).cloned().unwrap_or_default()
    }
}
