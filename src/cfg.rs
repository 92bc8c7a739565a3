#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::constants::ISS_OEM_URL;

fn default_source_url() -> String {
    ISS_OEM_URL.to_string()
}

fn default_user_agent() -> String {
    "iss_tracker".to_string()
}

fn default_zoom() -> u8 {
    15
}

fn default_language() -> String {
    "en".to_string()
}

fn default_limit() -> Option<usize> {
    None
}

fn default_geocoding() -> GeocodingOpts {
    GeocodingOpts::default()
}

/// Options forwarded to the [ReverseGeocoder](crate::prelude::ReverseGeocoder)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct GeocodingOpts {
    /// User agent to identify ourselves with
    #[cfg_attr(feature = "serde", serde(default = "default_user_agent"))]
    pub user_agent: String,
    /// Level of detail of the address breakdown
    #[cfg_attr(feature = "serde", serde(default = "default_zoom"))]
    pub zoom: u8,
    /// Preferred language of the address fields
    #[cfg_attr(feature = "serde", serde(default = "default_language"))]
    pub language: String,
}

impl Default for GeocodingOpts {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            zoom: default_zoom(),
            language: default_language(),
        }
    }
}

/// [Config] of the [Tracker](crate::prelude::Tracker)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Config {
    /// Ephemeris document location, forwarded to the
    /// [EphemerisSource](crate::prelude::EphemerisSource)
    #[cfg_attr(feature = "serde", serde(default = "default_source_url"))]
    pub source_url: String,
    /// Reverse geocoding options
    #[cfg_attr(feature = "serde", serde(default = "default_geocoding"))]
    pub geocoding: GeocodingOpts,
    /// Default page size of epoch listings.
    /// When undefined, listings return all epochs past the offset.
    #[cfg_attr(feature = "serde", serde(default = "default_limit"))]
    pub default_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            geocoding: default_geocoding(),
            default_limit: default_limit(),
        }
    }
}

impl Config {
    /// Copies and returns [Config] with updated source URL
    pub fn with_source_url(&self, url: &str) -> Self {
        let mut s = self.clone();
        s.source_url = url.to_string();
        s
    }

    /// Copies and returns [Config] with updated default page size
    pub fn with_default_limit(&self, limit: Option<usize>) -> Self {
        let mut s = self.clone();
        s.default_limit = limit;
        s
    }
}
