use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{cfg::GeocodingOpts, error::Error, record::StateVectorRecord};

/// [EphemerisSource] is implemented by the provider of state vectors.
/// It is expected to fetch and parse the ephemeris document, then return
/// the time ordered sequence of records it contains.
pub trait EphemerisSource {
    /// Retrieves all state vectors published at `url`.
    /// Any failure should be reported as [Error::Source].
    fn fetch(&self, url: &str) -> Result<Vec<StateVectorRecord>, Error>;
}

/// Outcome of a reverse geocoding request
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum GeoLocation {
    /// Address breakdown (country, state, city..)
    Address(BTreeMap<String, String>),
    /// Sub-satellite point is over water: no address
    OverWater,
    /// Geocoder could not be reached or did not answer properly
    Unresolved,
}

impl std::fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address(fields) => {
                let mut first = true;
                for (key, value) in fields.iter() {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                    first = false;
                }
                Ok(())
            },
            Self::OverWater => write!(f, "over water"),
            Self::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// [ReverseGeocoder] is implemented by address lookup services.
pub trait ReverseGeocoder {
    /// Resolves the address at (`latitude`, `longitude`), both in degrees.
    fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
        opts: &GeocodingOpts,
    ) -> Result<GeoLocation, Error>;
}

/// [NullGeocoder] is used by applications that do not resolve addresses.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullGeocoder {}

impl ReverseGeocoder for NullGeocoder {
    fn reverse(&self, _: f64, _: f64, _: &GeocodingOpts) -> Result<GeoLocation, Error> {
        Ok(GeoLocation::Unresolved)
    }
}
