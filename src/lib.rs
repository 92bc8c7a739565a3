#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

// private modules
mod cfg;
mod constants;
mod error;
mod query;
mod record;
mod source;
mod store;
mod tracker;
mod transform;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::cfg::{Config, GeocodingOpts};
    pub use crate::constants::MEAN_EARTH_RADIUS_KM;
    pub use crate::query::{EpochQueryEngine, NearestEpoch, Pagination};
    pub use crate::record::{EpochStamp, StateVectorRecord};
    pub use crate::source::{EphemerisSource, GeoLocation, NullGeocoder, ReverseGeocoder};
    pub use crate::store::{EphemerisStore, Snapshot, StoreState};
    pub use crate::tracker::{LocationReport, NowReport, Tracker};
    pub use crate::transform::{CoordinateTransformer, GeodeticPosition, Measurement};
    // re-export
    pub use hifitime::{Duration, Epoch, TimeScale};
    pub use nalgebra::Vector3;
}

// pub export
pub use error::Error;
