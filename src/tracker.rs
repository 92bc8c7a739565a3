use std::sync::Arc;

use log::{debug, error, warn};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    cfg::Config,
    error::Error,
    prelude::Epoch,
    query::{EpochQueryEngine, NearestEpoch},
    record::StateVectorRecord,
    source::{EphemerisSource, GeoLocation, ReverseGeocoder},
    store::{EphemerisStore, StoreState},
    transform::{CoordinateTransformer, GeodeticPosition, Measurement},
};

/// Spacecraft location at a given epoch
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LocationReport {
    /// Epoch of the state vector being used
    pub epoch: String,
    /// Geodetic position
    pub location: GeodeticPosition,
    /// Address at the sub-satellite point
    pub geo: GeoLocation,
    /// Instantaneous speed
    pub speed: Measurement,
}

/// Spacecraft location, at the epoch closest to a reference time
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NowReport {
    /// Epoch of the closest state vector
    pub closest_epoch: String,
    /// Closest epoch minus reference time (s)
    pub seconds_from_now: f64,
    /// Geodetic position
    pub location: GeodeticPosition,
    /// Address at the sub-satellite point
    pub geo: GeoLocation,
    /// Instantaneous speed
    pub speed: Measurement,
}

/// [Tracker] ties the [EphemerisStore] to its collaborators:
/// the [EphemerisSource] that provides the state vectors and the
/// [ReverseGeocoder] that describes the sub-satellite point.
pub struct Tracker<S: EphemerisSource, G: ReverseGeocoder> {
    /// [Config] preset
    cfg: Config,
    /// Shared [EphemerisStore]
    store: Arc<EphemerisStore>,
    /// [EpochQueryEngine]
    engine: EpochQueryEngine,
    /// [EphemerisSource]
    source: S,
    /// [ReverseGeocoder]
    geocoder: G,
}

impl<S: EphemerisSource, G: ReverseGeocoder> Tracker<S, G> {
    /// Creates a new [Tracker], with an empty store.
    /// Use [Tracker::start] or [Tracker::reload] to load it.
    pub fn new(cfg: Config, source: S, geocoder: G) -> Self {
        let store = Arc::new(EphemerisStore::new());
        let engine = EpochQueryEngine::new(store.clone()).with_default_limit(cfg.default_limit);
        Self {
            cfg,
            store,
            engine,
            source,
            geocoder,
        }
    }

    /// Creates a new [Tracker] and performs the initial load.
    pub fn start(cfg: Config, source: S, geocoder: G) -> Result<Self, Error> {
        let tracker = Self::new(cfg, source, geocoder);
        tracker.reload()?;
        Ok(tracker)
    }

    /// [Config] in use
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// [EphemerisSource] in use
    pub fn source(&self) -> &S {
        &self.source
    }

    /// [ReverseGeocoder] in use
    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Shared [EphemerisStore], for other readers or writers.
    pub fn store(&self) -> Arc<EphemerisStore> {
        self.store.clone()
    }

    /// Current [StoreState]
    pub fn state(&self) -> StoreState {
        self.store.state()
    }

    /// Fetches all state vectors from the [EphemerisSource] and replaces
    /// the store content. Returns the number of records loaded.
    /// On failure, the store content is left untouched.
    pub fn reload(&self) -> Result<usize, Error> {
        let records = self.source.fetch(&self.cfg.source_url).map_err(|e| {
            error!("failed to reload ephemeris from {}: {}", self.cfg.source_url, e);
            match e {
                Error::Source(_) => e,
                e => Error::Source(e.to_string()),
            }
        })?;

        let size = records.len();
        self.store.load(records);
        Ok(size)
    }

    /// Deletes all state vectors
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Lists epochs, from textual pagination parameters
    pub fn epochs(&self, limit: Option<&str>, offset: Option<&str>) -> Result<Vec<String>, Error> {
        self.engine.list_epochs_str(limit, offset)
    }

    /// State vector at this exact epoch
    pub fn state_vector(&self, epoch: &str) -> Result<StateVectorRecord, Error> {
        self.store.find_by_epoch(epoch)
    }

    /// Speed at this exact epoch
    pub fn speed(&self, epoch: &str) -> Result<Measurement, Error> {
        let record = self.store.find_by_epoch(epoch)?;
        CoordinateTransformer::speed(&record)
    }

    /// Location at this exact epoch
    pub fn location(&self, epoch: &str) -> Result<LocationReport, Error> {
        let record = self.store.find_by_epoch(epoch)?;
        let (location, geo, speed) = self.describe(&record)?;
        Ok(LocationReport {
            epoch: record.epoch,
            location,
            geo,
            speed,
        })
    }

    /// Location at the epoch closest to current time
    pub fn location_now(&self) -> Result<NowReport, Error> {
        let now = Epoch::now().map_err(|_| Error::Clock)?;
        self.location_at(now)
    }

    /// Location at the epoch closest to `t`
    pub fn location_at(&self, t: Epoch) -> Result<NowReport, Error> {
        let NearestEpoch {
            record,
            seconds_from_now,
        } = self.engine.find_nearest(t)?;

        let (location, geo, speed) = self.describe(&record)?;

        Ok(NowReport {
            closest_epoch: record.epoch,
            seconds_from_now,
            location,
            geo,
            speed,
        })
    }

    fn describe(
        &self,
        record: &StateVectorRecord,
    ) -> Result<(GeodeticPosition, GeoLocation, Measurement), Error> {
        let location = CoordinateTransformer::to_geodetic(record)?;
        let speed = CoordinateTransformer::speed(record)?;

        let geo = match self.geocoder.reverse(
            location.latitude,
            location.longitude,
            &self.cfg.geocoding,
        ) {
            Ok(geo) => geo,
            Err(e) => {
                warn!("{} - reverse geocoding failed: {}", record.epoch, e);
                GeoLocation::Unresolved
            },
        };

        debug!("{} - {:?} ({})", record.epoch, location, geo);
        Ok((location, geo, speed))
    }
}
