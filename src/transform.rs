#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    constants::{
        ALTITUDE_UNITS, EARTH_ROTATION_DEG_PER_HOUR, LONGITUDE_OFFSET_DEG, MEAN_EARTH_RADIUS_KM,
        ROTATION_REFERENCE_HOUR, SPEED_UNITS,
    },
    error::Error,
    record::StateVectorRecord,
};

/// Scalar value with its units
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Measurement {
    /// Value, expressed in [Measurement::units]
    pub value: f64,
    /// Units of [Measurement::value]
    pub units: &'static str,
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.units)
    }
}

/// [GeodeticPosition] relative to a spherical Earth.
/// Derived on each query, never stored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GeodeticPosition {
    /// Latitude (degrees)
    pub latitude: f64,
    /// Longitude (degrees)
    pub longitude: f64,
    /// Altitude above [MEAN_EARTH_RADIUS_KM] (km)
    pub altitude: Measurement,
}

fn finite_components(record: &StateVectorRecord, velocity: bool) -> Result<(f64, f64, f64), Error> {
    let (name, v) = if velocity {
        ("velocity", &record.velocity)
    } else {
        ("position", &record.position)
    };

    if v.iter().all(|c| c.is_finite()) {
        Ok((v[0], v[1], v[2]))
    } else {
        Err(Error::MalformedRecord(format!(
            "{}: invalid {} components",
            record.epoch, name
        )))
    }
}

/// [CoordinateTransformer] derives geodetic position and speed
/// from inertial frame state vectors.
pub struct CoordinateTransformer {}

impl CoordinateTransformer {
    /// Converts the inertial position of this record to a [GeodeticPosition].
    ///
    /// The Earth rotation is approximated by a linear angle, function of the
    /// time of day only. This is a coarse approximation (no precession,
    /// no nutation, no sidereal drift across days) that is kept as is,
    /// so longitudes remain comparable with previously published values.
    /// Longitudes are not wrapped.
    pub fn to_geodetic(record: &StateVectorRecord) -> Result<GeodeticPosition, Error> {
        let (x, y, z) = finite_components(record, false)?;
        let stamp = record.stamp()?;

        let latitude = z.atan2((x.powi(2) + y.powi(2)).sqrt()).to_degrees();

        let rotation_deg =
            (stamp.fractional_hour() - ROTATION_REFERENCE_HOUR) * EARTH_ROTATION_DEG_PER_HOUR;

        let longitude = y.atan2(x).to_degrees() - rotation_deg + LONGITUDE_OFFSET_DEG;

        let altitude = record.position.norm() - MEAN_EARTH_RADIUS_KM;

        Ok(GeodeticPosition {
            latitude,
            longitude,
            altitude: Measurement {
                value: altitude,
                units: ALTITUDE_UNITS,
            },
        })
    }

    /// Instantaneous speed (norm of the velocity vector)
    pub fn speed(record: &StateVectorRecord) -> Result<Measurement, Error> {
        finite_components(record, true)?;
        Ok(Measurement {
            value: record.velocity.norm(),
            units: SPEED_UNITS,
        })
    }
}
