use std::str::FromStr;

use hifitime::Unit;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    error::Error,
    prelude::{Epoch, Vector3},
};

/// [EpochStamp] is the parsed form of an OEM epoch, formatted as
/// `YYYY-DDDTHH:MM:SS.sssZ` (year, day of year, time of day, UTC).
/// Sub-second digits and the `Z` suffix are accepted and ignored:
/// whole seconds are enough to compare and rotate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EpochStamp {
    /// Calendar year
    pub year: i32,
    /// Day of year, starting at 1
    pub day_of_year: u16,
    /// Hour of day
    pub hour: u8,
    /// Minute of hour
    pub minute: u8,
    /// Whole seconds
    pub second: u8,
}

fn malformed(epoch: &str) -> Error {
    Error::MalformedRecord(format!("invalid epoch \"{}\"", epoch))
}

fn days_in_year(year: i32) -> u16 {
    if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 {
        366
    } else {
        365
    }
}

impl FromStr for EpochStamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let content = s.trim();
        let (date, time) = content.split_once('T').ok_or_else(|| malformed(s))?;

        let (year, doy) = date.split_once('-').ok_or_else(|| malformed(s))?;
        let year = year.parse::<i32>().map_err(|_| malformed(s))?;
        let day_of_year = doy.parse::<u16>().map_err(|_| malformed(s))?;
        if day_of_year == 0 || day_of_year > days_in_year(year) {
            return Err(malformed(s));
        }

        let time = time.strip_suffix('Z').unwrap_or(time);
        let mut items = time.split(':');

        let (Some(hh), Some(mm), Some(ss), None) =
            (items.next(), items.next(), items.next(), items.next())
        else {
            return Err(malformed(s));
        };

        let hour = hh.parse::<u8>().map_err(|_| malformed(s))?;
        let minute = mm.parse::<u8>().map_err(|_| malformed(s))?;

        let (whole, fraction) = ss.split_once('.').unwrap_or((ss, ""));
        let second = whole.parse::<u8>().map_err(|_| malformed(s))?;

        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(malformed(s));
        }

        // 60 is tolerated (leap second)
        if hour > 23 || minute > 59 || second > 60 {
            return Err(malformed(s));
        }

        Ok(Self {
            year,
            day_of_year,
            hour,
            minute,
            second,
        })
    }
}

impl EpochStamp {
    /// Converts this stamp to an absolute UTC [Epoch]
    pub fn to_epoch(&self) -> Epoch {
        Epoch::from_gregorian_utc_at_midnight(self.year, 1, 1)
            + Unit::Day * f64::from(self.day_of_year - 1)
            + Unit::Hour * f64::from(self.hour)
            + Unit::Minute * f64::from(self.minute)
            + Unit::Second * f64::from(self.second)
    }

    /// Hour of day, expressed in fractional hours (minute resolution)
    pub fn fractional_hour(&self) -> f64 {
        f64::from(self.hour) + f64::from(self.minute) / 60.0
    }
}

/// [StateVectorRecord] is one ephemeris sample: position and velocity
/// of the spacecraft, in an inertial frame, at a given epoch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StateVectorRecord {
    /// Epoch, as published by the data source
    pub epoch: String,
    /// Position (km)
    pub position: Vector3<f64>,
    /// Velocity (km/s)
    pub velocity: Vector3<f64>,
}

impl std::fmt::Display for StateVectorRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} x={:.6}km y={:.6}km z={:.6}km vx={:.9}km/s vy={:.9}km/s vz={:.9}km/s",
            self.epoch,
            self.position[0],
            self.position[1],
            self.position[2],
            self.velocity[0],
            self.velocity[1],
            self.velocity[2],
        )
    }
}

impl StateVectorRecord {
    /// Builds a new [StateVectorRecord]
    /// - epoch: `YYYY-DDDTHH:MM:SS.sssZ`
    /// - position (km)
    /// - velocity (km/s)
    pub fn new(epoch: impl Into<String>, position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Self {
            epoch: epoch.into(),
            position,
            velocity,
        }
    }

    /// Builds a [StateVectorRecord] from the textual fields of a feed entry,
    /// in the `X, Y, Z, X_DOT, Y_DOT, Z_DOT` order.
    /// Any absent or unparsable field is reported as [Error::MalformedRecord].
    pub fn from_text_fields(epoch: Option<&str>, fields: [Option<&str>; 6]) -> Result<Self, Error> {
        const NAMES: [&str; 6] = ["X", "Y", "Z", "X_DOT", "Y_DOT", "Z_DOT"];

        let epoch = epoch.ok_or_else(|| Error::MalformedRecord("missing EPOCH".to_string()))?;

        let mut values = [0.0_f64; 6];

        for (i, field) in fields.iter().enumerate() {
            let text = field.ok_or_else(|| {
                Error::MalformedRecord(format!("{}: missing {}", epoch, NAMES[i]))
            })?;

            values[i] = text.trim().parse::<f64>().map_err(|_| {
                Error::MalformedRecord(format!("{}: invalid {} \"{}\"", epoch, NAMES[i], text))
            })?;
        }

        Ok(Self::new(
            epoch,
            Vector3::new(values[0], values[1], values[2]),
            Vector3::new(values[3], values[4], values[5]),
        ))
    }

    /// Parses the [EpochStamp] of this record
    pub fn stamp(&self) -> Result<EpochStamp, Error> {
        EpochStamp::from_str(&self.epoch)
    }

    /// Returns the absolute (UTC) [Epoch] of this record
    pub fn to_epoch(&self) -> Result<Epoch, Error> {
        Ok(self.stamp()?.to_epoch())
    }
}
