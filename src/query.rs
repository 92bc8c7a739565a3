use std::{num::IntErrorKind, sync::Arc};

use log::debug;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    error::Error,
    prelude::Epoch,
    record::StateVectorRecord,
    store::{EphemerisStore, Snapshot},
};

/// [Pagination] parameters of an epoch listing.
/// Unset fields fall back to their defaults
/// (offset: 0, limit: all remaining epochs).
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Maximal number of epochs to return
    pub limit: Option<usize>,
    /// Number of epochs to skip
    pub offset: Option<usize>,
}

fn invalid(name: &'static str, reason: String) -> Error {
    Error::InvalidParameter { name, reason }
}

fn parse_parameter(name: &'static str, value: Option<&str>) -> Result<Option<usize>, Error> {
    let Some(value) = value else {
        return Ok(None);
    };

    match value.trim().parse::<i64>() {
        Ok(parsed) => non_negative(name, Some(parsed)),
        Err(e) => match e.kind() {
            // any page past the end: saturate
            IntErrorKind::PosOverflow => Ok(Some(usize::MAX)),
            IntErrorKind::NegOverflow => Err(invalid(name, format!("{} is negative", value))),
            _ => Err(invalid(name, format!("\"{}\" is not an integer", value))),
        },
    }
}

fn non_negative(name: &'static str, value: Option<i64>) -> Result<Option<usize>, Error> {
    match value {
        None => Ok(None),
        Some(value) if value < 0 => Err(invalid(name, format!("{} is negative", value))),
        Some(value) => Ok(Some(usize::try_from(value).unwrap_or(usize::MAX))),
    }
}

impl Pagination {
    /// Builds [Pagination] from signed integers.
    /// Negative values are rejected with [Error::InvalidParameter].
    pub fn from_signed(limit: Option<i64>, offset: Option<i64>) -> Result<Self, Error> {
        Ok(Self {
            limit: non_negative("limit", limit)?,
            offset: non_negative("offset", offset)?,
        })
    }

    /// Parses [Pagination] from textual parameters (typically, query string values).
    /// Non integer and negative values are rejected with [Error::InvalidParameter].
    /// Integers too large to be represented saturate.
    /// The limit is verified first.
    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> Result<Self, Error> {
        let limit = parse_parameter("limit", limit)?;
        let offset = parse_parameter("offset", offset)?;
        Ok(Self { limit, offset })
    }
}

/// [NearestEpoch] is the record closest to a reference time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NearestEpoch {
    /// Selected record
    pub record: StateVectorRecord,
    /// Record epoch minus reference time, in seconds.
    /// Positive when the record lies in the future.
    pub seconds_from_now: f64,
}

impl Snapshot {
    /// Lists `limit` epochs starting at position `offset`, in snapshot order.
    /// Offset defaults to 0 and limit defaults to the total number of records.
    /// A limit larger than what remains simply returns all remaining epochs.
    pub fn list_epochs(&self, page: Pagination) -> Result<Vec<String>, Error> {
        let records = self.records()?;
        let total = records.len();

        let offset = page.offset.unwrap_or(0);
        let limit = page.limit.unwrap_or(total);

        if offset >= total {
            return Err(Error::OffsetOutOfRange { offset, total });
        }

        Ok(records
            .iter()
            .skip(offset)
            .take(limit)
            .map(|record| record.epoch.clone())
            .collect())
    }

    /// Searches the record whose epoch is the closest to `t`.
    /// Ties resolve to the first record, in snapshot order.
    pub fn nearest(&self, t: Epoch) -> Result<NearestEpoch, Error> {
        let records = self.records()?;
        let mut iter = records.iter();

        let Some(first) = iter.next() else {
            return Err(Error::EmptyStore);
        };

        let mut best = first;
        let mut best_dt_s = (first.to_epoch()? - t).to_seconds();

        for record in iter {
            let dt_s = (record.to_epoch()? - t).to_seconds();
            // strict: first minimum wins
            if dt_s.abs() < best_dt_s.abs() {
                best = record;
                best_dt_s = dt_s;
            }
        }

        debug!("{} - nearest epoch {} (dt={:.3}s)", t, best.epoch, best_dt_s);

        Ok(NearestEpoch {
            record: best.clone(),
            seconds_from_now: best_dt_s,
        })
    }
}

/// [EpochQueryEngine] resolves pagination and nearest-time queries.
/// Each query runs on a single [Snapshot] of the [EphemerisStore].
#[derive(Debug, Clone)]
pub struct EpochQueryEngine {
    store: Arc<EphemerisStore>,
    default_limit: Option<usize>,
}

impl EpochQueryEngine {
    /// Creates a new [EpochQueryEngine] over the shared [EphemerisStore]
    pub fn new(store: Arc<EphemerisStore>) -> Self {
        Self {
            store,
            default_limit: None,
        }
    }

    /// Copies and returns [EpochQueryEngine] with a default page size,
    /// applied when no limit is requested.
    pub fn with_default_limit(&self, limit: Option<usize>) -> Self {
        let mut s = self.clone();
        s.default_limit = limit;
        s
    }

    /// See [Snapshot::list_epochs]
    pub fn list_epochs(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<String>, Error> {
        self.list_page(&self.store.snapshot(), Pagination { limit, offset })
    }

    /// Lists epochs from textual parameters, see [Pagination::parse].
    /// An empty store is reported prior any parameter verification.
    pub fn list_epochs_str(
        &self,
        limit: Option<&str>,
        offset: Option<&str>,
    ) -> Result<Vec<String>, Error> {
        let snapshot = self.store.snapshot();
        snapshot.records()?;

        let page = Pagination::parse(limit, offset)?;
        self.list_page(&snapshot, page)
    }

    fn list_page(&self, snapshot: &Snapshot, page: Pagination) -> Result<Vec<String>, Error> {
        let page = Pagination {
            limit: page.limit.or(self.default_limit),
            offset: page.offset,
        };
        snapshot.list_epochs(page)
    }

    /// Searches the record closest to `t`, see [Snapshot::nearest]
    pub fn find_nearest(&self, t: Epoch) -> Result<NearestEpoch, Error> {
        self.store.snapshot().nearest(t)
    }

    /// Searches the record closest to the current system time
    pub fn find_nearest_to_now(&self) -> Result<NearestEpoch, Error> {
        let now = Epoch::now().map_err(|_| Error::Clock)?;
        self.find_nearest(now)
    }
}
