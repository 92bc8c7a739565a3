use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Any query issued while the [EphemerisStore] holds no record:
    /// either it was cleared, or it was loaded with an empty sequence.
    #[error("no ephemeris data: store is empty (reload required)")]
    EmptyStore,

    /// Pagination parameter is not a non-negative integer.
    #[error("invalid {name} parameter: {reason}")]
    InvalidParameter {
        /// Parameter name (limit, offset)
        name: &'static str,
        /// Why it got rejected
        reason: String,
    },

    /// Requested page starts past the last record.
    #[error("offset {offset} is equal to or greater than number of epochs ({total})")]
    OffsetOutOfRange { offset: usize, total: usize },

    /// Exact epoch lookup failed.
    #[error("epoch not found: {0}")]
    EpochNotFound(String),

    /// A record lacks (or carries unparsable) numeric or time fields.
    /// This is an upstream data quality issue, not a usage error.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// The ephemeris data source failed to provide new records.
    #[error("ephemeris source error: {0}")]
    Source(String),

    /// System clock could not be resolved when searching "now".
    #[error("failed to read system time")]
    Clock,
}
