// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Page;

/// Failures of the durable key-value store itself.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },
}

/// Stored requests could not be read back. Always recovered by starting empty.
#[derive(Debug, Error)]
pub enum PersistenceReadError {
    #[error("storage unreadable: {0}")]
    Storage(#[from] StorageError),

    #[error("malformed requests record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// An in-memory mutation succeeded but could not be made durable.
#[derive(Debug, Error)]
pub enum PersistenceWriteError {
    #[error("storage write failed: {0}")]
    Storage(#[from] StorageError),

    #[error("could not encode requests: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A navigation call that would break the navigation contract.
/// The coordinator state is left untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("page {0} needs a selected day; use open_day_timeline")]
    DayRequired(Page),

    #[error("index {index} is out of range for a schedule of {len} days")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("day {day_id} is not at index {index} of the schedule")]
    DayMismatch { day_id: i64, index: usize },

    #[error("day id {0} appears more than once in the schedule")]
    DuplicateDayId(i64),

    #[error("day {0} is not part of the selected schedule")]
    DayNotInSchedule(i64),

    #[error("operation requires the day timeline page, current page is {0}")]
    NotOnDayTimeline(Page),

    #[error("selector no longer matches the selected day")]
    SelectorOutOfSync,

    #[error("unknown notification {0}")]
    UnknownNotification(i64),
}

#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schedule in {} repeats day id {id}", path.display())]
    DuplicateDayId { path: PathBuf, id: i64 },

    #[error("invalid reference data in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
