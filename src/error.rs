// Copyright 2022 houseme
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use chrono::{DateTime, Utc};
use std::error::Error as StdError;
use thiserror::Error;

/// Convenience type alias for errors returned by worker id providers.
pub type BoxDynError = Box<dyn StdError + 'static + Send + Sync>;

/// The error type for this crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("start_time `{0}` is ahead of current time")]
    StartTimeAheadOfCurrentTime(DateTime<Utc>),
    #[error("worker id must be at least 6 bytes long, got {0}")]
    WorkerIdTooShort(usize),
    #[error("worker id of {0} bytes does not fit in 48 bits")]
    WorkerIdOverflow(usize),
    #[error("worker_id_provider returned an error: {0}")]
    WorkerIdFailed(#[source] BoxDynError),
    #[error("clock moved backwards: last tick {last}, current tick {current}")]
    ClockMovedBackwards { last: i64, current: i64 },
    #[error("clock reads `{0}`, which is before the epoch")]
    ClockBeforeEpoch(DateTime<Utc>),
    #[error("over the time limit")]
    OverTimeLimit,
    #[error("mutex is poisoned (i.e. a panic happened while it was locked)")]
    MutexPoisoned,
    #[error(
        "invalid bit length configuration: time({0}) + worker_id({1}) + sequence({2}) must be 63, each non-zero"
    )]
    InvalidBitLength(u8, u8, u8),
    #[error("could not find any network interface with a hardware address")]
    NoMacAddress,
}
