use crate::builder::Builder;
use crate::clock::{Clock, SystemClock};
use crate::error::*;
use crate::generator::IdGenerator;
use crate::sequencer::Sequencer;
use crate::worker::WorkerId;
use chrono::prelude::*;
use std::sync::Arc;

/// Default bit length of the millisecond timestamp.
pub const DEFAULT_BIT_LEN_TIME: u8 = 41;
/// Default bit length of the folded worker id.
pub const DEFAULT_BIT_LEN_WORKER_ID: u8 = 10;
/// Default bit length of the per-millisecond sequence.
pub const DEFAULT_BIT_LEN_SEQUENCE: u8 = 12;

/// SharedSnowflake is shared between Snowflake instances.
/// This struct is not exposed to the public.
pub(crate) struct SharedSnowflake<C> {
    pub(crate) sequencer: Sequencer<C>,
    pub(crate) worker_id: WorkerId,
    pub(crate) worker_bits: u64,
    pub(crate) bit_len_time: u8,
    pub(crate) bit_len_worker_id: u8,
    pub(crate) bit_len_sequence: u8,
}

/// Snowflake generates sortable 64-bit ids.
///
/// Layout, most significant bit first: one zero sign bit, the milliseconds
/// elapsed since the epoch, the worker id folded down to its field width, and
/// the sequence within the millisecond. The default split is 41/10/12.
///
/// It is thread-safe; clones share the same clock and sequence state.
pub struct Snowflake<C = SystemClock>(pub(crate) Arc<SharedSnowflake<C>>);

impl Snowflake {
    /// Create a new Snowflake with worker id 0 and the Unix epoch.
    /// For custom configuration see [`builder`].
    ///
    /// [`builder`]: struct.Snowflake.html#method.builder
    pub fn new() -> Result<Self, Error> {
        Builder::new().finalize()
    }

    /// Create a new [`Builder`] to construct a Snowflake.
    ///
    /// [`Builder`]: struct.Builder.html
    pub fn builder<'a>() -> Builder<'a> {
        Builder::new()
    }
}

impl<C: Clock> Snowflake<C> {
    pub(crate) fn new_inner(shared: Arc<SharedSnowflake<C>>) -> Self {
        Self(shared)
    }

    /// Generate the next unique id.
    ///
    /// Fails with [`Error::ClockMovedBackwards`] under the fail-fast policy
    /// and with [`Error::OverTimeLimit`] once the timestamp no longer fits
    /// its field.
    pub fn next_id(&self) -> Result<i64, Error> {
        let shared = &self.0;
        let (elapsed_time, sequence) = shared.sequencer.advance()?;
        Ok(((elapsed_time as u64)
            << (shared.bit_len_worker_id + shared.bit_len_sequence)
            | shared.worker_bits << shared.bit_len_sequence
            | sequence) as i64)
    }

    pub fn worker_id(&self) -> WorkerId {
        self.0.worker_id
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.0.sequencer.epoch()
    }

    /// Break an id produced by this generator up into its parts.
    pub fn decompose(&self, id: i64) -> DecomposedSnowflake {
        DecomposedSnowflake::decompose(
            id,
            self.0.bit_len_time,
            self.0.bit_len_worker_id,
            self.0.bit_len_sequence,
        )
    }

    /// The instant, at millisecond precision, an id was generated.
    pub fn created_at(&self, id: i64) -> DateTime<Utc> {
        let parts = self.decompose(id);
        self.epoch() + chrono::Duration::milliseconds(parts.time as i64)
    }
}

impl<C: Clock> IdGenerator for Snowflake<C> {
    type Id = i64;

    fn generate(&self) -> Result<i64, Error> {
        self.next_id()
    }
}

/// Returns a new `Snowflake` referencing the same state as `self`.
/// This is used for concurrent use.
impl<C> Clone for Snowflake<C> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// DecomposedSnowflake is the parts of a Snowflake ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecomposedSnowflake {
    pub id: i64,
    pub msb: u64,
    /// Milliseconds since the generator's epoch.
    pub time: u64,
    pub worker_id: u64,
    pub sequence: u64,
}

impl DecomposedSnowflake {
    /// Break a Snowflake ID up into its parts, given the field widths it was
    /// generated with.
    pub fn decompose(
        id: i64,
        bit_len_time: u8,
        bit_len_worker_id: u8,
        bit_len_sequence: u8,
    ) -> Self {
        let raw = id as u64;
        let mask = |bits: u8| (1u64 << bits) - 1;
        Self {
            id,
            msb: raw >> 63,
            time: (raw >> (bit_len_worker_id + bit_len_sequence)) & mask(bit_len_time),
            worker_id: (raw >> bit_len_sequence) & mask(bit_len_worker_id),
            sequence: raw & mask(bit_len_sequence),
        }
    }
}
