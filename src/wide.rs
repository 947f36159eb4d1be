use crate::builder::WideBuilder;
use crate::clock::{Clock, SystemClock};
use crate::error::Error;
use crate::generator::IdGenerator;
use crate::sequencer::Sequencer;
use crate::worker::WorkerId;
use chrono::prelude::*;
use std::{fmt, sync::Arc};

/// A 128-bit, k-ordered identifier.
///
/// Serialized as 16 bytes:
///
/// | bytes  | field                                           |
/// |--------|-------------------------------------------------|
/// | 0..8   | 100ns ticks since the epoch, big-endian         |
/// | 8..14  | worker id, big-endian                           |
/// | 14..16 | sequence within the tick, big-endian            |
///
/// Comparing two ids compares those 16 bytes as an unsigned big-endian
/// number, so ids from one generator sort in generation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WideId(u128);

impl WideId {
    pub const fn from_parts(timestamp: u64, worker_id: WorkerId, sequence: u16) -> Self {
        Self(
            (timestamp as u128) << 64
                | (worker_id.as_u64() as u128) << 16
                | sequence as u128,
        )
    }

    pub const fn from_u128(value: u128) -> Self {
        Self(value)
    }

    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(u128::from_be_bytes(bytes))
    }

    pub const fn as_u128(&self) -> u128 {
        self.0
    }

    pub const fn to_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    /// Ticks of 100 nanoseconds since the generator's epoch.
    pub const fn timestamp(&self) -> u64 {
        (self.0 >> 64) as u64
    }

    pub const fn worker_id(&self) -> WorkerId {
        WorkerId::from_u64((self.0 >> 16) as u64)
    }

    pub const fn sequence(&self) -> u16 {
        self.0 as u16
    }
}

/// Formats as a lowercase, hyphenated UUID string.
impl fmt::Display for WideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            (v >> 96) as u32,
            (v >> 80) as u16,
            (v >> 64) as u16,
            (v >> 48) as u16,
            (v & 0xFFFF_FFFF_FFFF) as u64,
        )
    }
}

impl From<WideId> for u128 {
    fn from(id: WideId) -> Self {
        id.0
    }
}

impl From<WideId> for [u8; 16] {
    fn from(id: WideId) -> Self {
        id.to_bytes()
    }
}

/// `Uuid::from_u128` keeps the big-endian byte order, so `as_bytes()` on the
/// result matches [`WideId::to_bytes`].
#[cfg(feature = "uuid")]
impl From<WideId> for uuid::Uuid {
    fn from(id: WideId) -> Self {
        uuid::Uuid::from_u128(id.0)
    }
}

#[cfg(feature = "uuid")]
impl From<uuid::Uuid> for WideId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid.as_u128())
    }
}

pub(crate) struct SharedWide<C> {
    pub(crate) sequencer: Sequencer<C>,
    pub(crate) worker_id: WorkerId,
}

/// WideSnowflake generates [`WideId`]s: a 64-bit timestamp of 100ns ticks, a
/// 48-bit worker id and a 16-bit sequence.
///
/// It keeps its own clock and sequence state, independent of any
/// [`Snowflake`](crate::Snowflake). Clones share that state.
pub struct WideSnowflake<C = SystemClock>(pub(crate) Arc<SharedWide<C>>);

impl WideSnowflake {
    /// Create a new WideSnowflake with worker id 0 and the Unix epoch.
    pub fn new() -> Result<Self, Error> {
        WideBuilder::new().finalize()
    }

    pub fn builder<'a>() -> WideBuilder<'a> {
        WideBuilder::new()
    }
}

impl<C: Clock> WideSnowflake<C> {
    pub(crate) fn new_inner(shared: Arc<SharedWide<C>>) -> Self {
        Self(shared)
    }

    /// Generate the next unique id.
    pub fn next_id(&self) -> Result<WideId, Error> {
        let (tick, sequence) = self.0.sequencer.advance()?;
        Ok(WideId::from_parts(tick as u64, self.0.worker_id, sequence as u16))
    }

    pub fn worker_id(&self) -> WorkerId {
        self.0.worker_id
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.0.sequencer.epoch()
    }
}

impl<C: Clock> IdGenerator for WideSnowflake<C> {
    type Id = WideId;

    fn generate(&self) -> Result<WideId, Error> {
        self.next_id()
    }
}

impl<C> Clone for WideSnowflake<C> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
