use crate::clock::{Clock, ClockPolicy, Resolution, SystemClock};
use crate::error::{BoxDynError, Error};
use crate::sequencer::Sequencer;
use crate::snowflake::{
    SharedSnowflake, Snowflake, DEFAULT_BIT_LEN_SEQUENCE, DEFAULT_BIT_LEN_TIME,
    DEFAULT_BIT_LEN_WORKER_ID,
};
use crate::wide::{SharedWide, WideSnowflake};
use crate::worker::WorkerId;
use chrono::prelude::*;
use std::sync::Arc;
use tracing::debug;

type WorkerIdProvider<'a> = &'a dyn Fn() -> Result<WorkerId, BoxDynError>;

/// Settings common to both generators.
struct Common<'a, C> {
    start_time: Option<DateTime<Utc>>,
    worker_id: Option<WorkerId>,
    worker_id_provider: Option<WorkerIdProvider<'a>>,
    clock_policy: ClockPolicy,
    clock: C,
}

impl<'a> Common<'a, SystemClock> {
    fn new() -> Self {
        Self {
            start_time: None,
            worker_id: None,
            worker_id_provider: None,
            clock_policy: ClockPolicy::default(),
            clock: SystemClock,
        }
    }
}

impl<'a, C: Clock> Common<'a, C> {
    fn with_clock<C2: Clock>(self, clock: C2) -> Common<'a, C2> {
        Common {
            start_time: self.start_time,
            worker_id: self.worker_id,
            worker_id_provider: self.worker_id_provider,
            clock_policy: self.clock_policy,
            clock,
        }
    }

    fn epoch(&self) -> Result<DateTime<Utc>, Error> {
        match self.start_time {
            Some(start_time) if start_time > self.clock.now() => {
                Err(Error::StartTimeAheadOfCurrentTime(start_time))
            }
            Some(start_time) => Ok(start_time),
            None => Ok(DateTime::<Utc>::UNIX_EPOCH),
        }
    }

    /// An explicit id wins over the provider; with neither, the id is 0.
    fn worker_id(&self) -> Result<WorkerId, Error> {
        if let Some(worker_id) = self.worker_id {
            return Ok(worker_id);
        }
        match self.worker_id_provider {
            Some(provider) => provider().map_err(Error::WorkerIdFailed),
            None => Ok(WorkerId::default()),
        }
    }

    fn sequencer(
        self,
        epoch: DateTime<Utc>,
        resolution: Resolution,
        max_sequence: u64,
        max_tick: i64,
    ) -> Sequencer<C> {
        Sequencer::new(
            self.clock,
            epoch,
            resolution,
            max_sequence,
            max_tick,
            self.clock_policy,
        )
    }
}

/// A builder for building the [`Snowflake`] generator.
///
/// [`Snowflake`]: struct.Snowflake.html
pub struct Builder<'a, C = SystemClock> {
    common: Common<'a, C>,
    bit_len_time: u8,
    bit_len_worker_id: u8,
    bit_len_sequence: u8,
}

impl<'a> Default for Builder<'a> {
    fn default() -> Self {
        Builder::new()
    }
}

impl<'a> Builder<'a> {
    /// Construct a new builder for the build of [`Snowflake`].
    ///
    /// [`Snowflake`]: struct.Snowflake.html
    pub fn new() -> Self {
        Self {
            common: Common::new(),
            bit_len_time: DEFAULT_BIT_LEN_TIME,
            bit_len_worker_id: DEFAULT_BIT_LEN_WORKER_ID,
            bit_len_sequence: DEFAULT_BIT_LEN_SEQUENCE,
        }
    }
}

impl<'a, C: Clock> Builder<'a, C> {
    /// Set the start time (the epoch). Defaults to the Unix epoch.
    /// If the time is set later than the current time, 'finalize' will fail.
    pub fn start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.common.start_time = Some(start_time);
        self
    }

    /// Set the worker ID. Takes precedence over `worker_id_provider`.
    pub fn worker_id(mut self, worker_id: impl Into<WorkerId>) -> Self {
        self.common.worker_id = Some(worker_id.into());
        self
    }

    /// Set a function that supplies the worker ID.
    /// If the provided closure returns an error, 'finalize' will fail.
    pub fn worker_id_provider(mut self, provider: WorkerIdProvider<'a>) -> Self {
        self.common.worker_id_provider = Some(provider);
        self
    }

    /// Set what happens when the clock moves backward.
    pub fn clock_policy(mut self, clock_policy: ClockPolicy) -> Self {
        self.common.clock_policy = clock_policy;
        self
    }

    /// Read time from `clock` instead of the system clock.
    pub fn clock<C2: Clock>(self, clock: C2) -> Builder<'a, C2> {
        Builder {
            common: self.common.with_clock(clock),
            bit_len_time: self.bit_len_time,
            bit_len_worker_id: self.bit_len_worker_id,
            bit_len_sequence: self.bit_len_sequence,
        }
    }

    /// Set the bit length of the timestamp section.
    pub fn bit_len_time(mut self, bit_len_time: u8) -> Self {
        self.bit_len_time = bit_len_time;
        self
    }

    /// Set the bit length of the worker ID section.
    pub fn bit_len_worker_id(mut self, bit_len_worker_id: u8) -> Self {
        self.bit_len_worker_id = bit_len_worker_id;
        self
    }

    /// Set the bit length of the sequence section.
    pub fn bit_len_sequence(mut self, bit_len_sequence: u8) -> Self {
        self.bit_len_sequence = bit_len_sequence;
        self
    }

    /// Finish building and create a Snowflake instance.
    /// This method will return an error if the worker id provider fails or if
    /// validation fails.
    pub fn finalize(self) -> Result<Snowflake<C>, Error> {
        let lens = [self.bit_len_time, self.bit_len_worker_id, self.bit_len_sequence];
        if lens.contains(&0) || lens.iter().map(|&l| u32::from(l)).sum::<u32>() != 63 {
            return Err(Error::InvalidBitLength(
                self.bit_len_time,
                self.bit_len_worker_id,
                self.bit_len_sequence,
            ));
        }

        let epoch = self.common.epoch()?;
        let worker_id = self.common.worker_id()?;
        let worker_bits = worker_id.fold(self.bit_len_worker_id);
        debug!(
            %epoch,
            %worker_id,
            worker_bits,
            bit_len_time = self.bit_len_time,
            bit_len_worker_id = self.bit_len_worker_id,
            bit_len_sequence = self.bit_len_sequence,
            "built snowflake generator"
        );

        let max_sequence = (1 << self.bit_len_sequence) - 1;
        let max_tick = (1 << self.bit_len_time) - 1;
        let sequencer = self
            .common
            .sequencer(epoch, Resolution::Millis, max_sequence, max_tick);
        let shared = Arc::new(SharedSnowflake {
            sequencer,
            worker_id,
            worker_bits,
            bit_len_time: self.bit_len_time,
            bit_len_worker_id: self.bit_len_worker_id,
            bit_len_sequence: self.bit_len_sequence,
        });
        Ok(Snowflake::new_inner(shared))
    }
}

/// A builder for building the [`WideSnowflake`] generator.
///
/// [`WideSnowflake`]: struct.WideSnowflake.html
pub struct WideBuilder<'a, C = SystemClock> {
    common: Common<'a, C>,
}

impl<'a> Default for WideBuilder<'a> {
    fn default() -> Self {
        WideBuilder::new()
    }
}

impl<'a> WideBuilder<'a> {
    pub fn new() -> Self {
        Self {
            common: Common::new(),
        }
    }
}

impl<'a, C: Clock> WideBuilder<'a, C> {
    /// Set the start time (the epoch). Defaults to the Unix epoch.
    /// If the time is set later than the current time, 'finalize' will fail.
    pub fn start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.common.start_time = Some(start_time);
        self
    }

    /// Set the worker ID. Takes precedence over `worker_id_provider`.
    pub fn worker_id(mut self, worker_id: impl Into<WorkerId>) -> Self {
        self.common.worker_id = Some(worker_id.into());
        self
    }

    /// Set a function that supplies the worker ID.
    pub fn worker_id_provider(mut self, provider: WorkerIdProvider<'a>) -> Self {
        self.common.worker_id_provider = Some(provider);
        self
    }

    pub fn clock_policy(mut self, clock_policy: ClockPolicy) -> Self {
        self.common.clock_policy = clock_policy;
        self
    }

    pub fn clock<C2: Clock>(self, clock: C2) -> WideBuilder<'a, C2> {
        WideBuilder {
            common: self.common.with_clock(clock),
        }
    }

    pub fn finalize(self) -> Result<WideSnowflake<C>, Error> {
        let epoch = self.common.epoch()?;
        let worker_id = self.common.worker_id()?;
        debug!(%epoch, %worker_id, "built wide snowflake generator");

        let max_sequence = u64::from(u16::MAX);
        let sequencer = self
            .common
            .sequencer(epoch, Resolution::HundredNanos, max_sequence, i64::MAX);
        let shared = Arc::new(SharedWide { sequencer, worker_id });
        Ok(WideSnowflake::new_inner(shared))
    }
}
