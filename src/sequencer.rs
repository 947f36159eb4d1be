use crate::clock::{Clock, ClockPolicy, Resolution};
use crate::error::Error;
use chrono::prelude::*;
use std::{cmp::Ordering, sync::Mutex, thread};
use tracing::{debug, warn};

/// Clock and sequence state of one engine.
#[derive(Debug)]
struct Internals {
    last_tick: i64,
    sequence: u64,
}

/// Hands out `(tick, sequence)` pairs that are strictly increasing in call
/// order. Every branch of [`Sequencer::advance`] runs under one lock.
pub(crate) struct Sequencer<C> {
    clock: C,
    epoch: DateTime<Utc>,
    resolution: Resolution,
    max_sequence: u64,
    max_tick: i64,
    policy: ClockPolicy,
    internals: Mutex<Internals>,
}

impl<C: Clock> Sequencer<C> {
    pub(crate) fn new(
        clock: C,
        epoch: DateTime<Utc>,
        resolution: Resolution,
        max_sequence: u64,
        max_tick: i64,
        policy: ClockPolicy,
    ) -> Self {
        Self {
            clock,
            epoch,
            resolution,
            max_sequence,
            max_tick,
            policy,
            internals: Mutex::new(Internals {
                last_tick: -1,
                sequence: 0,
            }),
        }
    }

    pub(crate) fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    fn current_tick(&self) -> Result<i64, Error> {
        let now = self.clock.now();
        let tick = self.resolution.ticks_between(self.epoch, now);
        if tick < 0 {
            return Err(Error::ClockBeforeEpoch(now));
        }
        Ok(tick)
    }

    /// Returns the next `(tick, sequence)` pair.
    ///
    /// When the sequence is exhausted within one tick the call waits for the
    /// clock to reach the next tick. When the clock reads earlier than the
    /// last recorded tick the configured [`ClockPolicy`] applies. A tick past
    /// `max_tick` fails with [`Error::OverTimeLimit`]. State is only written
    /// on the success path.
    pub(crate) fn advance(&self) -> Result<(i64, u64), Error> {
        let mut internals = self.internals.lock().map_err(|_| Error::MutexPoisoned)?;
        let mut exhausted = false;
        let mut regressed = false;

        loop {
            let current = self.current_tick()?;
            if current > self.max_tick {
                return Err(Error::OverTimeLimit);
            }
            match current.cmp(&internals.last_tick) {
                Ordering::Greater => {
                    internals.last_tick = current;
                    internals.sequence = 0;
                    return Ok((current, 0));
                }
                Ordering::Equal if internals.sequence < self.max_sequence => {
                    internals.sequence += 1;
                    return Ok((current, internals.sequence));
                }
                Ordering::Equal => {
                    if !exhausted {
                        exhausted = true;
                        debug!(tick = current, "sequence exhausted, waiting for next tick");
                    }
                    thread::yield_now();
                }
                Ordering::Less => {
                    if !regressed {
                        regressed = true;
                        warn!(
                            last = internals.last_tick,
                            current,
                            policy = ?self.policy,
                            "clock moved backwards"
                        );
                    }
                    match self.policy {
                        ClockPolicy::FailFast => {
                            return Err(Error::ClockMovedBackwards {
                                last: internals.last_tick,
                                current,
                            });
                        }
                        ClockPolicy::Stall => std::hint::spin_loop(),
                    }
                }
            }
        }
    }
}
