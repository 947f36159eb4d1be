use chrono::prelude::*;

/// A source of wall-clock time.
///
/// Engines read the clock on every call and turn the reading into ticks
/// since their epoch. Implement this to feed simulated time in tests.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// What to do when the clock reads earlier than the last recorded tick.
///
/// The default is [`ClockPolicy::FailFast`]: the call returns
/// [`Error::ClockMovedBackwards`] and nothing is recorded.
///
/// [`Error::ClockMovedBackwards`]: crate::Error::ClockMovedBackwards
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClockPolicy {
    /// Reject the call with [`Error::ClockMovedBackwards`].
    ///
    /// [`Error::ClockMovedBackwards`]: crate::Error::ClockMovedBackwards
    #[default]
    FailFast,
    /// Busy-wait until the clock catches up with the last recorded tick.
    ///
    /// The wait has no upper bound: if the clock was set back by an hour,
    /// `generate` blocks for an hour while holding the engine's lock.
    Stall,
}

/// Length of one tick of an engine's timestamp field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
    Millis,
    /// 100 nanoseconds.
    HundredNanos,
}

impl Resolution {
    const fn nanos_per_tick(self) -> i64 {
        match self {
            Resolution::Millis => 1_000_000,
            Resolution::HundredNanos => 100,
        }
    }

    /// Whole ticks elapsed from `epoch` to `time`. Negative if `time` is
    /// before `epoch`.
    pub(crate) fn ticks_between(self, epoch: DateTime<Utc>, time: DateTime<Utc>) -> i64 {
        let delta = time.signed_duration_since(epoch);
        let per_tick = self.nanos_per_tick();
        let whole = delta.num_seconds().saturating_mul(1_000_000_000 / per_tick);
        let frac = i64::from(delta.subsec_nanos()).div_euclid(per_tick);
        whole.saturating_add(frac)
    }
}
