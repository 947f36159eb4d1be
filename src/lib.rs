//! Decentralized, k-ordered unique id generators in the style of
//! [Twitter's Snowflake].
//!
//! Two engines are provided, each with its own clock and sequence state:
//!
//! - [`Snowflake`] packs a millisecond timestamp, a worker id and a sequence
//!   into a positive `i64` (41/10/12 bits by default).
//! - [`WideSnowflake`] packs a 100ns timestamp, a 48-bit worker id and a
//!   16-bit sequence into a UUID-shaped [`WideId`].
//!
//! Ids from one generator are unique and strictly increasing. Ids from
//! generators with different worker ids never collide, as long as the
//! worker ids are kept unique across the fleet.
//!
//! ## Quickstart
//!
//! ```
//! use flakeid::Snowflake;
//!
//! let sf = Snowflake::builder().worker_id(7u64).finalize().unwrap();
//! let next_id = sf.next_id().unwrap();
//! println!("{}", next_id);
//! ```
//!
//! ## Concurrent use
//!
//! Generators are thread-safe. `clone` one before moving it to another
//! thread; clones share state:
//! ```
//! use flakeid::WideSnowflake;
//! use std::thread;
//!
//! let sf = WideSnowflake::new().unwrap();
//!
//! let mut children = Vec::new();
//! for _ in 0..10 {
//!     let thread_sf = sf.clone();
//!     children.push(thread::spawn(move || {
//!         println!("{}", thread_sf.next_id().unwrap());
//!     }));
//! }
//!
//! for child in children {
//!     child.join().unwrap();
//! }
//! ```
//!
//! ## Clock moving backward
//!
//! By default a generator that sees the clock go back returns
//! [`Error::ClockMovedBackwards`] and leaves its state untouched; retrying is
//! up to the caller. [`ClockPolicy::Stall`] instead blocks until the clock
//! catches up, with no upper bound on the wait.
//!
//! ## String ids
//!
//! ```
//! use flakeid::{encoding, IdGenerator, Snowflake, StringIdGenerator};
//!
//! let ids = StringIdGenerator::with_encoder(Snowflake::new().unwrap(), encoding::base32);
//! for id in ids.iter().take(3) {
//!     println!("{}", id.unwrap());
//! }
//! ```
//!
//! ## Feature flags
//!
//! - `mac-address`: [`WorkerId::from_mac_address`] reads a hardware address.
//! - `uuid`: conversions between [`WideId`] and `uuid::Uuid`.
//!
//! [Twitter's Snowflake]: https://blog.twitter.com/2010/announcing-snowflake

mod builder;
mod clock;
pub mod encoding;
mod error;
mod generator;
mod sequencer;
mod snowflake;
mod string_id;
mod wide;
mod worker;

pub use crate::snowflake::*;
pub use builder::*;
pub use clock::{Clock, ClockPolicy, SystemClock};
pub use error::*;
pub use generator::*;
pub use string_id::*;
pub use wide::{WideId, WideSnowflake};
pub use worker::*;
