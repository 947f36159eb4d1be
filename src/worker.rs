use crate::error::Error;
use std::fmt;

#[cfg(feature = "mac-address")]
use pnet_datalink::MacAddr;

/// Length in bytes of a worker identifier.
pub const WORKER_ID_LEN: usize = 6;

/// A 48-bit worker identifier distinguishing one generator from another.
///
/// The bytes are stored big-endian: `bytes()[0]` is the most significant
/// byte and `bytes()[5]` the least significant one, so
/// `[0x01, 0x23, 0x45, 0x67, 0x89, 0xAB]` is the integer `0x0123456789AB`.
///
/// Uniqueness across a fleet is up to the operator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkerId([u8; WORKER_ID_LEN]);

impl WorkerId {
    /// Build a worker id from the 6 low-order bytes of `value`.
    /// The two high-order bytes are discarded.
    pub const fn from_u64(value: u64) -> Self {
        let b = value.to_be_bytes();
        Self([b[2], b[3], b[4], b[5], b[6], b[7]])
    }

    /// Build a worker id from big-endian bytes.
    ///
    /// Fewer than 6 bytes is rejected. More than 6 bytes is accepted only
    /// when the leading excess bytes are all zero.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < WORKER_ID_LEN {
            return Err(Error::WorkerIdTooShort(bytes.len()));
        }
        let (excess, low) = bytes.split_at(bytes.len() - WORKER_ID_LEN);
        if excess.iter().any(|&b| b != 0) {
            return Err(Error::WorkerIdOverflow(bytes.len()));
        }
        let mut out = [0u8; WORKER_ID_LEN];
        out.copy_from_slice(low);
        Ok(Self(out))
    }

    /// Use the hardware address of the first interface that is up and not a
    /// loopback as the worker id.
    ///
    /// The address is taken in transmission order, so its first octet is the
    /// most significant byte of the worker id.
    #[cfg(feature = "mac-address")]
    pub fn from_mac_address() -> Result<Self, Error> {
        let mac = pnet_datalink::interfaces()
            .into_iter()
            .filter(|iface| iface.is_up() && !iface.is_loopback())
            .find_map(|iface| iface.mac.filter(|mac| *mac != MacAddr::zero()))
            .ok_or(Error::NoMacAddress)?;
        tracing::trace!(%mac, "using hardware address as worker id");
        let MacAddr(a, b, c, d, e, f) = mac;
        Ok(Self([a, b, c, d, e, f]))
    }

    pub const fn bytes(&self) -> [u8; WORKER_ID_LEN] {
        self.0
    }

    /// The worker id as an integer in the range `0..2^48`.
    pub const fn as_u64(&self) -> u64 {
        let b = self.0;
        u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]])
    }

    /// Reduce the 48-bit id to `bits` bits by XOR-folding `bits`-wide chunks
    /// onto each other. Ids that already fit in `bits` bits are unchanged.
    pub(crate) fn fold(&self, bits: u8) -> u64 {
        let bits = u32::from(bits);
        let mut rest = self.as_u64();
        if bits >= 48 {
            return rest;
        }
        let mask = (1u64 << bits) - 1;
        let mut folded = 0;
        while rest != 0 {
            folded ^= rest & mask;
            rest >>= bits;
        }
        folded
    }
}

impl From<u64> for WorkerId {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<[u8; WORKER_ID_LEN]> for WorkerId {
    fn from(bytes: [u8; WORKER_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for WorkerId {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}-{b:02X}-{c:02X}-{d:02X}-{e:02X}-{g:02X}")
    }
}
