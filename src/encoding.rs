//! Text encoders for 64-bit ids.
//!
//! Each encoder is a plain `fn(i64) -> String`, ready to hand to
//! [`StringIdGenerator`](crate::StringIdGenerator).

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHIJKLMNOPQRSTUV";
const BITS_PER_CHAR: u32 = 5;

/// Number of base32 digits needed for any `u64`.
pub const BASE32_WIDTH: usize = 13;

/// An encoder turning a 64-bit id into text.
pub type Encoder = fn(i64) -> String;

/// Encodes `value` in base32 using the digits `0-9A-V`, most significant
/// digit first.
///
/// Without padding the output has no leading zeros (0 is `"0"`). With
/// padding it is left-filled with `'0'` to [`BASE32_WIDTH`] characters,
/// which makes string order match numeric order.
pub fn encode32(value: u64, pad_left: bool) -> String {
    let mut buf = [b'0'; BASE32_WIDTH];
    let mut rest = value;
    let mut start = BASE32_WIDTH;
    loop {
        start -= 1;
        buf[start] = ALPHABET[(rest & 0x1F) as usize];
        rest >>= BITS_PER_CHAR;
        if rest == 0 {
            break;
        }
    }
    let digits = if pad_left { &buf[..] } else { &buf[start..] };
    // The alphabet is ASCII.
    digits.iter().map(|&b| char::from(b)).collect()
}

/// Signed decimal, e.g. `"5416969582936064"`.
pub fn decimal(id: i64) -> String {
    id.to_string()
}

/// Uppercase hexadecimal of the two's complement bits.
pub fn upper_hex(id: i64) -> String {
    format!("{id:X}")
}

/// Lowercase hexadecimal of the two's complement bits.
pub fn lower_hex(id: i64) -> String {
    format!("{id:x}")
}

/// Base32 without padding. See [`encode32`].
pub fn base32(id: i64) -> String {
    encode32(id as u64, false)
}

/// Base32 padded to 13 characters. See [`encode32`].
pub fn base32_padded(id: i64) -> String {
    encode32(id as u64, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode32_known_values() {
        let cases: [(u64, &str, &str); 6] = [
            (0, "0", "0000000000000"),
            (1, "1", "0000000000001"),
            (10, "A", "000000000000A"),
            (63, "1V", "000000000001V"),
            (64, "20", "0000000000020"),
            (0x7FFF_FFFF_FFFF_FFFF, "7VVVVVVVVVVVV", "7VVVVVVVVVVVV"),
        ];
        for (value, plain, padded) in cases {
            assert_eq!(encode32(value, false), plain, "value {value}");
            assert_eq!(encode32(value, true), padded, "value {value}");
        }
    }

    #[test]
    fn encode32_full_range() {
        assert_eq!(encode32(u64::MAX, false), "FVVVVVVVVVVVV");
        assert_eq!(encode32(u64::MAX, false).len(), BASE32_WIDTH);
    }

    #[test]
    fn padded_base32_sorts_like_numbers() {
        let values = [0u64, 31, 32, 1_000, 1 << 40, 1 << 62, u64::MAX];
        for pair in values.windows(2) {
            assert!(encode32(pair[0], true) < encode32(pair[1], true));
        }
    }

    #[test]
    fn hex_encoders() {
        assert_eq!(upper_hex(0x7f23_f22f_fcdf_fff1), "7F23F22FFCDFFFF1");
        assert_eq!(lower_hex(0x7f23_f22f_fcdf_ffc1), "7f23f22ffcdfffc1");
        assert_eq!(lower_hex(-1), "ffffffffffffffff");
    }
}
