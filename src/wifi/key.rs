//! WEP key decoding.
//!
//! Sketches hand WEP keys over as ASCII hex ("ABADC0FFEE"); the SDK wants
//! the binary key. Keys with stray characters or half a trailing byte are
//! rejected instead of silently zero-filled.

/// Why a WEP key failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WepKeyError {
    /// Key has an odd number of hex digits.
    OddLength,
    /// Key contains a non-hex character.
    InvalidDigit,
    /// Decoded key does not fit the output buffer.
    TooLong,
}

impl core::fmt::Display for WepKeyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WepKeyError::OddLength => write!(f, "odd number of hex digits"),
            WepKeyError::InvalidDigit => write!(f, "invalid hex digit"),
            WepKeyError::TooLong => write!(f, "key too long"),
        }
    }
}

fn hex_value(byte: u8) -> Result<u8, WepKeyError> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        _ => Err(WepKeyError::InvalidDigit),
    }
}

/// Decode an ASCII-hex key into `out`, returning the decoded length.
pub fn decode_wep_key(key: &[u8], out: &mut [u8]) -> Result<usize, WepKeyError> {
    if key.len() % 2 != 0 {
        return Err(WepKeyError::OddLength);
    }
    let decoded_len = key.len() / 2;
    if decoded_len > out.len() {
        return Err(WepKeyError::TooLong);
    }

    for (slot, pair) in out.iter_mut().zip(key.chunks_exact(2)) {
        *slot = (hex_value(pair[0])? << 4) | hex_value(pair[1])?;
    }

    Ok(decoded_len)
}
