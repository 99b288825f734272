// SPDX-License-Identifier: MIT
//
// Password scrambling.
//
// Keeps a password out of plain sight in source code or config. This is NOT
// encryption: anyone holding the key (or the binary) can reverse it.
//
// The key is MD5-hashed to 32 lowercase hex characters first, so two keys
// that differ in a single character produce unrelated XOR patterns. Each
// password byte is XORed with the hex digest, cycled, and the result is
// base64-encoded with the standard alphabet.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::Result;

fn xor_with_key(data: &[u8], key: &str) -> Vec<u8> {
    assert!(!key.is_empty(), "scramble key must not be empty");
    let digest = format!("{:x}", md5::compute(key.as_bytes()));
    data.iter()
        .zip(digest.as_bytes().iter().cycle())
        .map(|(byte, k)| byte ^ k)
        .collect()
}

/// Scramble `password` with `key`.
///
/// # Panics
///
/// Panics if `key` is empty.
///
/// ```
/// use tessera_term::scramble::{scramble_password, unscramble_password};
///
/// let stored = scramble_password("hunter2", "my app");
/// assert_ne!(stored, "hunter2");
/// assert_eq!(unscramble_password(&stored, "my app").unwrap(), "hunter2");
/// ```
#[must_use]
pub fn scramble_password(password: &str, key: &str) -> String {
    STANDARD.encode(xor_with_key(password.as_bytes(), key))
}

/// Reverse [`scramble_password`].
///
/// # Errors
///
/// Returns [`Error::Decode`](crate::Error::Decode) when `scrambled` is not
/// base64, and [`Error::Utf8`](crate::Error::Utf8) when the key does not
/// turn it back into text.
///
/// # Panics
///
/// Panics if `key` is empty.
pub fn unscramble_password(scrambled: &str, key: &str) -> Result<String> {
    let bytes = STANDARD.decode(scrambled)?;
    Ok(String::from_utf8(xor_with_key(&bytes, key))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn known_vector() {
        // md5("k") = 8ce4b16b22b58894aa86c421e8759df3; 'a' ^ '8' = 0x59 ('Y').
        let scrambled = scramble_password("a", "k");
        assert_eq!(STANDARD.decode(&scrambled).unwrap(), [b'a' ^ b'8']);
        assert_eq!(scrambled, "WQ==");
    }

    #[test]
    fn empty_password_scrambles_to_empty() {
        assert_eq!(scramble_password("", "key"), "");
        assert_eq!(unscramble_password("", "key").unwrap(), "");
    }

    #[test]
    fn different_keys_give_different_output() {
        assert_ne!(scramble_password("secret", "key1"), scramble_password("secret", "key2"));
    }

    #[test]
    fn malformed_base64_is_an_error() {
        assert!(matches!(unscramble_password("not base64!", "k"), Err(Error::Decode(_))));
    }

    #[test]
    fn wrong_key_can_yield_invalid_utf8() {
        let scrambled = STANDARD.encode([0xFFu8 ^ b'8']);
        assert!(matches!(unscramble_password(&scrambled, "k"), Err(Error::Utf8(_))));
    }

    #[test]
    #[should_panic(expected = "scramble key must not be empty")]
    fn empty_key_panics() {
        let _ = scramble_password("x", "");
    }

    proptest! {
        #[test]
        fn round_trip(password in "[ -~]{0,64}", key in "[ -~]{1,16}") {
            let scrambled = scramble_password(&password, &key);
            prop_assert_eq!(unscramble_password(&scrambled, &key).unwrap(), password);
        }
    }
}
