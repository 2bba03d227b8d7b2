//! Base-58 codec over big-endian byte buffers.
//!
//! The magnitude of the input is converted with plain long arithmetic on a
//! byte buffer: repeated division by 58 to encode, multiply-by-58-and-add to
//! decode. Leading zero bytes carry no magnitude, so each one is written as a
//! leading `'1'` and read back the same way.

use crate::error::{FormatError, Result};

/// The 58 symbols, in digit order. `0`, `O`, `I` and `l` are excluded.
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const INVALID: u8 = 0xff;

/// ASCII code point to digit value, `INVALID` for anything outside the alphabet.
const DIGIT_VALUES: [u8; 128] = {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Encodes bytes as base-58, one `'1'` per leading zero byte.
///
/// Empty and all-zero inputs have no magnitude digits, so `[]` encodes to `""`
/// and `[0, 0]` to `"11"`.
pub fn encode_base58(bytes: &[u8]) -> String {
    let zeros = bytes.iter().take_while(|&&b| b == 0).count();

    // Digits come out least significant first and are reversed at the end.
    let mut digits: Vec<u8> = Vec::with_capacity(bytes.len() * 138 / 100 + 1);
    let mut magnitude = bytes[zeros..].to_vec();
    let mut start = 0;

    while start < magnitude.len() {
        let mut remainder = 0u32;
        for byte in &mut magnitude[start..] {
            let acc = (remainder << 8) | u32::from(*byte);
            *byte = (acc / 58) as u8;
            remainder = acc % 58;
        }
        digits.push(ALPHABET[remainder as usize]);

        while start < magnitude.len() && magnitude[start] == 0 {
            start += 1;
        }
    }

    digits.extend(std::iter::repeat(ALPHABET[0]).take(zeros));
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

/// Decodes a base-58 string, restoring one zero byte per leading `'1'`.
///
/// Fails on the first character outside the alphabet, non-ASCII included.
pub fn decode_base58(text: &str) -> Result<Vec<u8>> {
    // Little-endian while accumulating.
    let mut magnitude: Vec<u8> = Vec::with_capacity(text.len() * 733 / 1000 + 1);

    for (position, character) in text.chars().enumerate() {
        let digit = digit_value(character).ok_or(FormatError::Base58 {
            character,
            position,
        })?;

        let mut carry = u32::from(digit);
        for byte in &mut magnitude {
            carry += u32::from(*byte) * 58;
            *byte = carry as u8;
            carry >>= 8;
        }
        while carry > 0 {
            magnitude.push(carry as u8);
            carry >>= 8;
        }
    }

    let ones = text.bytes().take_while(|&b| b == ALPHABET[0]).count();

    let mut bytes = vec![0u8; ones];
    bytes.extend(magnitude.iter().rev());
    Ok(bytes)
}

#[inline]
fn digit_value(character: char) -> Option<u8> {
    if !character.is_ascii() {
        return None;
    }
    match DIGIT_VALUES[character as usize] {
        INVALID => None,
        value => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_hex, encode_hex};
    use crate::error::Error;
    use rand::{Rng, RngCore};

    const ALPHABET_HEX: &str =
        "000111D38E5FC9071FFCD20B4A763CC9AE4F252BB4E48FD66A835E252ADA93FF480D6DD43DC62A641155A5";

    #[test]
    fn test_zero_address_roundtrip() {
        let text = "1111111111111111111114oLvT2";
        let bytes = decode_base58(text).unwrap();
        assert_eq!(bytes.len(), 25);
        assert!(bytes[..21].iter().all(|&b| b == 0));
        assert_eq!(encode_base58(&bytes), text);
    }

    #[test]
    fn test_alphabet_to_hex() {
        let text = std::str::from_utf8(ALPHABET).unwrap();
        let bytes = decode_base58(text).unwrap();
        assert_eq!(encode_hex(&bytes), ALPHABET_HEX);
    }

    #[test]
    fn test_hex_to_alphabet() {
        let bytes = decode_hex(ALPHABET_HEX).unwrap();
        assert_eq!(encode_base58(&bytes).as_bytes(), &ALPHABET[..]);
    }

    #[test]
    fn test_empty_and_zero_inputs() {
        assert_eq!(encode_base58(&[]), "");
        assert_eq!(encode_base58(&[0]), "1");
        assert_eq!(encode_base58(&[0, 0, 0]), "111");

        assert!(decode_base58("").unwrap().is_empty());
        assert_eq!(decode_base58("1").unwrap(), vec![0]);
        assert_eq!(decode_base58("1111").unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_small_values() {
        assert_eq!(encode_base58(&[57]), "z");
        assert_eq!(encode_base58(&[58]), "21");
        assert_eq!(encode_base58(&[0, 58]), "121");
        assert_eq!(decode_base58("21").unwrap(), vec![58]);
        assert_eq!(decode_base58("5R").unwrap(), vec![0x01, 0x00]);
        assert_eq!(encode_base58(&[0x01, 0x00]), "5R");
    }

    #[test]
    fn test_invalid_characters() {
        for (text, bad, position) in [
            ("10", '0', 1),
            ("O", 'O', 0),
            ("1I1", 'I', 1),
            ("abl", 'l', 2),
            ("1 2", ' ', 1),
            ("1é", 'é', 1),
        ] {
            match decode_base58(text) {
                Err(Error::Format(FormatError::Base58 {
                    character,
                    position: at,
                })) => {
                    assert_eq!(character, bad, "input {:?}", text);
                    assert_eq!(at, position, "input {:?}", text);
                }
                other => panic!("expected base-58 format error for {:?}, got {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_random_roundtrips_keep_padding() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let zeros = rng.gen_range(0..4);
            let len = rng.gen_range(0..40);
            let mut bytes = vec![0u8; zeros + len];
            rng.fill_bytes(&mut bytes[zeros..]);

            let encoded = encode_base58(&bytes);
            let leading_zero_bytes = bytes.iter().take_while(|&&b| b == 0).count();
            let leading_ones = encoded.bytes().take_while(|&b| b == b'1').count();
            assert_eq!(leading_ones, leading_zero_bytes);
            assert_eq!(decode_base58(&encoded).unwrap(), bytes);
        }
    }

    #[test]
    fn test_text_roundtrip() {
        for text in ["", "1", "11z", "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH", "zzzz", "2"] {
            assert_eq!(encode_base58(&decode_base58(text).unwrap()), text);
        }
    }
}
