//! Order-preserving key encoding. Encoded keys sort bytewise in the same order as the key
//! attribute values they encode, so a BTreeMap over them scans in key order.

use crate::{
    error::{Error, Result},
    store_client::AttributeValue
};

const TAG_BINARY: u8 = 0x01;
const TAG_NUMBER: u8 = 0x02;
const TAG_STRING: u8 = 0x03;

/// Encodes a byte vector. 0x00 is escaped as 0x00 0xff, and the value is terminated by
/// 0x00 0x00, so shorter values sort before longer values sharing their prefix.
pub fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(bytes.len() + 2);
    for byte in bytes {
        match byte {
            0x00 => encoded.extend([0x00, 0xff]),
            b => encoded.push(*b),
        }
    }
    encoded.extend([0x00, 0x00]);
    encoded
}

/// Encodes an f64. The sign bit is flipped for positive numbers and all bits are flipped for
/// negative numbers, making the big-endian bytes sort numerically.
pub fn encode_f64(n: f64) -> [u8; 8] {
    let mut bytes = n.to_be_bytes();
    if (bytes[0] >> 7) & 1 == 0 {
        bytes[0] ^= 1 << 7;
    } else {
        bytes.iter_mut().for_each(|b| *b = !*b);
    }
    bytes
}

/// Encodes a key attribute value: a type tag, then the value. Numbers sort numerically.
pub fn encode_key_value(value: &AttributeValue) -> Result<Vec<u8>> {
    match value {
        AttributeValue::B(b) => Ok([&[TAG_BINARY][..], &encode_bytes(b)].concat()),
        AttributeValue::N(n) => {
            let number = n
                .parse::<f64>()
                .map_err(|err| Error::Value(format!("Invalid number {}: {}", n, err)))?;
            if number.is_nan() {
                return Err(Error::Value(format!("Invalid number {}", n)));
            }
            // Normalize -0 so it encodes like 0.
            Ok([&[TAG_NUMBER][..], &encode_f64(number + 0.0)].concat())
        }
        AttributeValue::S(s) => Ok([&[TAG_STRING][..], &encode_bytes(s.as_bytes())].concat()),
        v => Err(Error::Value(format!("Can't encode {:?} as a key", v))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bytes() {
        assert_eq!(vec![0x00, 0x00], encode_bytes(&[]));
        assert_eq!(vec![0x01, 0x00, 0xff, 0x02, 0x00, 0x00], encode_bytes(&[0x01, 0x00, 0x02]));
    }

    #[test]
    fn strings_sort_lexicographically() -> Result<()> {
        let keys = ["", "a", "aa", "ab", "b", "lock-10", "lock-9"];
        let encoded = keys
            .iter()
            .map(|k| encode_key_value(&AttributeValue::S(k.to_string())))
            .collect::<Result<Vec<_>>>()?;
        let mut sorted = encoded.clone();
        sorted.sort();
        assert_eq!(encoded, sorted);
        Ok(())
    }

    #[test]
    fn numbers_sort_numerically() -> Result<()> {
        let numbers = ["-10", "-1.5", "0", "2", "9", "10", "1e3"];
        let encoded = numbers
            .iter()
            .map(|n| encode_key_value(&AttributeValue::N(n.to_string())))
            .collect::<Result<Vec<_>>>()?;
        let mut sorted = encoded.clone();
        sorted.sort();
        assert_eq!(encoded, sorted);
        assert_eq!(
            encode_key_value(&AttributeValue::N("0".into()))?,
            encode_key_value(&AttributeValue::N("-0".into()))?
        );
        Ok(())
    }

    #[test]
    fn invalid() {
        for value in [
            AttributeValue::N("x".into()),
            AttributeValue::N("NaN".into()),
            AttributeValue::Bool(true),
        ] {
            assert!(matches!(encode_key_value(&value), Err(Error::Value(_))));
        }
    }
}
