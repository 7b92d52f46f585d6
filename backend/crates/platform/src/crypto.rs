//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac, digest::Key};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Encode bytes as base64 (standard alphabet, padded)
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode standard base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Encode bytes as URL-safe base64 without padding (cookie and id safe)
pub fn to_base64url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode URL-safe, unpadded base64
pub fn from_base64url(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::URL_SAFE_NO_PAD.decode(s)
}

/// Compute HMAC-SHA256
///
/// The 32-byte key is zero-padded to the 64-byte block, which is exactly what
/// HMAC does with any key shorter than the block.
pub fn hmac_sha256(key: &[u8; 32], data: &[u8]) -> [u8; 32] {
    let mut key_block = Key::<Hmac<Sha256>>::default();
    key_block[..key.len()].copy_from_slice(key);

    let mut mac = <Hmac<Sha256> as Mac>::new(&key_block);
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_base64url_has_no_padding_or_unsafe_chars() {
        let encoded = to_base64url(&[0xfb, 0xff, 0xfe, 0x00]);
        assert!(!encoded.contains('='));
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        assert_eq!(from_base64url(&encoded).unwrap(), vec![0xfb, 0xff, 0xfe, 0x00]);
    }

    #[test]
    fn test_base64_decodes_session_secret() {
        let secret = [7u8; 32];
        assert_eq!(from_base64(&to_base64(&secret)).unwrap(), secret.to_vec());
    }

    #[test]
    fn test_hmac_known_value() {
        // A zero key pads to the same block as an empty key: HMAC-SHA256("", "")
        let key = [0u8; 32];
        let mac = hmac_sha256(&key, b"");
        let expected =
            hex::decode("b613679a0814d9ec772f95d778c35fc5ff1697c493715653c6c712144292c5ad")
                .unwrap();
        assert_eq!(mac.to_vec(), expected);
    }

    #[test]
    fn test_hmac_depends_on_key() {
        let data = b"session-id";
        assert_ne!(hmac_sha256(&[1u8; 32], data), hmac_sha256(&[2u8; 32], data));
        assert_eq!(hmac_sha256(&[1u8; 32], data), hmac_sha256(&[1u8; 32], data));
    }

    #[test]
    fn test_hmac_matches_slice_keyed_mac() {
        let key: [u8; 32] = std::array::from_fn(|i| i as u8 * 7 + 1);
        let data = b"3f2a9c1e-7b4d-4e8a-9c2f-1a2b3c4d5e6f";

        let mut reference = Hmac::<Sha256>::new_from_slice(&key).unwrap();
        reference.update(data);
        let expected: [u8; 32] = reference.finalize().into_bytes().into();

        assert_eq!(hmac_sha256(&key, data), expected);
    }

    #[test]
    fn test_constant_time_eq() {
        let a = [1u8, 2, 3, 4];
        let b = [1u8, 2, 3, 4];
        let c = [1u8, 2, 3, 5];
        assert!(constant_time_eq(&a, &b));
        assert!(!constant_time_eq(&a, &c));
        assert!(!constant_time_eq(&a, &b[..3]));
    }
}
