//! Addresses: Base58-encoded 32-byte public keys.
//!
//! An address is the raw 32-byte key with no hashing step; the textual form
//! is the Base58 encoding of those bytes using the standard Bitcoin
//! alphabet (the `bs58` crate default). Program-derived addresses share the
//! same representation even though no private key exists for them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CodecError;

/// A 32-byte account or program address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// Encoded byte width of an address.
    pub const LEN: usize = 32;

    pub const fn new(bytes: [u8; 32]) -> Self {
        Address(bytes)
    }

    /// Decode the canonical Base58 textual form.
    ///
    /// Fails with [`CodecError::InvalidAddress`] if the string is not valid
    /// Base58 or does not decode to exactly 32 bytes.
    pub fn from_base58(text: &str) -> Result<Self, CodecError> {
        let bytes = bs58::decode(text)
            .into_vec()
            .map_err(|e| CodecError::InvalidAddress(format!("base58 decode failed: {e}")))?;

        let arr: [u8; 32] = bytes.try_into().map_err(|v: Vec<u8>| {
            CodecError::InvalidAddress(format!("expected 32 bytes, got {}", v.len()))
        })?;

        Ok(Address(arr))
    }

    /// The canonical Base58 textual form.
    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl FromStr for Address {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_base58(s)
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Address(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// The UI layer consumes decoded account state as JSON, so addresses
// serialize as their textual form rather than byte arrays.

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The system program is 32 zero bytes, which encodes to a string of
    /// base58 "1" digits.
    #[test]
    fn system_program_address() {
        let addr = Address::new([0u8; 32]);
        assert_eq!(addr.to_base58(), "11111111111111111111111111111111");
    }

    #[test]
    fn roundtrip_encode_decode() {
        // The SPL Token program.
        let text = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
        let addr = Address::from_base58(text).unwrap();
        assert_eq!(addr.to_base58(), text);
    }

    #[test]
    fn display_matches_to_base58() {
        let addr = Address::new([0xAB; 32]);
        assert_eq!(format!("{addr}"), addr.to_base58());
    }

    #[test]
    fn from_str_parses() {
        let addr: Address = "11111111111111111111111111111111".parse().unwrap();
        assert_eq!(addr, Address::new([0u8; 32]));
    }

    #[test]
    fn garbage_returns_error() {
        let result = Address::from_base58("not-a-valid-address!!!");
        assert!(matches!(result, Err(CodecError::InvalidAddress(_))));
    }

    #[test]
    fn too_short_returns_error() {
        // "1" decodes to a single zero byte, not 32 bytes.
        let result = Address::from_base58("1");
        assert!(matches!(result, Err(CodecError::InvalidAddress(_))));
    }

    #[test]
    fn serde_uses_base58_text() {
        let addr = Address::from_base58("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA\"");

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn serde_rejects_malformed_text() {
        let result: Result<Address, _> = serde_json::from_str("\"###\"");
        assert!(result.is_err());
    }
}
