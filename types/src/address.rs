//! Wallet address type with `0x` prefix, and the creator identity derived from it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// An Ethereum-style wallet address: `0x` followed by 40 hex digits.
///
/// Stored lowercase so that checksummed and plain spellings compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    /// The standard prefix for all wallet addresses.
    pub const PREFIX: &'static str = "0x";

    /// Number of hex digits after the prefix.
    pub const HEX_LEN: usize = 40;

    /// Parse and normalise a wallet address.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix(Self::PREFIX)
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| TypesError::InvalidAddress(raw.to_string()))?;
        if digits.len() != Self::HEX_LEN || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypesError::InvalidAddress(raw.to_string()));
        }
        Ok(Self(format!("{}{}", Self::PREFIX, digits.to_ascii_lowercase())))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WalletAddress {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<WalletAddress> for String {
    fn from(addr: WalletAddress) -> Self {
        addr.0
    }
}

/// Who is credited as the creator of verified content.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CreatorIdentity {
    /// The wallet connected at the time the result was produced.
    Wallet(WalletAddress),
    /// No wallet was connected.
    Anonymous,
}

impl CreatorIdentity {
    pub const ANONYMOUS: &'static str = "Anonymous";

    pub fn from_wallet(address: Option<WalletAddress>) -> Self {
        match address {
            Some(addr) => Self::Wallet(addr),
            None => Self::Anonymous,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

impl fmt::Display for CreatorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wallet(addr) => write!(f, "{addr}"),
            Self::Anonymous => f.write_str(Self::ANONYMOUS),
        }
    }
}

impl Serialize for CreatorIdentity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CreatorIdentity {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == Self::ANONYMOUS {
            return Ok(Self::Anonymous);
        }
        WalletAddress::parse(&raw)
            .map(Self::Wallet)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

    #[test]
    fn parse_normalises_case() {
        let addr = WalletAddress::parse(ADDR).unwrap();
        assert_eq!(addr.as_str(), "0x52908400098527886e0f7030069857d2e4169ee7");
        assert_eq!(addr, WalletAddress::parse(&ADDR.to_lowercase()).unwrap());
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(WalletAddress::parse("52908400098527886E0F7030069857D2E4169EE7").is_err());
        assert!(WalletAddress::parse("0x1234").is_err());
        assert!(WalletAddress::parse("0xZZ908400098527886E0F7030069857D2E4169EE7").is_err());
    }

    #[test]
    fn creator_display() {
        let wallet = CreatorIdentity::from_wallet(Some(WalletAddress::parse(ADDR).unwrap()));
        assert_eq!(wallet.to_string(), ADDR.to_lowercase());
        assert_eq!(CreatorIdentity::from_wallet(None).to_string(), "Anonymous");
    }

    #[test]
    fn creator_serde_uses_plain_string() {
        let json = serde_json::to_string(&CreatorIdentity::Anonymous).unwrap();
        assert_eq!(json, "\"Anonymous\"");
        let back: CreatorIdentity = serde_json::from_str(&json).unwrap();
        assert!(back.is_anonymous());
    }
}
