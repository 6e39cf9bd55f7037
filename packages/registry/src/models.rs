//! # Registry domain models
//!
//! Read-only copies of the records owned by the land registry contract, and the
//! display records the pages derive from them.
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Address`] | A 20-byte account address. Displays as lowercase `0x` hex. |
//! | [`User`] | A registered participant as returned by `users(address)`. |
//! | [`Land`] | A parcel as returned by `lands(uint256)`, owner and registrar embedded. |
//! | [`LandRegistered`] / [`LandPurchased`] | Decoded contract events. |
//! | [`OwnedLand`], [`LandListing`], [`LandDetails`], [`HistoryEvent`] | Page-level projections. |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RegistryError;

/// Land identifiers start at 1; `0` means "no such land".
pub type LandId = u64;

/// Amounts in wei.
pub type Wei = u128;

/// Transaction hash as returned by the wallet (`0x`-prefixed hex).
pub type TxHash = String;

/// A 20-byte account address.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0; 20]);

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = RegistryError;

    /// Accepts 40 hex digits, with or without `0x`, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .strip_prefix("0x")
            .or_else(|| s.trim().strip_prefix("0X"))
            .unwrap_or(s.trim());
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| RegistryError::InvalidAddress(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A participant record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct User {
    pub user_address: Address,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// National ID number.
    pub aadhar: String,
    pub is_registered: bool,
}

/// Fields submitted by the register-user form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserRegistration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub aadhar: String,
}

/// A land parcel record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Land {
    pub owner: User,
    pub address_of_land: String,
    pub registered_by: User,
    /// Unix seconds.
    pub registry_date_and_time: u64,
    /// Square meters.
    pub area: u64,
    pub land_id: LandId,
    pub is_for_sale: bool,
    pub price: Wei,
}

/// `LandRegistered(uint256 indexed landId, address owner, string addressOfLand,
/// address registeredBy, uint256 registryDateAndTime, uint256 area)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LandRegistered {
    pub land_id: LandId,
    pub owner: Address,
    pub address_of_land: String,
    pub registered_by: Address,
    pub registry_date_and_time: u64,
    pub area: u64,
}

/// `LandPurchased(uint256 indexed landId, address oldOwner, address newOwner,
/// uint256 price, uint256 timestamp)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LandPurchased {
    pub land_id: LandId,
    pub old_owner: Address,
    pub new_owner: Address,
    pub price: Wei,
    pub timestamp: u64,
}

/// A land owned by the connected account, as shown on the sell page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedLand {
    pub id: LandId,
    pub address_of_land: String,
    pub area: u64,
    pub registry_date_and_time: String,
    pub is_for_sale: bool,
    /// ETH, `"0"` when not listed.
    pub price: String,
}

/// A land currently listed for sale, as shown on the buy page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LandListing {
    pub id: LandId,
    pub address_of_land: String,
    pub area: u64,
    pub owner_address: Address,
    pub owner_name: String,
    /// ETH
    pub price: String,
    pub price_wei: Wei,
}

/// Name and address of a party to a land record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Party {
    pub address: Address,
    pub name: String,
}

impl From<&User> for Party {
    fn from(user: &User) -> Self {
        Self {
            address: user.user_address,
            name: user.name.clone(),
        }
    }
}

/// Current state of a land, as shown on the history page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LandDetails {
    pub id: LandId,
    pub address_of_land: String,
    pub area: u64,
    pub owner: Party,
    pub registered_by: Party,
    pub registry_date_and_time: String,
    pub is_for_sale: bool,
    /// ETH, `"0"` when not listed.
    pub price: String,
}

/// One row of a land's ownership history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryEvent {
    Registration {
        timestamp: u64,
        owner: Address,
        registered_by: Address,
    },
    Purchase {
        timestamp: u64,
        old_owner: Address,
        new_owner: Address,
        price: Wei,
    },
}

impl HistoryEvent {
    pub fn timestamp(&self) -> u64 {
        match self {
            Self::Registration { timestamp, .. } | Self::Purchase { timestamp, .. } => *timestamp,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Registration { .. } => "Registration",
            Self::Purchase { .. } => "Purchase",
        }
    }
}

impl From<&LandRegistered> for HistoryEvent {
    fn from(event: &LandRegistered) -> Self {
        Self::Registration {
            timestamp: event.registry_date_and_time,
            owner: event.owner,
            registered_by: event.registered_by,
        }
    }
}

impl From<&LandPurchased> for HistoryEvent {
    fn from(event: &LandPurchased) -> Self {
        Self::Purchase {
            timestamp: event.timestamp,
            old_owner: event.old_owner,
            new_owner: event.new_owner,
            price: event.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_parses_mixed_case_with_and_without_prefix() {
        let a: Address = "0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap();
        let b: Address = "5fbdb2315678afecb367f032d93f642f64180aa3".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "0x5fbdb2315678afecb367f032d93f642f64180aa3");
    }

    #[test]
    fn address_rejects_wrong_length() {
        assert!("0x1234".parse::<Address>().is_err());
        assert!("not an address".parse::<Address>().is_err());
    }

    #[test]
    fn history_event_exposes_timestamp_and_kind() {
        let event = HistoryEvent::Purchase {
            timestamp: 42,
            old_owner: Address::ZERO,
            new_owner: Address([1; 20]),
            price: 5,
        };
        assert_eq!(event.timestamp(), 42);
        assert_eq!(event.kind(), "Purchase");
    }
}
