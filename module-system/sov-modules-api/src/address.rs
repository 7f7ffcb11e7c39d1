use core::fmt;
use core::str::FromStr;

use bech32::{FromBase32, ToBase32, Variant};
use borsh::{BorshDeserialize, BorshSerialize};
use derive_more::{Display, Into};

use crate::error::Bech32ParseError;
use crate::BasicAddress;

const HRP: &str = "sov";

/// A validated bech32m string with the `sov` prefix and a 32 byte payload.
#[derive(
    serde::Serialize,
    serde::Deserialize,
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
    Debug,
    PartialEq,
    Clone,
    Eq,
    Into,
    Display,
)]
#[serde(try_from = "String", into = "String")]
#[display(fmt = "{}", "value")]
pub struct AddressBech32 {
    value: String,
}

/// A 32 bytes account address.
#[derive(PartialEq, Clone, Copy, Eq, PartialOrd, Ord, BorshDeserialize, BorshSerialize, Hash)]
pub struct Address {
    addr: [u8; 32],
}

impl Address {
    /// Creates a new address containing the given bytes
    pub const fn new(addr: [u8; 32]) -> Self {
        Self { addr }
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.addr
    }
}

impl From<[u8; 32]> for Address {
    fn from(addr: [u8; 32]) -> Self {
        Self { addr }
    }
}

impl FromStr for Address {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = AddressBech32::from_str(s)?;
        Ok(parsed.into())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", AddressBech32::from(self))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", AddressBech32::from(self))
    }
}

impl serde::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serde::Serialize::serialize(&AddressBech32::from(self), serializer)
        } else {
            serde::Serialize::serialize(&self.addr, serializer)
        }
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let address_bech32: AddressBech32 = serde::Deserialize::deserialize(deserializer)?;
            Ok(address_bech32.into())
        } else {
            let addr = <[u8; 32] as serde::Deserialize>::deserialize(deserializer)?;
            Ok(Address { addr })
        }
    }
}

// Addresses travel as bech32 strings in JSON, so that is what the schema describes.
impl schemars::JsonSchema for Address {
    fn schema_name() -> String {
        "Address".to_owned()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <String as schemars::JsonSchema>::json_schema(gen)
    }
}

impl BasicAddress for Address {}

fn encode_bech32m(bytes: &[u8], hrp: &str) -> Result<String, bech32::Error> {
    bech32::encode(hrp, bytes.to_base32(), Variant::Bech32m)
}

fn decode_bech32m(s: &str) -> Result<(String, Vec<u8>), Bech32ParseError> {
    let (hrp, data, variant) = bech32::decode(s)?;
    if variant != Variant::Bech32m {
        return Err(Bech32ParseError::Bech32(bech32::Error::InvalidChecksum));
    }
    Ok((hrp, Vec::<u8>::from_base32(&data)?))
}

impl From<&Address> for AddressBech32 {
    fn from(addr: &Address) -> Self {
        // 32 bytes under a three letter prefix never exceed the bech32 length limit.
        let value = encode_bech32m(&addr.addr, HRP).expect("Valid bech32m encoding");
        AddressBech32 { value }
    }
}

impl From<Address> for AddressBech32 {
    fn from(addr: Address) -> Self {
        AddressBech32::from(&addr)
    }
}

impl From<AddressBech32> for Address {
    fn from(addr: AddressBech32) -> Self {
        // Prefix, checksum and length were validated in `FromStr`.
        let (_, data) = decode_bech32m(&addr.value).expect("Validated bech32m address");
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&data);
        Address { addr: bytes }
    }
}

impl TryFrom<String> for AddressBech32 {
    type Error = Bech32ParseError;

    fn try_from(addr: String) -> Result<Self, Bech32ParseError> {
        AddressBech32::from_str(&addr)
    }
}

impl FromStr for AddressBech32 {
    type Err = Bech32ParseError;

    fn from_str(s: &str) -> Result<Self, Bech32ParseError> {
        let (hrp, data) = decode_bech32m(s)?;

        if hrp != HRP {
            return Err(Bech32ParseError::WrongHPR(hrp));
        }

        if data.len() != 32 {
            return Err(Bech32ParseError::InvalidLength(data.len()));
        }

        Ok(AddressBech32 {
            value: s.to_owned(),
        })
    }
}
