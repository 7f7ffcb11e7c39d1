use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// An event emitted by a module while executing a call.
///
/// The key names the event, the value carries its payload. Typed module events are
/// borsh-encoded into the value, see [`Event::from_typed`] and [`Event::decode`].
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Event {
    key: EventKey,
    value: EventValue,
}

impl Event {
    /// Creates an event whose value is the borsh encoding of `event`.
    pub fn from_typed<E: BorshSerialize>(key: &str, event: &E) -> Self {
        Self {
            key: EventKey(key.as_bytes().to_vec()),
            value: EventValue(event.try_to_vec().expect("Failed to serialize event")),
        }
    }

    /// The key of the event.
    pub fn key(&self) -> &EventKey {
        &self.key
    }

    /// Decodes the value of an event created with [`Event::from_typed`].
    pub fn decode<E: BorshDeserialize>(&self) -> Result<E, std::io::Error> {
        E::try_from_slice(&self.value.0)
    }
}

/// Key of an [`Event`].
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct EventKey(Vec<u8>);

impl EventKey {
    /// Raw bytes of the key.
    pub fn inner(&self) -> &Vec<u8> {
        &self.0
    }

    /// The key as UTF-8, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }
}

/// Value of an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct EventValue(Vec<u8>);
