#![doc = include_str!("../README.md")]

mod address;
pub mod default_context;
pub mod dispatch;
mod error;
mod prefix;
mod response;
pub mod utils;

use core::fmt::{Debug, Display};
use core::hash::Hash;

pub use address::{Address, AddressBech32};
use borsh::{BorshDeserialize, BorshSerialize};
pub use dispatch::{apply_call, apply_genesis, TransactionReceipt, TxEffect};
pub use error::{Bech32ParseError, Error};
pub use prefix::Prefix;
pub use response::CallResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
pub use sha2::Digest;
pub use sov_state::{
    Event, FileStorage, StateCheckpoint, StateMap, StateValue, Storage, WorkingSet,
};

/// The bounds every address type of the module system satisfies.
pub trait BasicAddress:
    Debug
    + Display
    + Clone
    + PartialEq
    + Eq
    + Hash
    + AsRef<[u8]>
    + From<[u8; 32]>
    + BorshSerialize
    + BorshDeserialize
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
}

/// The `Spec` trait configures the key primitives used by a particular instance of the module system.
/// `Spec` is almost always implemented on a Context object; since all Modules are generic
/// over a Context, swapping the Context swaps storage, hashing and addressing at once.
pub trait Spec {
    /// The Address type. Typically calculated as the hash of some identity.
    type Address: BasicAddress + Into<AddressBech32> + From<AddressBech32>;

    /// State storage backing the working sets.
    type Storage: Storage + Send + Sync;

    /// The preferred hasher, used to derive addresses.
    type Hasher: Digest<OutputSize = sha2::digest::consts::U32>;
}

/// A context contains information which is passed to modules during
/// call execution. Currently, context includes the sender of the call.
///
/// Modules never look the caller up from ambient state, it is always this explicit parameter.
pub trait Context: Spec + Clone + Debug + PartialEq + 'static {
    /// Sender of the call.
    fn sender(&self) -> &Self::Address;

    /// Constructor for the Context.
    fn new(sender: Self::Address) -> Self;
}

/// Every module implements this trait.
pub trait Module {
    /// Execution context.
    type Context: Context;

    /// Configuration for the genesis method.
    type Config;

    /// Module defined argument to the call method.
    type CallMessage: Debug + BorshSerialize + BorshDeserialize;

    /// Module defined event type, recorded in the working set.
    type Event: Debug + BorshSerialize + BorshDeserialize;

    /// Genesis is called once, when the module is deployed, to set initial state values.
    fn genesis(
        &self,
        _config: &Self::Config,
        _working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), Error> {
        Ok(())
    }

    /// Call allows interaction with the module and invokes state changes.
    /// It takes a module defined type and a context as parameters.
    fn call(
        &self,
        message: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<CallResponse, Error>;
}
