mod map;
mod value;

pub use map::StateMap;
pub use value::{Error as StateValueError, StateValue};
