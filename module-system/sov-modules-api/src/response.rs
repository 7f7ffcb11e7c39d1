/// Response type for the `Module::call` method.
///
/// Modules record their events on the working set, so a successful call carries no payload.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct CallResponse {}
