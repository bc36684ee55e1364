//! Report delivery handlers.

mod delivery_dispatcher;

pub use delivery_dispatcher::{DeliveryDispatcher, DeliveryError};
