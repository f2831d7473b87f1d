//! Domain layer: entities, value objects, errors, and the interfaces the
//! hub needs from the infrastructure layer (dependency inversion).

mod entity;
mod error;
mod pusher;
mod store;
mod value_object;

pub use entity::Room;
pub use error::{ClientIdError, MessagePushError, RegistryError};
pub use pusher::{ConnectedClient, MessagePusher, PusherChannel};
pub use store::StateStore;
pub use value_object::{ClientId, Timestamp};

#[cfg(test)]
pub use pusher::MockMessagePusher;
#[cfg(test)]
pub use store::MockStateStore;
