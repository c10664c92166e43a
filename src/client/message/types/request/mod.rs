pub mod auth;
pub mod heartbeat;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::message::kind::MessageKind;

pub fn make_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A client-originated envelope. Each request kind carries its own uuid and
/// type tag on the wire and knows the response shape it correlates with.
pub trait ClientRequest: Serialize {
    const KIND: MessageKind;
    type Response: DeserializeOwned;

    fn uuid(&self) -> &str;
}
