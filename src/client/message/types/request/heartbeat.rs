use serde::{Deserialize, Serialize};

use crate::client::message::kind::MessageKind;
use crate::client::message::types::response::heartbeat::ServerHeartbeat;

use super::{make_uuid, ClientRequest};

#[derive(Debug, Serialize, Deserialize)]
pub struct ClientHeartbeat {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub token: String,
}

impl ClientHeartbeat {
    pub fn new(token: &str) -> Self {
        Self {
            uuid: make_uuid(),
            kind: MessageKind::Heartbeat,
            token: token.into(),
        }
    }
}

impl ClientRequest for ClientHeartbeat {
    const KIND: MessageKind = MessageKind::Heartbeat;
    type Response = ServerHeartbeat;

    fn uuid(&self) -> &str {
        &self.uuid
    }
}
