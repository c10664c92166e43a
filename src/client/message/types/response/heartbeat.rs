use serde::{Deserialize, Serialize};

use crate::client::message::kind::MessageKind;

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerHeartbeat {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub ok: bool,
    pub reason: Option<String>,
}
