use serde::{Deserialize, Serialize};

use crate::client::message::kind::MessageKind;

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerSignup {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub ok: bool,
    pub reason: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerLogin {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub ok: bool,
    pub reason: Option<String>,
    pub token: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerToken {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub ok: bool,
    pub reason: Option<String>,
    pub first_name: Option<String>,
}
