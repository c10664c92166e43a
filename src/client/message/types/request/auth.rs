use serde::{Deserialize, Serialize};

use crate::client::message::kind::MessageKind;
use crate::client::message::types::response::auth::{ServerLogin, ServerSignup, ServerToken};

use super::{make_uuid, ClientRequest};

#[derive(Debug, Serialize, Deserialize)]
pub struct ClientSignup {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl ClientSignup {
    pub fn new(first_name: &str, last_name: &str, email: &str, password: &str) -> Self {
        Self {
            uuid: make_uuid(),
            kind: MessageKind::Signup,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl ClientRequest for ClientSignup {
    const KIND: MessageKind = MessageKind::Signup;
    type Response = ServerSignup;

    fn uuid(&self) -> &str {
        &self.uuid
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClientLogin {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub email: String,
    pub password: String,
}

impl ClientLogin {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            uuid: make_uuid(),
            kind: MessageKind::Login,
            email: email.into(),
            password: password.into(),
        }
    }
}

impl ClientRequest for ClientLogin {
    const KIND: MessageKind = MessageKind::Login;
    type Response = ServerLogin;

    fn uuid(&self) -> &str {
        &self.uuid
    }
}

/// Validation of a previously issued session token (the returning-user flow).
#[derive(Debug, Serialize, Deserialize)]
pub struct ClientToken {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub email: String,
    pub token: String,
}

impl ClientToken {
    pub fn new(email: &str, token: &str) -> Self {
        Self {
            uuid: make_uuid(),
            kind: MessageKind::Token,
            email: email.into(),
            token: token.into(),
        }
    }
}

impl ClientRequest for ClientToken {
    const KIND: MessageKind = MessageKind::Token;
    type Response = ServerToken;

    fn uuid(&self) -> &str {
        &self.uuid
    }
}
