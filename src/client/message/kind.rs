use serde::{Deserialize, Serialize};

/// Wire-level message kind. Serialized as the bare integer discriminant,
/// matching the server's `IntEnum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum MessageKind {
    Invalid = -1,
    Signup = 0,
    Login = 1,
    Token = 2,
    Heartbeat = 3,
    CreateEvent = 4,
}

impl From<MessageKind> for i64 {
    fn from(kind: MessageKind) -> i64 {
        kind as i64
    }
}

impl TryFrom<i64> for MessageKind {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(MessageKind::Invalid),
            0 => Ok(MessageKind::Signup),
            1 => Ok(MessageKind::Login),
            2 => Ok(MessageKind::Token),
            3 => Ok(MessageKind::Heartbeat),
            4 => Ok(MessageKind::CreateEvent),
            other => Err(format!("unknown message kind: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&MessageKind::Login).unwrap(), "1");
        assert_eq!(serde_json::to_string(&MessageKind::Invalid).unwrap(), "-1");
    }

    #[test]
    fn deserializes_from_integer() {
        let kind: MessageKind = serde_json::from_str("2").unwrap();
        assert_eq!(kind, MessageKind::Token);
    }

    #[test]
    fn rejects_unknown_discriminant() {
        assert!(serde_json::from_str::<MessageKind>("17").is_err());
    }
}
