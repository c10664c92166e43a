use std::sync::Arc;

use dashmap::DashMap;
use log::debug;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::client::error::{ClientError, ClientResult};
use crate::client::message::kind::MessageKind;

type PendingKey = (String, MessageKind);

/// Correlates outgoing requests with inbound responses on the shared socket.
///
/// A response settles a request only when both its `uuid` and `type` match;
/// everything else on the socket is assumed to belong to another in-flight
/// request and is dropped. Removal from the map is what makes settlement
/// at-most-once: a duplicate response finds no entry and falls through.
#[derive(Debug, Default)]
pub struct PendingRequests {
    pending: DashMap<PendingKey, oneshot::Sender<Value>>,
}

impl PendingRequests {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers interest in the response for `(uuid, kind)`. Must happen
    /// before the request hits the wire so a fast response cannot race past.
    pub fn register(self: &Arc<Self>, uuid: &str, kind: MessageKind) -> PendingRequest {
        let (tx, rx) = oneshot::channel();
        let key = (uuid.to_owned(), kind);
        self.pending.insert(key.clone(), tx);

        PendingRequest {
            key,
            rx: Some(rx),
            owner: Arc::clone(self),
        }
    }

    /// Feeds one raw inbound frame through the correlator. Malformed frames
    /// and frames owned by nobody are dropped without surfacing an error.
    pub fn dispatch(&self, raw: &str) {
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(value) => value,
            Err(_) => {
                debug!("Dropping non-json frame");
                return;
            }
        };

        let uuid = match value.get("uuid").and_then(Value::as_str) {
            Some(uuid) => uuid.to_owned(),
            None => {
                debug!("Dropping frame without uuid");
                return;
            }
        };
        let kind = match value
            .get("type")
            .and_then(Value::as_i64)
            .and_then(|tag| MessageKind::try_from(tag).ok())
        {
            Some(kind) => kind,
            None => {
                debug!("Dropping frame without a recognized type tag");
                return;
            }
        };

        if let Some((_, tx)) = self.pending.remove(&(uuid, kind)) {
            // The receiver may already be torn down; that is not an error.
            let _ = tx.send(value);
        }
    }

    /// Rejects every pending request. Called by the connection owner when the
    /// socket closes or errors; dropping the senders wakes all waiters.
    pub fn fail_all(&self) {
        let count = self.pending.len();
        if count > 0 {
            debug!("Failing {} pending request(s)", count);
        }
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Handle for one in-flight request: pending until resolved by a matching
/// response or rejected by socket closure. Dropping the handle deregisters
/// the listener, so a late response has no observable effect.
#[derive(Debug)]
pub struct PendingRequest {
    key: PendingKey,
    rx: Option<oneshot::Receiver<Value>>,
    owner: Arc<PendingRequests>,
}

impl PendingRequest {
    /// Waits for the matching response. There is deliberately no timeout at
    /// this layer; callers wanting one wrap the future externally.
    pub async fn response(mut self) -> ClientResult<Value> {
        let rx = match self.rx.take() {
            Some(rx) => rx,
            None => return Err(ClientError::ChannelClosed),
        };

        rx.await.map_err(|_| ClientError::ChannelClosed)
    }
}

impl Drop for PendingRequest {
    fn drop(&mut self) {
        self.owner.pending.remove(&self.key);
    }
}
