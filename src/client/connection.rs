use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use log::{error, info, warn};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::client::backoff::{BackoffPolicy, DoublingBackoff};
use crate::client::config::ClientConfig;
use crate::client::error::{ClientError, ClientResult};
use crate::client::message::types::request::ClientRequest;
use crate::client::pending_requests::{PendingRequest, PendingRequests};

const OUTBOUND_QUEUE_SIZE: usize = 10;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Owns the socket lifecycle: connects, reconnects with backoff, pumps
/// outbound requests onto the wire and inbound frames into the correlator.
///
/// Requests sent while the socket is down fail immediately with a transport
/// error; retry is the caller's decision.
#[derive(Debug)]
pub struct Connection {
    outbound: mpsc::Sender<String>,
    pending: Arc<PendingRequests>,
    connected: watch::Receiver<bool>,
    task: JoinHandle<()>,
}

impl Connection {
    pub fn connect(config: &ClientConfig) -> Self {
        Self::with_backoff(
            &config.address,
            Box::new(DoublingBackoff::new(config.min_retry, config.max_retry)),
        )
    }

    /// The backoff policy is injectable so the reconnect loop can be tested
    /// without real-time delays.
    pub fn with_backoff(address: &str, backoff: Box<dyn BackoffPolicy>) -> Self {
        let (outbound_tx, outbound_rx) = mpsc::channel::<String>(OUTBOUND_QUEUE_SIZE);
        let (state_tx, state_rx) = watch::channel(false);
        let pending = PendingRequests::new();

        let task = ConnectionTask {
            address: address.to_owned(),
            outbound: outbound_rx,
            pending: Arc::clone(&pending),
            state: state_tx,
            backoff,
        };

        Self {
            outbound: outbound_tx,
            pending,
            connected: state_rx,
            task: tokio::spawn(task.run()),
        }
    }

    pub fn is_connected(&self) -> bool {
        *self.connected.borrow()
    }

    /// Resolves once the socket is open.
    pub async fn wait_connected(&self) -> ClientResult<()> {
        let mut state = self.connected.clone();
        state
            .wait_for(|up| *up)
            .await
            .map_err(|_| ClientError::ChannelClosed)?;
        Ok(())
    }

    /// Serializes the request, registers it with the correlator and queues it
    /// for transmission. Registration happens before the send so a fast
    /// response cannot slip past its listener.
    pub async fn send<R: ClientRequest>(&self, request: &R) -> ClientResult<PendingRequest> {
        if !self.is_connected() {
            return Err(ClientError::ChannelClosed);
        }

        let text = serde_json::to_string(request)?;
        let pending = self.pending.register(request.uuid(), R::KIND);
        self.outbound
            .send(text)
            .await
            .map_err(|_| ClientError::ChannelClosed)?;

        Ok(pending)
    }

    pub fn pending(&self) -> &Arc<PendingRequests> {
        &self.pending
    }

    /// Tears the connection down and rejects anything still in flight.
    pub fn disconnect(self) {
        self.task.abort();
        self.pending.fail_all();
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // A PendingRequest handle holds its own Arc into the map and can
        // outlive this connection; reject it rather than leave it waiting.
        self.task.abort();
        self.pending.fail_all();
    }
}

struct ConnectionTask {
    address: String,
    outbound: mpsc::Receiver<String>,
    pending: Arc<PendingRequests>,
    state: watch::Sender<bool>,
    backoff: Box<dyn BackoffPolicy>,
}

impl ConnectionTask {
    async fn run(mut self) {
        loop {
            match connect_async(self.address.as_str()).await {
                Ok((socket, _)) => {
                    info!("Socket open: {}", self.address);
                    self.backoff.reset();
                    let _ = self.state.send(true);

                    let keep_running = self.serve(socket).await;

                    let _ = self.state.send(false);
                    self.pending.fail_all();
                    if !keep_running {
                        return;
                    }
                }
                Err(err) => {
                    warn!("Connecting to {} failed: {}", self.address, err);
                }
            }

            let delay = self.backoff.next_delay();
            info!("Reconnecting in {:?}", delay);
            let reconnect_at = tokio::time::Instant::now() + delay;
            loop {
                tokio::select! {
                    _ = tokio::time::sleep_until(reconnect_at) => break,
                    queued = self.outbound.recv() => match queued {
                        // Client handle dropped; stop reconnecting.
                        None => return,
                        // A send can race past the connected check just as
                        // the socket goes down. The frame cannot be
                        // delivered, and its registration must not outlive
                        // it, or the caller would wait forever.
                        Some(_) => {
                            warn!("Rejecting request queued while disconnected");
                            self.pending.fail_all();
                        }
                    }
                }
            }
        }
    }

    /// Pumps one established socket until it ends. Returns false when the
    /// client handle is gone and the task should exit for good.
    async fn serve(&mut self, socket: WsStream) -> bool {
        let (mut sink, mut stream) = socket.split();

        loop {
            tokio::select! {
                queued = self.outbound.recv() => match queued {
                    Some(text) => {
                        if let Err(err) = sink.send(Message::text(text)).await {
                            error!("Failed to write to the socket: {}", err);
                            return true;
                        }
                    }
                    None => return false,
                },
                inbound = stream.next() => match inbound {
                    Some(Ok(Message::Text(text))) => self.pending.dispatch(text.as_str()),
                    // Close and error are distinct transitions: both end the
                    // connection, but only the latter is a transport fault.
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Socket closed");
                        return true;
                    }
                    Some(Ok(_)) => {} // ping/pong/binary: nothing to correlate
                    Some(Err(err)) => {
                        error!("Socket error: {}", err);
                        return true;
                    }
                }
            }
        }
    }
}
