use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use rand::{thread_rng, Rng};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::{accept_async, tungstenite::Message};

use meetup_maker_client::client::ClientConfig;

/// What the scripted server does with one inbound request.
#[allow(dead_code)]
pub enum Reply {
    Json(Value),
    /// Raw text frame, for feeding the client malformed traffic.
    Raw(String),
    /// Close the connection without answering.
    Close,
    Ignore,
}

type Script = Arc<dyn Fn(Value) -> Vec<Reply> + Send + Sync>;

/// In-process WebSocket server driven by a per-request script, so client
/// behavior can be exercised without a real backend.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn<F>(script: F) -> Self
    where
        F: Fn(Value) -> Vec<Reply> + Send + Sync + 'static,
    {
        Self::spawn_flaky(0, script).await
    }

    /// Drops the first `fail_first` connections before the handshake, to
    /// exercise the client's reconnect path.
    pub async fn spawn_flaky<F>(fail_first: usize, script: F) -> Self
    where
        F: Fn(Value) -> Vec<Reply> + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let script: Script = Arc::new(script);

        let handle = tokio::spawn(async move {
            let accepted = AtomicUsize::new(0);
            loop {
                let (stream, _) = listener.accept().await.unwrap();
                if accepted.fetch_add(1, Ordering::SeqCst) < fail_first {
                    drop(stream);
                    continue;
                }

                let script = Arc::clone(&script);
                tokio::spawn(async move {
                    let mut socket = match accept_async(stream).await {
                        Ok(socket) => socket,
                        Err(_) => return,
                    };

                    while let Some(Ok(message)) = socket.next().await {
                        let Message::Text(text) = message else {
                            continue;
                        };
                        let request: Value = serde_json::from_str(text.as_str()).unwrap();

                        for reply in script(request) {
                            match reply {
                                Reply::Json(value) => {
                                    socket.send(Message::text(value.to_string())).await.unwrap()
                                }
                                Reply::Raw(raw) => {
                                    socket.send(Message::text(raw)).await.unwrap()
                                }
                                Reply::Close => {
                                    let _ = socket.close(None).await;
                                    return;
                                }
                                Reply::Ignore => {}
                            }
                        }
                    }
                });
            }
        });

        Self { addr, handle }
    }

    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Client config pointed at the test server, with retries fast enough for
/// tests to observe reconnects.
pub fn config_for(server: &TestServer) -> ClientConfig {
    ClientConfig {
        address: server.url(),
        min_retry: Duration::from_millis(10),
        max_retry: Duration::from_millis(50),
        ..ClientConfig::default()
    }
}

#[allow(dead_code)]
pub fn generate_random_string(length: usize) -> String {
    let charset: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut rng = thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..charset.len());
            charset[idx] as char
        })
        .collect()
}
