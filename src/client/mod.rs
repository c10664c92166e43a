pub mod backoff;
pub mod config;
pub mod connection;
pub mod cookies;
pub mod error;
pub mod message;
pub mod pending_requests;
pub mod session;

pub use config::ClientConfig;
pub use connection::Connection;
pub use error::{ClientError, ClientResult};

use crate::client::message::types::request::auth::{ClientLogin, ClientSignup, ClientToken};
use crate::client::message::types::request::heartbeat::ClientHeartbeat;
use crate::client::message::types::request::ClientRequest;

/// Successful credential exchange: the issued session token plus the first
/// name the dashboard greets with.
#[derive(Debug)]
pub struct LoginOk {
    pub token: String,
    pub first_name: String,
}

/// High-level typed operations over one shared connection. Each call is one
/// correlated request/response pair; `ok: false` surfaces as
/// [`ClientError::Refused`] with the server's reason.
#[derive(Debug)]
pub struct Client {
    connection: Connection,
}

impl Client {
    pub fn connect(config: &ClientConfig) -> Self {
        Self {
            connection: Connection::connect(config),
        }
    }

    pub fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub async fn wait_connected(&self) -> ClientResult<()> {
        self.connection.wait_connected().await
    }

    /// Creates an account; resolves with the issued session token.
    pub async fn signup(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<String> {
        let request = ClientSignup::new(first_name, last_name, email, password);
        let response = self.roundtrip(&request).await?;

        if !response.ok {
            return Err(refused(response.reason));
        }
        response
            .token
            .ok_or_else(|| ClientError::from("signup response missing token"))
    }

    /// Exchanges credentials for a session token.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginOk> {
        let request = ClientLogin::new(email, password);
        let response = self.roundtrip(&request).await?;

        if !response.ok {
            return Err(refused(response.reason));
        }
        Ok(LoginOk {
            token: response
                .token
                .ok_or_else(|| ClientError::from("login response missing token"))?,
            first_name: response
                .first_name
                .ok_or_else(|| ClientError::from("login response missing first_name"))?,
        })
    }

    /// Validates a previously issued token; resolves with the user's first
    /// name so the returning-user flow can greet them.
    pub async fn validate_token(&self, email: &str, token: &str) -> ClientResult<String> {
        let request = ClientToken::new(email, token);
        let response = self.roundtrip(&request).await?;

        if !response.ok {
            return Err(refused(response.reason));
        }
        response
            .first_name
            .ok_or_else(|| ClientError::from("token response missing first_name"))
    }

    /// Liveness check against the current session.
    pub async fn heartbeat(&self, token: &str) -> ClientResult<()> {
        let request = ClientHeartbeat::new(token);
        let response = self.roundtrip(&request).await?;

        if !response.ok {
            return Err(refused(response.reason));
        }
        Ok(())
    }

    pub fn disconnect(self) {
        self.connection.disconnect();
    }

    async fn roundtrip<R: ClientRequest>(&self, request: &R) -> ClientResult<R::Response> {
        let pending = self.connection.send(request).await?;
        let value = pending.response().await?;
        Ok(serde_json::from_value(value)?)
    }
}

fn refused(reason: Option<String>) -> ClientError {
    ClientError::Refused(reason.unwrap_or_else(|| "request refused".into()))
}
