pub mod auth;
pub mod heartbeat;
