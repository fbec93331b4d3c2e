//! TelecomMaster terminal client.
//!
//! A chat-style session UI for the TelecomMaster demo agent. The agent itself
//! lives behind a single backend endpoint; this crate only submits a message,
//! waits for the result, and renders the tickets the backend created.

pub mod api_client;
pub mod chat_tui;
pub mod config;
pub mod logging;
pub mod mock;
pub mod session;
