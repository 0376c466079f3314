//! Coffer-api: HTTP API layer for Coffer
//!
//! Provides a RESTful API for the frontend to interact with the fund core.

pub mod dto;
pub mod op_watcher;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::{AppState, SessionError, SessionState};
