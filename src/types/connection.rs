//! Chain connection lifecycle states

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessMode {
    /// No signing credential: decisions terminate at Simulated/Skipped.
    ReadOnly,
    /// Signing credential present: the decision engine may reach Executed.
    Funded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected(AccessMode),
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "disconnected"),
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Connected(AccessMode::ReadOnly) => write!(f, "connected (read-only)"),
            ConnectionState::Connected(AccessMode::Funded) => write!(f, "connected (funded)"),
        }
    }
}
