use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Closed set of failure categories a bridge call can end in.
///
/// The backend reports one of these alongside its message. Older backend
/// builds only send text, in which case [`classify_message`] recovers a kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    #[display("network_error")]
    Network,
    #[display("timeout_error")]
    Timeout,
    #[display("not_found")]
    NotFound,
    #[display("invalid_input")]
    InvalidInput,
    #[display("permission_denied")]
    PermissionDenied,
    #[display("conflict")]
    Conflict,
    #[display("cancelled")]
    Cancelled,
    #[display("internal_error")]
    Internal,
}

impl ErrorKind {
    /// The user-facing tag for this kind within a feature area.
    ///
    /// Connectivity and timeout problems keep their own tag everywhere; any
    /// other kind collapses into the feature's fallback (e.g.
    /// `update_check_failed`).
    pub fn tag(self, fallback: &'static str) -> &'static str {
        match self {
            Self::Network => "network_error",
            Self::Timeout => "timeout_error",
            _ => fallback,
        }
    }

    pub fn is_transient(self) -> bool {
        matches!(self, Self::Network | Self::Timeout)
    }
}

/// Error body returned by the bridge on a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

/// Best-effort classification of an unstructured backend message.
pub fn classify_message(message: &str) -> ErrorKind {
    let lowered = message.to_ascii_lowercase();

    if lowered.contains("timeout") || lowered.contains("timed out") {
        return ErrorKind::Timeout;
    }
    if ["network", "connection", "dns", "unreachable"]
        .iter()
        .any(|needle| lowered.contains(needle))
    {
        return ErrorKind::Network;
    }
    if lowered.contains("not found") || lowered.contains("no such file") {
        return ErrorKind::NotFound;
    }
    if lowered.contains("permission denied")
        || lowered.contains("access is denied")
    {
        return ErrorKind::PermissionDenied;
    }
    if lowered.contains("cancelled") || lowered.contains("canceled") {
        return ErrorKind::Cancelled;
    }
    ErrorKind::Internal
}
