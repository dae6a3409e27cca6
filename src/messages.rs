// Message types published by the runtime

use serde::{Deserialize, Serialize};

/// Notice published when a command request cannot be encoded
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandRejected {
    /// Command name, if the request carried one
    pub command: Option<String>,
    pub reason: String,
}

/// Health status published by runtime
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeHealth {
    Ok,
    StateStale,
    // Last controller record could not be decoded
    Desync,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&RuntimeHealth::StateStale).unwrap(),
            "\"state_stale\""
        );
    }
}
