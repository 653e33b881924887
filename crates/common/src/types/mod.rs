use serde::{Deserialize, Serialize};

/// Body returned by the liveness probe.
pub const HELLO_MESSAGE: &str = "Backend connected successfully!";

/// `{ "message": ... }` envelope used for the liveness probe and every error response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn hello() -> Self {
        Self::new(HELLO_MESSAGE)
    }
}
