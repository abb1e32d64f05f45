use serde::Serialize;

/// Status code and metadata returned by a remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceResponse {
    pub status: u16,
    pub metadata: serde_json::Value,
}

impl ServiceResponse {
    #[must_use]
    pub const fn new(status: u16, metadata: serde_json::Value) -> Self {
        Self { status, metadata }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        is_http_success(self.status)
    }
}

/// Success is the half-open range `[200, 400)`: redirects
/// count, client and server errors do not.
#[must_use]
pub fn is_http_success(status: u16) -> bool {
    (200..400).contains(&status)
}
