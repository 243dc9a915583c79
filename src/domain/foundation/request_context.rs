//! Request-scoped context passed explicitly to every handler.
//!
//! Carries the correlation and origin fields that end up on the handler's
//! tracing span. Handlers take it by value alongside their command so nothing
//! is read from ambient task-local state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for a single command or query invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Links every log line emitted while serving one caller request.
    correlation_id: String,

    /// Where the request came from (e.g. "http", "grpc", "scheduler").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl RequestContext {
    /// Creates a context with a freshly generated correlation id.
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4().to_string(),
            source: None,
        }
    }

    /// Builder: use a caller-supplied correlation id.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = id.into();
        self
    }

    /// Builder: record the request origin.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl RequestContext {
    /// Deterministic fixture for handler tests.
    pub fn test_fixture() -> Self {
        Self::new()
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}
