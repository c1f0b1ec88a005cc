// 🌐 Remote Collection - the CRUD service the roster mirrors
//
// The service is a black box: it assigns ids, re-validates everything, and
// answers either with the resource or with a failure. `HttpCollection` is the
// production implementation; tests plug in scripted ones.

pub mod http;

use crate::entities::{Agent, AgentId, CompensationUpdate, NewAgent};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

pub use http::HttpCollection;

// ============================================================================
// FIELD ERRORS
// ============================================================================

/// Per-field rejection messages returned by a failed create/update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors(BTreeMap::new())
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build from a JSON body like `{"name": ["too long"], "tenure": "bad"}`.
    ///
    /// Returns `None` for anything that is not a non-empty object.
    pub fn from_json(body: &Value) -> Option<Self> {
        let object = body.as_object()?;
        let mut errors = FieldErrors::new();

        for (field, messages) in object {
            match messages {
                Value::Array(items) => {
                    for item in items {
                        errors.insert(field.as_str(), json_text(item));
                    }
                }
                other => errors.insert(field.as_str(), json_text(other)),
            }
        }

        if errors.is_empty() {
            None
        } else {
            Some(errors)
        }
    }
}

fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `name: too long, required; tenure: bad`
impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CollectionError {
    /// The service refused the payload (distinguishable validation status)
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("agent not found")]
    NotFound,

    /// Any other non-success answer
    #[error("request failed with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// Connection, timeout or decoding failure
    #[error("{0}")]
    Transport(String),
}

impl CollectionError {
    /// The service's own message when it sent one, otherwise the error text.
    pub fn server_message(&self) -> String {
        match self {
            CollectionError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            CollectionError::Validation(fields) => fields.to_string(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// COLLECTION TRAIT
// ============================================================================

#[async_trait]
pub trait RemoteCollection: Send + Sync {
    /// Ordered list of every agent
    async fn list(&self) -> Result<Vec<Agent>, CollectionError>;

    async fn get(&self, id: AgentId) -> Result<Agent, CollectionError>;

    /// Create an agent; the returned one carries the assigned id
    async fn create(&self, agent: &NewAgent) -> Result<Agent, CollectionError>;

    /// Partial update of the compensation field
    async fn update(
        &self,
        id: AgentId,
        change: &CompensationUpdate,
    ) -> Result<Agent, CollectionError>;

    async fn delete(&self, id: AgentId) -> Result<(), CollectionError>;
}
