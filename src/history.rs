//! Records describing completed operations.
//!
//! Persisting them is left to the caller; this module only defines the
//! shape and serializes it.

use crate::dispatch::Algorithm;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Encrypt,
    Decrypt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRecord {
    #[serde(rename = "type")]
    kind: OperationKind,
    algorithm: Algorithm,
    input: String,
    output: String,
    timestamp: DateTime<Utc>,
}

impl OperationRecord {
    pub fn new(kind: OperationKind, algorithm: Algorithm, input: &str, output: &str) -> Self {
        Self {
            kind,
            algorithm,
            input: input.to_string(),
            output: output.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
