use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope delivered to listeners for every posted value
///
/// Holds the posted payload and the instant the envelope was created. One
/// envelope is built per `post` and dropped once dispatch returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventObject<T> {
    source: T,
    created_at: DateTime<Utc>,
}

impl<T> EventObject<T> {
    /// Wraps `source`, stamping the current wall-clock time
    pub fn new(source: T) -> Self {
        Self {
            source,
            created_at: Utc::now(),
        }
    }

    /// Wraps `source` with an explicit timestamp
    pub fn at(source: T, created_at: DateTime<Utc>) -> Self {
        Self { source, created_at }
    }

    /// The posted payload
    pub fn source(&self) -> &T {
        &self.source
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn into_source(self) -> T {
        self.source
    }
}
