use std::fmt;
use thiserror::Error;

use crate::event::ListenerError;

/// A listener failure recorded during an isolated dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    /// Name reported by the failing listener
    pub listener: String,
    pub error: ListenerError,
}

impl fmt::Display for ListenerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.listener, self.error)
    }
}

#[derive(Error, Debug)]
pub enum BusError {
    #[error("Invalid event key: '{0}'")]
    InvalidKey(String),

    #[error("Event key '{key}' is bound to {bound}, not {requested}")]
    TypeMismatch {
        key: String,
        bound: &'static str,
        requested: &'static str,
    },

    /// A listener failed under fail-stop dispatch; the error is passed through as-is.
    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("{} listener(s) failed for '{key}'", .failures.len())]
    ListenersFailed {
        key: String,
        failures: Vec<ListenerFailure>,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BusError {
    /// The listener error behind this failure, if a single listener caused it
    pub fn listener_error(&self) -> Option<&ListenerError> {
        match self {
            BusError::Listener(e) => Some(e),
            _ => None,
        }
    }
}
