use crate::types::Capability;
use thiserror::Error;

/// Failures raised by the wrapped engine itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("engine call `{method}` failed: {message}")]
    Js {
        method: &'static str,
        message: String,
    },
    #[error("scope element cannot be attached: {0}")]
    InvalidScope(String),
    #[error("engine is not available: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MousetrapError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("engine was built without the {0} extension")]
    CapabilityUnavailable(Capability),
    #[error("query selector is empty")]
    EmptySelector,
    #[error("no element matches selector `{0}`")]
    NoElementForSelector(String),
    #[error("unknown event type `{0}`, expected keypress, keydown or keyup")]
    UnknownEventType(String),
    #[error("default handle has not been initialized")]
    DefaultNotInitialized,
    #[error("default handle is already initialized")]
    DefaultAlreadyInitialized,
    #[error("configuration was already loaded before the explicit one arrived")]
    ConfigAlreadyLoaded,
}
