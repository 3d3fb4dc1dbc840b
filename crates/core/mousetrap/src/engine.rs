//! The seam between the facade and the shortcut engine it wraps.
//!
//! An engine instance is already attached to a scope when it reaches the
//! facade. Key strings and event types are forwarded as given; matching,
//! sequence timeouts and the default stop predicate all live behind this
//! trait.

use crate::error::EngineError;
use crate::types::{Callback, EventType, Keys, RecordCallback};

pub trait KeyEngine {
    /// Raw input event handed to [`KeyEngine::stop_callback`].
    type Event;
    /// DOM element (or equivalent) an instance listens on.
    type Element;

    /// Register `callback` for every key string in `keys`. A key string that
    /// is already bound for the same event type is replaced.
    fn bind(
        &self,
        keys: &Keys,
        callback: Callback,
        event_type: Option<EventType>,
    ) -> Result<(), EngineError>;

    fn unbind(&self, keys: &Keys, event_type: Option<EventType>) -> Result<(), EngineError>;

    /// Fire the callback bound for exactly `keys` before returning.
    fn trigger(&self, keys: &str, event_type: Option<EventType>) -> Result<(), EngineError>;

    /// `true` suppresses the callback for `combo`.
    fn stop_callback(
        &self,
        event: &Self::Event,
        element: &Self::Element,
        combo: &str,
    ) -> Result<bool, EngineError>;

    /// Drop every binding. Listener attachment is left untouched.
    fn reset(&self) -> Result<(), EngineError>;

    fn pausable(&self) -> Option<&dyn Pausable> {
        None
    }

    fn recordable(&self) -> Option<&dyn Recordable> {
        None
    }
}

/// The pause/unpause extension.
pub trait Pausable {
    fn pause(&self) -> Result<(), EngineError>;
    fn unpause(&self) -> Result<(), EngineError>;
}

/// The record extension.
pub trait Recordable {
    /// Start a one-shot recording; `callback` runs once the user stops typing.
    fn record(&self, callback: RecordCallback) -> Result<(), EngineError>;
}

/// Environment the engine lives in: resolves selectors and attaches new
/// engine instances to elements.
pub trait Host {
    type Engine: KeyEngine;

    fn query_selector(
        &self,
        selector: &str,
    ) -> Result<Option<<Self::Engine as KeyEngine>::Element>, EngineError>;

    fn attach(
        &self,
        scope: &<Self::Engine as KeyEngine>::Element,
    ) -> Result<Self::Engine, EngineError>;

    /// The instance listening on the whole document.
    fn global(&self) -> Result<Self::Engine, EngineError>;
}
