//! Browser backend: binds the facade to the JS `Mousetrap` object.
//!
//! The engine script (and optionally its pause and record plugins) must be
//! loaded before any handle is created.

mod bindings;
mod engine;
mod global;
mod host;

pub use engine::WebEngine;
pub use global::{
    bind, bind_event, bind_multi, bind_multi_event, capabilities, capabilities_js,
    create_default_with, init, init_js, init_with, pause, record, reset, stop_callback, trigger,
    trigger_type, unbind, unpause, with_default,
};
pub use host::WebHost;
