//! In-memory stand-in for the browser shortcut engine.
//!
//! It follows the wrapped engine's documented behaviour closely enough to
//! exercise the facade: exact-string bindings, space-separated sequences with
//! a timeout, per-event-type matching, the default stop predicate and the
//! pause and record extensions. Time is always explicit so timeout scenarios
//! stay deterministic.

mod dom;
mod engine;
mod host;

pub use dom::{Element, KeyEvent};
pub use engine::MemoryEngine;
pub use host::{EngineOptions, MemoryHost};

pub use instant::Instant;
