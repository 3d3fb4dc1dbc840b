mod default;
mod error;
mod handle;
mod types;

pub mod engine;

pub use default::DefaultHandle;
pub use engine::{Host, KeyEngine, Pausable, Recordable};
pub use error::{EngineError, MousetrapError};
pub use handle::Mousetrap;
pub use types::{Callback, Capabilities, Capability, EventType, Keys, RecordCallback};
