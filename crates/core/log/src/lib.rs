mod console;
mod init;

pub use console::{ConsoleMakeWriter, ConsoleWriter, Sink};
pub use init::{filter_directive, init};
