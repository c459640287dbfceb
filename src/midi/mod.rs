pub mod commands;
pub mod header;
pub mod json;
pub mod writer;

pub use commands::{MidiCommand, TimedCommand};
pub use json::MidiJson;
pub use writer::MidiWriter;
