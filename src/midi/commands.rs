//! Serializable view of parsed MIDI track events

use midly::{MetaMessage, MidiMessage, TrackEvent, TrackEventKind};
use serde::Serialize;

/// A parsed track event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MidiCommand {
    NoteOff { channel: u8, key: u8, velocity: u8 },
    NoteOn { channel: u8, key: u8, velocity: u8 },
    PolyPressure { channel: u8, key: u8, pressure: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    ProgramChange { channel: u8, program: u8 },
    ChannelPressure { channel: u8, pressure: u8 },
    PitchBend { channel: u8, value: u16 },
    /// Set tempo meta-event
    Tempo { micros_per_beat: u32 },
    /// Track name meta-event
    TrackName { name: String },
    /// End of track meta-event
    EndOfTrack,
    /// Any other meta-event, in `midly`'s debug notation
    Meta { description: String },
    /// System exclusive message (body skipped)
    SysEx { length: u32 },
}

/// A command with its delta time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimedCommand {
    pub delta: u32,
    #[serde(flatten)]
    pub command: MidiCommand,
}

impl MidiCommand {
    pub fn is_note_on(&self) -> bool {
        matches!(self, Self::NoteOn { .. })
    }

    fn from_message(channel: u8, message: MidiMessage) -> Self {
        match message {
            MidiMessage::NoteOff { key, vel } => Self::NoteOff {
                channel,
                key: key.as_int(),
                velocity: vel.as_int(),
            },
            MidiMessage::NoteOn { key, vel } => Self::NoteOn {
                channel,
                key: key.as_int(),
                velocity: vel.as_int(),
            },
            MidiMessage::Aftertouch { key, vel } => Self::PolyPressure {
                channel,
                key: key.as_int(),
                pressure: vel.as_int(),
            },
            MidiMessage::Controller { controller, value } => Self::ControlChange {
                channel,
                controller: controller.as_int(),
                value: value.as_int(),
            },
            MidiMessage::ProgramChange { program } => Self::ProgramChange {
                channel,
                program: program.as_int(),
            },
            MidiMessage::ChannelAftertouch { vel } => Self::ChannelPressure {
                channel,
                pressure: vel.as_int(),
            },
            MidiMessage::PitchBend { bend } => Self::PitchBend {
                channel,
                value: bend.0.as_int(),
            },
        }
    }
}

impl From<TrackEventKind<'_>> for MidiCommand {
    fn from(kind: TrackEventKind<'_>) -> Self {
        match kind {
            TrackEventKind::Midi { channel, message } => {
                Self::from_message(channel.as_int(), message)
            }
            TrackEventKind::SysEx(data) | TrackEventKind::Escape(data) => Self::SysEx {
                length: data.len() as u32,
            },
            TrackEventKind::Meta(MetaMessage::Tempo(micros)) => Self::Tempo {
                micros_per_beat: micros.as_int(),
            },
            TrackEventKind::Meta(MetaMessage::TrackName(name)) => Self::TrackName {
                name: String::from_utf8_lossy(name).into_owned(),
            },
            TrackEventKind::Meta(MetaMessage::EndOfTrack) => Self::EndOfTrack,
            TrackEventKind::Meta(meta) => Self::Meta {
                description: format!("{:?}", meta),
            },
        }
    }
}

impl From<&TrackEvent<'_>> for TimedCommand {
    fn from(event: &TrackEvent<'_>) -> Self {
        Self {
            delta: event.delta.as_int(),
            command: MidiCommand::from(event.kind),
        }
    }
}
