//! JSON serialization types for MIDI data

use super::commands::TimedCommand;
use super::header;
use crate::error::Result;
use midly::Smf;
use serde::Serialize;

/// Top-level JSON structure for a MIDI file
#[derive(Debug, Clone, Serialize)]
pub struct MidiJson {
    pub format: u16,
    /// Ticks per quarter note; absent for timecode-based files
    pub division: Option<u16>,
    pub tracks: Vec<TrackJson>,
}

/// JSON representation of one track chunk
#[derive(Debug, Clone, Serialize)]
pub struct TrackJson {
    /// Sum of all delta times
    pub total_ticks: u64,
    pub events: Vec<TimedCommand>,
}

impl MidiJson {
    /// Parse Standard MIDI File bytes
    pub fn parse(data: &[u8]) -> Result<Self> {
        let smf = Smf::parse(data)?;
        Ok(Self::from_smf(&smf))
    }

    /// Build the JSON view of a parsed file
    pub fn from_smf(smf: &Smf) -> Self {
        Self {
            format: header::format_code(smf.header.format),
            division: header::division(smf.header.timing),
            tracks: smf
                .tracks
                .iter()
                .map(|track| TrackJson::from(track.iter().map(TimedCommand::from).collect::<Vec<_>>()))
                .collect(),
        }
    }

    /// Events of every track, in file order
    pub fn events(&self) -> impl Iterator<Item = &TimedCommand> {
        self.tracks.iter().flat_map(|track| track.events.iter())
    }
}

impl From<Vec<TimedCommand>> for TrackJson {
    fn from(events: Vec<TimedCommand>) -> Self {
        Self {
            total_ticks: events.iter().map(|e| e.delta as u64).sum(),
            events,
        }
    }
}
