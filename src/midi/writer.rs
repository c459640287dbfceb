//! Standard MIDI File writer

use super::header;
use crate::compiler::event::TrackEvent;
use crate::error::{Error, Result};
use midly::num::{u24, u28, u4, u7};
use midly::{MetaMessage, MidiMessage, Smf, Track, TrackEventKind};
use std::path::Path;

/// Single-track MIDI writer.
///
/// Compiler events are range-checked and mapped onto a `midly` track as they
/// arrive; [`MidiWriter::finish`] closes the track and encodes the file.
#[derive(Debug, Clone)]
pub struct MidiWriter {
    track: Track<'static>,
    /// Ticks of rest not yet attached to a written event
    pending_delta: u32,
    channel: u4,
}

impl MidiWriter {
    pub fn new() -> Self {
        Self {
            track: Vec::new(),
            pending_delta: 0,
            channel: u4::new(0),
        }
    }

    /// Encode a whole event stream at 480 ticks per beat
    pub fn serialize(events: &[TrackEvent]) -> Result<Vec<u8>> {
        let mut writer = Self::new();
        for event in events {
            writer.write_event(event)?;
        }
        writer.finish()
    }

    /// Append one event
    pub fn write_event(&mut self, event: &TrackEvent) -> Result<()> {
        match *event {
            TrackEvent::Tempo { micros_per_beat } => self.write_tempo(0, micros_per_beat),
            TrackEvent::NoteOn {
                pitch,
                velocity,
                delta,
            } => {
                let (key, vel) = (note_key(pitch)?, note_velocity(velocity)?);
                self.write_message(delta, MidiMessage::NoteOn { key, vel })
            }
            TrackEvent::NoteOff {
                pitch,
                velocity,
                delta,
            } => {
                let (key, vel) = (note_key(pitch)?, note_velocity(velocity)?);
                self.write_message(delta, MidiMessage::NoteOff { key, vel })
            }
            TrackEvent::Rest { delta } => self.write_rest(delta),
        }
    }

    /// Write a set-tempo meta-event
    pub fn write_tempo(&mut self, delta: u32, micros_per_beat: u32) -> Result<()> {
        let tempo = u24::try_from(micros_per_beat).ok_or(Error::TempoOutOfRange {
            micros: micros_per_beat,
        })?;
        self.push(delta, TrackEventKind::Meta(MetaMessage::Tempo(tempo)))
    }

    /// Write a channel message on the writer's channel
    pub fn write_message(&mut self, delta: u32, message: MidiMessage) -> Result<()> {
        let channel = self.channel;
        self.push(delta, TrackEventKind::Midi { channel, message })
    }

    /// Advance time without writing an event
    pub fn write_rest(&mut self, delta: u32) -> Result<()> {
        self.pending_delta = self.add_pending(delta)?.as_int();
        Ok(())
    }

    fn add_pending(&self, delta: u32) -> Result<u28> {
        self.pending_delta
            .checked_add(delta)
            .and_then(u28::try_from)
            .ok_or(Error::DeltaOutOfRange {
                ticks: self.pending_delta.saturating_add(delta),
            })
    }

    /// Append an event, folding any pending rest into its delta
    fn push(&mut self, delta: u32, kind: TrackEventKind<'static>) -> Result<()> {
        let delta = self.add_pending(delta)?;
        self.track.push(midly::TrackEvent { delta, kind });
        self.pending_delta = 0;
        Ok(())
    }

    /// Terminate the track and return the complete file bytes
    pub fn finish(mut self) -> Result<Vec<u8>> {
        self.push(0, TrackEventKind::Meta(MetaMessage::EndOfTrack))?;

        let mut smf = Smf::new(header::single_track());
        smf.tracks.push(self.track);

        let mut data = Vec::new();
        smf.write_std(&mut data)?;
        Ok(data)
    }

    /// Encode the stream and write it to `path`
    pub fn write_file(events: &[TrackEvent], path: &Path) -> Result<()> {
        let data = Self::serialize(events)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

impl Default for MidiWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn note_key(pitch: i32) -> Result<u7> {
    u8::try_from(pitch)
        .ok()
        .and_then(u7::try_from)
        .ok_or(Error::PitchOutOfRange { pitch })
}

fn note_velocity(velocity: u8) -> Result<u7> {
    u7::try_from(velocity).ok_or(Error::VelocityOutOfRange { velocity })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: [u8; 14] = [b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0];

    #[test]
    fn test_empty_track() {
        let data = MidiWriter::serialize(&[]).unwrap();
        let mut expected = HEADER.to_vec();
        expected.extend_from_slice(b"MTrk");
        expected.extend_from_slice(&[0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00]);
        assert_eq!(data, expected);
    }

    #[test]
    fn test_tempo_and_notes() {
        let events = [
            TrackEvent::Tempo {
                micros_per_beat: 500_000,
            },
            TrackEvent::note_on(60, 64, 0),
            TrackEvent::note_off(60, 64, 480),
        ];
        let data = MidiWriter::serialize(&events).unwrap();
        let track = &data[22..];
        assert_eq!(&data[14..18], b"MTrk");
        assert_eq!(
            u32::from_be_bytes([data[18], data[19], data[20], data[21]]) as usize,
            track.len()
        );
        assert_eq!(
            track,
            &[
                0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // tempo 500000
                0x00, 0x90, 60, 64, // note on
                0x83, 0x60, 0x80, 60, 64, // note off after 480
                0x00, 0xFF, 0x2F, 0x00,
            ]
        );
    }

    #[test]
    fn test_rest_folds_into_next_delta() {
        let events = [
            TrackEvent::Rest { delta: 100 },
            TrackEvent::Rest { delta: 28 },
            TrackEvent::note_on(60, 64, 0),
            TrackEvent::Rest { delta: 5 },
        ];
        let data = MidiWriter::serialize(&events).unwrap();
        assert_eq!(
            &data[22..],
            &[0x81, 0x00, 0x90, 60, 64, 0x05, 0xFF, 0x2F, 0x00]
        );
    }

    #[test]
    fn test_chord_tones_parse_back() {
        let events = [
            TrackEvent::note_on(60, 64, 0),
            TrackEvent::note_on(64, 64, 0),
            TrackEvent::note_off(60, 64, 480),
            TrackEvent::note_off(64, 64, 0),
        ];
        let data = MidiWriter::serialize(&events).unwrap();
        let smf = Smf::parse(&data).unwrap();
        let notes: Vec<(u32, u8)> = smf.tracks[0]
            .iter()
            .filter_map(|e| match e.kind {
                TrackEventKind::Midi {
                    message: MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. },
                    ..
                } => Some((e.delta.as_int(), key.as_int())),
                _ => None,
            })
            .collect();
        assert_eq!(notes, vec![(0, 60), (0, 64), (480, 60), (0, 64)]);
    }

    #[test]
    fn test_pitch_out_of_range() {
        for pitch in [-1, 128, 300] {
            assert!(matches!(
                MidiWriter::serialize(&[TrackEvent::note_on(pitch, 64, 0)]),
                Err(Error::PitchOutOfRange { pitch: p }) if p == pitch
            ));
        }
    }

    #[test]
    fn test_velocity_out_of_range() {
        assert!(matches!(
            MidiWriter::serialize(&[TrackEvent::note_off(60, 128, 0)]),
            Err(Error::VelocityOutOfRange { velocity: 128 })
        ));
    }

    #[test]
    fn test_tempo_out_of_range() {
        assert!(matches!(
            MidiWriter::serialize(&[TrackEvent::Tempo {
                micros_per_beat: 20_000_000
            }]),
            Err(Error::TempoOutOfRange { .. })
        ));
    }

    #[test]
    fn test_delta_out_of_range() {
        let events = [
            TrackEvent::Rest { delta: 0x0FFF_FFFF },
            TrackEvent::note_on(60, 64, 1),
        ];
        assert!(matches!(
            MidiWriter::serialize(&events),
            Err(Error::DeltaOutOfRange { ticks: 0x1000_0000 })
        ));
    }
}
