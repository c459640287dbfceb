//! Chord compiler - turns a chord timeline into MIDI track events
//!
//! The pipeline is strictly downward: the timeline is scanned into a
//! [`grid::Grid`], each beat decision is looked up in the
//! [`vocabulary`] and transposed by the [`key`] offset, and the resulting
//! [`event::TrackEvent`] stream is handed to [`crate::midi::MidiWriter`].

pub mod event;
pub mod grid;
pub mod key;
pub mod vocabulary;

use crate::error::{Error, Result};
use crate::midi::{header::TICKS_PER_BEAT, MidiWriter};
use event::{tempo_from_bpm, TrackEvent};
use grid::{Bar, BeatDecision, Grid, Timeline};
use log::{info, warn};
use std::path::Path;

/// Beats assumed per duration unit when scaling note length by bar length
pub const BEATS_PER_DURATION_UNIT: u32 = 4;

/// Default note-on/note-off velocity for chord tones
pub const DEFAULT_VELOCITY: u8 = 64;

/// Pitches released by a rest filler (C4 to B4)
pub const REST_FILLER_PITCHES: std::ops::RangeInclusive<i32> = 60..=71;

/// Pitch of the bar-boundary pad note-off
pub const BAR_PAD_PITCH: i32 = 60;

/// Ticks every chord, rest and bar pad advances by.
///
/// Fails with [`Error::DeltaOutOfRange`] when the bar is too long for the
/// tick arithmetic.
pub fn note_duration(bar_length: u32) -> Result<u32> {
    (TICKS_PER_BEAT as u32)
        .checked_mul(bar_length)
        .map(|ticks| ticks / BEATS_PER_DURATION_UNIT)
        .ok_or(Error::DeltaOutOfRange { ticks: u32::MAX })
}

/// How rests and bar pads are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestStyle {
    /// Note-offs with velocity 0, as the chord-analysis tooling has always produced
    #[default]
    Filler,
    /// A single [`TrackEvent::Rest`] spanning the same number of ticks
    Silent,
}

/// Compiler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Velocity for chord note-on and note-off events
    pub velocity: u8,
    pub rest: RestStyle,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            velocity: DEFAULT_VELOCITY,
            rest: RestStyle::Filler,
        }
    }
}

/// The four values the chord-analysis collaborator delivers
#[derive(Debug, Clone, PartialEq)]
pub struct ChordChart {
    pub timeline: Timeline,
    /// Key name; see [`key::resolve`]
    pub key: String,
    /// Beats per minute, possibly fractional when measured by the analysis
    pub tempo: f64,
    /// Beats per bar
    pub bar_length: u32,
}

/// Counters reported after compilation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileStats {
    pub bars: usize,
    pub chords: usize,
    pub unknown_chords: usize,
    pub rests: usize,
}

/// Main compiler state
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Compile a chart to Standard MIDI File bytes
    pub fn compile(&self, chart: &ChordChart) -> Result<Vec<u8>> {
        let events = self.compile_chart(chart)?;
        MidiWriter::serialize(&events)
    }

    /// Compile a chart and write the MIDI file to `output`
    pub fn compile_file(&self, chart: &ChordChart, output: &Path) -> Result<()> {
        let bytes = self.compile(chart)?;
        std::fs::write(output, bytes).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write '{}': {}", output.display(), e),
            ))
        })
    }

    /// Scan the chart's timeline and compile it to track events
    pub fn compile_chart(&self, chart: &ChordChart) -> Result<Vec<TrackEvent>> {
        note_duration(chart.bar_length)?;
        let grid = Grid::parse(&chart.timeline, chart.bar_length)?;
        self.compile_grid(&grid, key::resolve(&chart.key), chart.tempo)
    }

    /// Compile a grid to track events.
    ///
    /// The stream starts with one tempo event, followed by every bar in
    /// order, each closed by a bar pad.
    pub fn compile_grid(&self, grid: &Grid, key_offset: i32, tempo: f64) -> Result<Vec<TrackEvent>> {
        if !(tempo.is_finite() && tempo > 0.0) {
            return Err(Error::InvalidInput(format!("unusable tempo {} BPM", tempo)));
        }

        let duration = note_duration(grid.bar_length)?;
        let mut stats = CompileStats::default();
        let mut events = vec![TrackEvent::Tempo {
            micros_per_beat: tempo_from_bpm(tempo),
        }];

        for bar in &grid.bars {
            self.compile_bar(bar, key_offset, duration, &mut events, &mut stats)?;
        }

        info!(
            "compiled {} bars: {} chords, {} unknown chords, {} rests, {} events",
            stats.bars,
            stats.chords,
            stats.unknown_chords,
            stats.rests,
            events.len()
        );

        Ok(events)
    }

    fn compile_bar(
        &self,
        bar: &Bar,
        key_offset: i32,
        duration: u32,
        events: &mut Vec<TrackEvent>,
        stats: &mut CompileStats,
    ) -> Result<()> {
        for beat in &bar.beats {
            match beat {
                BeatDecision::Chord(symbol) => match vocabulary::lookup(symbol) {
                    Some(pitches) => {
                        let pitches: Vec<i32> =
                            pitches.iter().map(|&p| p as i32 + key_offset).collect();
                        events.extend(
                            pitches
                                .iter()
                                .map(|&p| TrackEvent::note_on(p, self.options.velocity, 0)),
                        );
                        events.extend(
                            pitches
                                .iter()
                                .map(|&p| TrackEvent::note_off(p, self.options.velocity, duration)),
                        );
                        stats.chords += 1;
                    }
                    None => {
                        warn!("unknown chord symbol {:?}, skipping beat", symbol);
                        stats.unknown_chords += 1;
                    }
                },
                BeatDecision::Rest => {
                    self.push_rest(events, duration)?;
                    stats.rests += 1;
                }
            }
        }

        match self.options.rest {
            RestStyle::Filler => events.push(TrackEvent::note_off(BAR_PAD_PITCH, 0, duration)),
            RestStyle::Silent => events.push(TrackEvent::Rest { delta: duration }),
        }
        stats.bars += 1;
        Ok(())
    }

    fn push_rest(&self, events: &mut Vec<TrackEvent>, duration: u32) -> Result<()> {
        match self.options.rest {
            RestStyle::Filler => {
                events.extend(REST_FILLER_PITCHES.map(|p| TrackEvent::note_off(p, 0, duration)))
            }
            RestStyle::Silent => {
                // One rest spans as many ticks as the twelve fillers
                let delta = duration
                    .checked_mul(REST_FILLER_PITCHES.count() as u32)
                    .ok_or(Error::DeltaOutOfRange { ticks: u32::MAX })?;
                events.push(TrackEvent::Rest { delta });
            }
        }
        Ok(())
    }
}
