//! Chord timeline records and the per-bar beat grid
//!
//! A timeline is a newline-separated list of `;`-separated records
//! `beat;symbol;_;_`. Records are consumed in order while a bar/beat cursor
//! advances; the grouping into bars is implicit.

use crate::error::{Error, Result};
use log::debug;

/// Field separator within a record
pub const FIELD_SEPARATOR: char = ';';

/// Number of fields a well-formed record carries
pub const RECORD_FIELDS: usize = 4;

/// One raw timeline entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChordRecord {
    /// Four fields with an integer beat index (1-based within its bar)
    Chord { beat: u32, symbol: String },
    /// Anything else; only ever skipped
    Malformed { raw: String },
}

impl ChordRecord {
    pub fn parse(line: &str) -> Self {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() != RECORD_FIELDS {
            return Self::Malformed { raw: line.to_string() };
        }
        match fields[0].trim().parse::<u32>() {
            Ok(beat) => Self::Chord {
                beat,
                symbol: fields[1].to_string(),
            },
            Err(_) => Self::Malformed { raw: line.to_string() },
        }
    }

    /// Beat index if this record can ever match a beat of a `bar_length` bar
    fn beat_within(&self, bar_length: u32) -> Option<u32> {
        match self {
            Self::Chord { beat, .. } if (1..=bar_length).contains(beat) => Some(*beat),
            _ => None,
        }
    }
}

/// Ordered chord records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    pub records: Vec<ChordRecord>,
}

impl Timeline {
    /// Split timeline text into records, one per line.
    ///
    /// A trailing newline yields a final empty (malformed) record.
    pub fn parse(text: &str) -> Self {
        let records = text
            .split('\n')
            .map(|line| ChordRecord::parse(line.strip_suffix('\r').unwrap_or(line)))
            .collect();
        Self { records }
    }

    pub fn from_lines<'a, I: IntoIterator<Item = &'a str>>(lines: I) -> Self {
        Self {
            records: lines.into_iter().map(ChordRecord::parse).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Decision for one beat of a bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeatDecision {
    Chord(String),
    Rest,
}

/// How a bar's beat scan finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarEnd {
    /// All beats were scanned
    Complete,
    /// A malformed record was skipped and the remaining beats dropped
    Abandoned,
    /// Records ran out; the remaining beats are rests
    RecordsExhausted,
}

/// Beat decisions of one bar. Abandoned bars carry fewer than `bar_length` beats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub beats: Vec<BeatDecision>,
    pub end: BarEnd,
}

/// Scanner state within one bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    ScanningBeat(u32),
    BarExhausted(BarEnd),
    RecordsExhausted(u32),
}

/// Walks a record slice bar by bar
pub struct GridParser<'a> {
    records: &'a [ChordRecord],
    bar_length: u32,
    cursor: usize,
}

impl<'a> GridParser<'a> {
    pub fn new(records: &'a [ChordRecord], bar_length: u32) -> Result<Self> {
        if bar_length == 0 {
            return Err(Error::InvalidInput("bar length must be at least 1".into()));
        }
        Ok(Self {
            records,
            bar_length,
            cursor: 0,
        })
    }

    fn scan_bar(&mut self) -> Bar {
        let mut beats = Vec::new();
        let mut state = ScanState::ScanningBeat(1);

        loop {
            state = match state {
                ScanState::ScanningBeat(beat) if beat > self.bar_length => {
                    ScanState::BarExhausted(BarEnd::Complete)
                }
                ScanState::ScanningBeat(beat) => match self.records.get(self.cursor) {
                    None => ScanState::RecordsExhausted(beat),
                    Some(record) => match record.beat_within(self.bar_length) {
                        None => {
                            debug!(
                                "skipping malformed record {} ({:?}), abandoning bar at beat {}",
                                self.cursor, record, beat
                            );
                            self.cursor += 1;
                            ScanState::BarExhausted(BarEnd::Abandoned)
                        }
                        Some(index) if index == beat => {
                            if let ChordRecord::Chord { symbol, .. } = record {
                                beats.push(BeatDecision::Chord(symbol.clone()));
                            }
                            self.cursor += 1;
                            ScanState::ScanningBeat(beat + 1)
                        }
                        Some(_) => {
                            beats.push(BeatDecision::Rest);
                            ScanState::ScanningBeat(beat + 1)
                        }
                    },
                },
                ScanState::RecordsExhausted(beat) => {
                    beats.extend((beat..=self.bar_length).map(|_| BeatDecision::Rest));
                    ScanState::BarExhausted(BarEnd::RecordsExhausted)
                }
                ScanState::BarExhausted(end) => return Bar { beats, end },
            };
        }
    }
}

impl Iterator for GridParser<'_> {
    type Item = Bar;

    fn next(&mut self) -> Option<Bar> {
        if self.cursor >= self.records.len() {
            return None;
        }
        Some(self.scan_bar())
    }
}

/// Per-bar, per-beat decisions for a whole timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub bar_length: u32,
    pub bars: Vec<Bar>,
}

impl Grid {
    pub fn parse(timeline: &Timeline, bar_length: u32) -> Result<Self> {
        let bars = GridParser::new(&timeline.records, bar_length)?.collect();
        Ok(Self { bar_length, bars })
    }
}
