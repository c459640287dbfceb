//! Track events emitted by the compiler

/// Microseconds in one minute
const MICROS_PER_MINUTE: f64 = 60_000_000.0;

/// Convert beats per minute to microseconds per beat, rounding to nearest.
///
/// Tempos too slow for `u32` saturate; the writer rejects anything past
/// 24 bits anyway.
pub fn tempo_from_bpm(bpm: f64) -> u32 {
    (MICROS_PER_MINUTE / bpm).round() as u32
}

/// One instruction in the track stream.
///
/// `delta` is the number of ticks since the previous event. Pitches are kept
/// unclamped here; range checking happens when the track is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEvent {
    /// Set tempo meta-event
    Tempo { micros_per_beat: u32 },
    NoteOn { pitch: i32, velocity: u8, delta: u32 },
    NoteOff { pitch: i32, velocity: u8, delta: u32 },
    /// Advance time without writing anything audible
    Rest { delta: u32 },
}

impl TrackEvent {
    pub fn note_on(pitch: i32, velocity: u8, delta: u32) -> Self {
        Self::NoteOn {
            pitch,
            velocity,
            delta,
        }
    }

    pub fn note_off(pitch: i32, velocity: u8, delta: u32) -> Self {
        Self::NoteOff {
            pitch,
            velocity,
            delta,
        }
    }

    pub fn delta(&self) -> u32 {
        match *self {
            Self::Tempo { .. } => 0,
            Self::NoteOn { delta, .. } | Self::NoteOff { delta, .. } | Self::Rest { delta } => {
                delta
            }
        }
    }

    pub fn is_note_on(&self) -> bool {
        matches!(self, Self::NoteOn { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tempo_from_bpm() {
        assert_eq!(tempo_from_bpm(120.0), 500_000);
        assert_eq!(tempo_from_bpm(60.0), 1_000_000);
        assert_eq!(tempo_from_bpm(90.0), 666_667);
        assert_eq!(tempo_from_bpm(7.0), 8_571_429);
        assert_eq!(tempo_from_bpm(119.6), 501_672);
        assert_eq!(tempo_from_bpm(0.001), 4_294_967_295);
    }

    #[test]
    fn test_delta() {
        assert_eq!(TrackEvent::Tempo { micros_per_beat: 1 }.delta(), 0);
        assert_eq!(TrackEvent::note_off(60, 0, 480).delta(), 480);
        assert_eq!(TrackEvent::Rest { delta: 12 }.delta(), 12);
    }
}
