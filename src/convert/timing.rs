use crate::{Error, Result};

/// Written note length, measured in beats of a quarter-note pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationClass {
    Whole,
    DottedHalf,
    Half,
    DottedQuarter,
    Quarter,
    DottedEighth,
    Eighth,
    Sixteenth,
}

impl DurationClass {
    /// Length in quarter-note beats.
    pub const fn beats(self) -> f32 {
        match self {
            DurationClass::Whole => 4.0,
            DurationClass::DottedHalf => 3.0,
            DurationClass::Half => 2.0,
            DurationClass::DottedQuarter => 1.5,
            DurationClass::Quarter => 1.0,
            DurationClass::DottedEighth => 0.75,
            DurationClass::Eighth => 0.5,
            DurationClass::Sixteenth => 0.25,
        }
    }

    /// Length in seconds at `tempo_bpm`.
    pub fn seconds(self, tempo_bpm: f32) -> Result<f32> {
        duration_to_seconds(self.beats(), tempo_bpm)
    }
}

/// Convert a duration in beats to seconds: `beats * 60 / tempo_bpm`.
///
/// # Errors
/// Returns `Error::InvalidInput` if `tempo_bpm` is not a finite value > 0.
///
/// # Example
/// ```
/// use staffline::convert::duration_to_seconds;
///
/// assert_eq!(duration_to_seconds(2.0, 120.0).unwrap(), 1.0);
/// ```
pub fn duration_to_seconds(beats: f32, tempo_bpm: f32) -> Result<f32> {
    if !tempo_bpm.is_finite() || tempo_bpm <= 0.0 {
        return Err(Error::InvalidInput {
            name: "tempo_bpm",
            value: tempo_bpm,
            reason: "must be a finite tempo > 0",
        });
    }
    Ok(beats * 60.0 / tempo_bpm)
}
