//! Conversions between frequency, pitch number, note name and duration.
//!
//! Pitch numbers follow the MIDI convention: integers are equal-tempered
//! semitones and A4 sits at 69. The anchor frequency is passed explicitly so
//! callers can tune to something other than 440 Hz.

/// Default reference frequency (A4) in Hz.
pub const A4_HZ: f32 = 440.0;
/// Pitch number of the reference note.
pub const MIDI_A4: i32 = 69;

mod note;
mod pitch;
mod timing;

pub use note::*;
pub use pitch::*;
pub use timing::*;

#[cfg(test)]
mod tests;
