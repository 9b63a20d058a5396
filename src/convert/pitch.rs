use super::{NoteName, MIDI_A4};
use crate::{Error, Result};

fn check_frequency(name: &'static str, freq: f32) -> Result<()> {
    if !freq.is_finite() || freq <= 0.0 {
        return Err(Error::InvalidInput {
            name,
            value: freq,
            reason: "must be a finite frequency > 0 Hz",
        });
    }
    Ok(())
}

/// Convert a frequency (Hz) to a continuous pitch number.
///
/// `69 + 12 * log2(freq / reference_hz)`.
///
/// # Errors
/// Returns `Error::InvalidInput` if either frequency is non-positive or not finite.
///
/// # Example
/// ```
/// use staffline::convert::frequency_to_pitch_number;
///
/// let p = frequency_to_pitch_number(440.0, 440.0).unwrap();
/// assert_eq!(p, 69.0);
/// assert!(frequency_to_pitch_number(0.0, 440.0).is_err());
/// ```
pub fn frequency_to_pitch_number(freq: f32, reference_hz: f32) -> Result<f32> {
    check_frequency("freq", freq)?;
    check_frequency("reference_hz", reference_hz)?;
    Ok(MIDI_A4 as f32 + 12.0 * (freq / reference_hz).log2())
}

/// Convert a pitch number to a frequency (Hz). Defined for every real pitch.
pub fn pitch_number_to_frequency(pitch: f32, reference_hz: f32) -> f32 {
    reference_hz * 2.0f32.powf((pitch - MIDI_A4 as f32) / 12.0)
}

/// Batch form of [`frequency_to_pitch_number`].
///
/// Non-positive frequencies map to `0.0` instead of failing, so unvoiced
/// frames in a pitch track can be passed straight through.
pub fn hz_to_pitch_numbers(frequencies: &[f32], reference_hz: f32) -> Vec<f32> {
    frequencies
        .iter()
        .map(|&f| frequency_to_pitch_number(f, reference_hz).unwrap_or(0.0))
        .collect()
}

/// Batch form of [`pitch_number_to_frequency`].
pub fn pitch_numbers_to_hz(pitches: &[f32], reference_hz: f32) -> Vec<f32> {
    pitches
        .iter()
        .map(|&p| pitch_number_to_frequency(p, reference_hz))
        .collect()
}

/// Nearest integer pitch number for a frequency.
pub fn nearest_pitch_number(freq: f32, reference_hz: f32) -> Result<i32> {
    Ok(frequency_to_pitch_number(freq, reference_hz)?.round() as i32)
}

/// Convert a frequency to the canonical (sharp-spelled) name of the nearest note.
///
/// # Example
/// ```
/// use staffline::convert::hz_to_note;
///
/// assert_eq!(hz_to_note(392.0, 440.0).unwrap().to_string(), "G4");
/// ```
pub fn hz_to_note(freq: f32, reference_hz: f32) -> Result<NoteName> {
    Ok(NoteName::from_pitch_number(nearest_pitch_number(
        freq,
        reference_hz,
    )?))
}

/// Convert a note-name string to its equal-tempered frequency.
///
/// # Example
/// ```
/// use staffline::convert::note_to_hz;
///
/// let c4 = note_to_hz("C4", 440.0).unwrap();
/// assert!((c4 - 261.63).abs() < 0.01);
/// ```
pub fn note_to_hz(note: &str, reference_hz: f32) -> Result<f32> {
    let name: NoteName = note.parse()?;
    Ok(pitch_number_to_frequency(
        name.pitch_number() as f32,
        reference_hz,
    ))
}

/// Signed distance in cents from the nearest equal-tempered note, in `[-50, 50]`.
pub fn cents_deviation(freq: f32, reference_hz: f32) -> Result<f32> {
    let pitch = frequency_to_pitch_number(freq, reference_hz)?;
    Ok((pitch - pitch.round()) * 100.0)
}
