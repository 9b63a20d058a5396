//! Immutable musical context and static note content.

use crate::clef::Clef;
use crate::convert::{self, DurationClass, NoteName, A4_HZ};
use crate::key::KeySignature;
use crate::{Error, Result};

fn check_positive(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::parameter(name, value, "must be a finite value > 0"));
    }
    Ok(())
}

/// Everything needed to place a note: key, clef, tempo and tuning.
///
/// A context never changes; the `with_*` methods return a new one.
///
/// # Example
/// ```
/// use staffline::context::MusicContext;
/// use staffline::clef::Clef;
///
/// let ctx = MusicContext::default().with_clef(Clef::Bass);
/// assert_eq!(ctx.clef(), Clef::Bass);
/// assert_eq!(ctx.reference_hz(), 440.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MusicContext {
    key: KeySignature,
    clef: Clef,
    tempo_bpm: f32,
    reference_hz: f32,
}

impl MusicContext {
    /// # Errors
    /// Returns `Error::InvalidParameter` if the tempo or reference frequency
    /// is not a finite value > 0.
    pub fn new(key: KeySignature, clef: Clef, tempo_bpm: f32, reference_hz: f32) -> Result<Self> {
        check_positive("tempo_bpm", tempo_bpm)?;
        check_positive("reference_hz", reference_hz)?;
        Ok(Self {
            key,
            clef,
            tempo_bpm,
            reference_hz,
        })
    }

    pub fn key(&self) -> &KeySignature {
        &self.key
    }

    pub fn clef(&self) -> Clef {
        self.clef
    }

    pub fn tempo_bpm(&self) -> f32 {
        self.tempo_bpm
    }

    pub fn reference_hz(&self) -> f32 {
        self.reference_hz
    }

    pub fn with_key(self, key: KeySignature) -> Self {
        Self { key, ..self }
    }

    pub fn with_clef(self, clef: Clef) -> Self {
        Self { clef, ..self }
    }

    pub fn with_tempo(self, tempo_bpm: f32) -> Result<Self> {
        Self::new(self.key, self.clef, tempo_bpm, self.reference_hz)
    }

    pub fn with_reference_hz(self, reference_hz: f32) -> Result<Self> {
        Self::new(self.key, self.clef, self.tempo_bpm, reference_hz)
    }

    /// Seconds spanned by `beats` at this context's tempo.
    pub fn beats_to_seconds(&self, beats: f32) -> f32 {
        beats * 60.0 / self.tempo_bpm
    }
}

impl Default for MusicContext {
    fn default() -> Self {
        Self {
            key: KeySignature::default(),
            clef: Clef::Treble,
            tempo_bpm: 120.0,
            reference_hz: A4_HZ,
        }
    }
}

/// A note read from a score.
///
/// Carries no position or timing; both are derived through a
/// [`MusicContext`] when needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    name: NoteName,
    duration: DurationClass,
    reference_hz: f32,
    key_label: String,
}

impl Note {
    /// A note tuned to A4 = 440 Hz in C major.
    pub fn new(name: NoteName, duration: DurationClass) -> Self {
        Self {
            name,
            duration,
            reference_hz: A4_HZ,
            key_label: KeySignature::default().label(),
        }
    }

    /// Parse a note from its name string.
    ///
    /// # Errors
    /// Returns `Error::UnparseableNoteName` for malformed names. No default
    /// note is substituted.
    pub fn parse(name: &str, duration: DurationClass) -> Result<Self> {
        Ok(Self::new(name.parse()?, duration))
    }

    pub fn with_reference_hz(self, reference_hz: f32) -> Result<Self> {
        check_positive("reference_hz", reference_hz)?;
        Ok(Self {
            reference_hz,
            ..self
        })
    }

    pub fn with_key_label(self, key_label: impl Into<String>) -> Self {
        Self {
            key_label: key_label.into(),
            ..self
        }
    }

    pub fn name(&self) -> NoteName {
        self.name
    }

    pub fn duration(&self) -> DurationClass {
        self.duration
    }

    pub fn reference_hz(&self) -> f32 {
        self.reference_hz
    }

    pub fn key_label(&self) -> &str {
        &self.key_label
    }

    /// Parsed form of the note's key label.
    pub fn key(&self) -> Result<KeySignature> {
        KeySignature::parse(&self.key_label)
    }

    pub fn pitch_number(&self) -> i32 {
        self.name.pitch_number()
    }

    /// Equal-tempered frequency at the note's own reference.
    pub fn frequency(&self) -> f32 {
        convert::pitch_number_to_frequency(self.pitch_number() as f32, self.reference_hz)
    }

    /// Length in seconds under `context`'s tempo.
    pub fn duration_seconds(&self, context: &MusicContext) -> f32 {
        context.beats_to_seconds(self.duration.beats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Mode;

    #[test]
    fn test_context_rejects_bad_values() {
        let key = KeySignature::default();
        assert!(MusicContext::new(key, Clef::Treble, 0.0, 440.0).is_err());
        assert!(MusicContext::new(key, Clef::Treble, 120.0, -1.0).is_err());
        assert!(MusicContext::new(key, Clef::Treble, f32::NAN, 440.0).is_err());
        assert!(MusicContext::default().with_tempo(-5.0).is_err());
    }

    #[test]
    fn test_context_derivation_leaves_original() {
        let base = MusicContext::default();
        let minor = base.with_key(KeySignature::new(convert::Letter::A, None, Mode::Minor).unwrap());
        assert_eq!(base.key().mode(), Mode::Major);
        assert_eq!(minor.key().mode(), Mode::Minor);
        assert_eq!(minor.clef(), base.clef());
    }

    #[test]
    fn test_note_frequency_and_timing() {
        let note = Note::parse("C4", DurationClass::Half).unwrap();
        assert!((note.frequency() - 261.63).abs() < 0.01);

        let ctx = MusicContext::default().with_tempo(60.0).unwrap();
        assert_eq!(note.duration_seconds(&ctx), 2.0);

        let retuned = note.clone().with_reference_hz(415.0).unwrap();
        assert!(retuned.frequency() < note.frequency());
    }

    #[test]
    fn test_note_parse_has_no_fallback() {
        assert!(matches!(
            Note::parse("X4", DurationClass::Quarter),
            Err(Error::UnparseableNoteName { .. })
        ));
    }

    #[test]
    fn test_note_key_label() {
        let note = Note::parse("Bb3", DurationClass::Quarter)
            .unwrap()
            .with_key_label("F major");
        assert_eq!(note.key().unwrap().fifths(), -1);
        assert_eq!(note.key_label(), "F major");
    }
}
